//! Search-tree nodes.

use std::fmt::{self, Debug};

use crate::problem::Problem;
use crate::relaxation::{Candidate, Relaxation};
use crate::restriction::Restrictions;
use crate::sense::Sense;

/// A subproblem in the search tree.
///
/// A node holds its restriction chain (its delta plus the shared chain of
/// its ancestors), the bound inherited from its parent and, once the oracle
/// has run, its own [`Relaxation`]. Nodes are never modified after their
/// relaxation is recorded.
///
/// # Example
///
/// ```
/// use branchbound_core::{Node, OracleError, Problem, Relaxation, Sense};
///
/// #[derive(Debug)]
/// struct Depth;
///
/// impl Problem for Depth {
///     type Branch = bool;
///     type Candidate = ();
///     type Solution = usize;
///
///     fn sense(&self) -> Sense { Sense::Minimize }
///     fn compute_bound(&self, node: &Node<Self>) -> Result<Relaxation<()>, OracleError> {
///         Ok(Relaxation::optimal(node.depth() as f64, ()))
///     }
///     fn make_child(&self, node: &Node<Self>, which: usize) -> Result<Node<Self>, branchbound_core::BranchError> {
///         Ok(node.child(which == 1))
///     }
///     fn get_solution(&self, node: &Node<Self>) -> Option<(f64, usize)> {
///         (node.depth() == 3).then(|| (3.0, node.depth()))
///     }
/// }
///
/// let problem = Depth;
/// let root = Node::root(&problem);
/// assert_eq!(root.bound(), None);
/// assert_eq!(root.inherited_bound(), f64::NEG_INFINITY);
///
/// let root = root.with_relaxation(problem.compute_bound(&Node::root(&problem)).unwrap());
/// let child = problem.make_child(&root, 1).unwrap();
/// assert_eq!(child.depth(), 1);
/// assert_eq!(child.inherited_bound(), 0.0);
/// assert_eq!(child.restrictions().latest(), Some(&true));
/// ```
pub struct Node<P: Problem> {
    sense: Sense,
    depth: usize,
    restrictions: Restrictions<P::Branch>,
    inherited_bound: f64,
    relaxation: Option<Relaxation<P::Candidate>>,
}

impl<P: Problem> Node<P> {
    /// Creates the unrestricted root node of `problem`.
    pub fn root(problem: &P) -> Self {
        let sense = problem.sense();
        Self {
            sense,
            depth: 0,
            restrictions: Restrictions::new(),
            inherited_bound: sense.best_possible(),
            relaxation: None,
        }
    }

    /// Creates a child narrowed by `delta`.
    ///
    /// The child inherits the sense and this node's best known bound.
    pub fn child(&self, delta: P::Branch) -> Self {
        Self {
            sense: self.sense,
            depth: self.depth + 1,
            restrictions: self.restrictions.extend(delta),
            inherited_bound: self.best_known_bound(),
            relaxation: None,
        }
    }

    /// Records the solved relaxation of this node.
    pub fn with_relaxation(mut self, relaxation: Relaxation<P::Candidate>) -> Self {
        self.relaxation = Some(relaxation);
        self
    }

    #[inline]
    pub fn sense(&self) -> Sense {
        self.sense
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn restrictions(&self) -> &Restrictions<P::Branch> {
        &self.restrictions
    }

    /// Bound of the parent at the time this node was created.
    #[inline]
    pub fn inherited_bound(&self) -> f64 {
        self.inherited_bound
    }

    /// Own relaxation bound, `None` until computed.
    #[inline]
    pub fn bound(&self) -> Option<f64> {
        self.relaxation.as_ref().map(|r| r.bound)
    }

    /// Own bound if computed, otherwise the inherited one.
    #[inline]
    pub fn best_known_bound(&self) -> f64 {
        self.bound().unwrap_or(self.inherited_bound)
    }

    #[inline]
    pub fn relaxation(&self) -> Option<&Relaxation<P::Candidate>> {
        self.relaxation.as_ref()
    }

    #[inline]
    pub fn candidate(&self) -> Option<&Candidate<P::Candidate>> {
        self.relaxation.as_ref().and_then(|r| r.candidate.as_ref())
    }

    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.relaxation.is_some()
    }

    /// Returns true once the relaxation is known to be infeasible.
    pub fn is_infeasible(&self) -> bool {
        self.relaxation
            .as_ref()
            .is_some_and(|r| !r.is_feasible(self.sense))
    }
}

impl<P: Problem> Clone for Node<P> {
    fn clone(&self) -> Self {
        Self {
            sense: self.sense,
            depth: self.depth,
            restrictions: self.restrictions.clone(),
            inherited_bound: self.inherited_bound,
            relaxation: self.relaxation.clone(),
        }
    }
}

impl<P: Problem> Debug for Node<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("sense", &self.sense)
            .field("depth", &self.depth)
            .field("restrictions", &self.restrictions)
            .field("inherited_bound", &self.inherited_bound)
            .field("bound", &self.bound())
            .finish()
    }
}
