//! The problem contract consumed by every scheduler.

use std::fmt::Debug;

use crate::error::{BranchError, OracleError};
use crate::node::Node;
use crate::relaxation::Relaxation;
use crate::sense::Sense;

/// An optimization problem explorable by branch-and-bound.
///
/// `self` is the problem-global context shared read-only by every node and
/// every worker; a node only carries its restriction chain. Computing a
/// bound is therefore a pure function of `(self, node)` and may run
/// concurrently on any number of threads.
///
/// The engine guarantees that [`make_child`](Problem::make_child),
/// [`terminal`](Problem::terminal) and [`get_solution`](Problem::get_solution)
/// are only called on nodes whose relaxation has been computed, and that
/// infeasible nodes are never branched.
pub trait Problem: Sized + Send + Sync + 'static {
    /// Delta separating a child from its parent (e.g. a tightened variable
    /// bound).
    type Branch: Clone + PartialEq + Debug + Send + Sync + 'static;

    /// Relaxed point returned by the oracle.
    type Candidate: Clone + Debug + Send + Sync + 'static;

    /// Confirmed terminal assignment.
    type Solution: Clone + Debug + Send + Sync + 'static;

    fn sense(&self) -> Sense;

    /// Solves the relaxation restricted by the node.
    ///
    /// An infeasible relaxation is not an error: return
    /// [`Relaxation::infeasible`]. Return an [`OracleError`] only when the
    /// oracle failed to reach a definitive status.
    fn compute_bound(&self, node: &Node<Self>) -> Result<Relaxation<Self::Candidate>, OracleError>;

    /// Number of children a branch of `node` produces.
    fn separate(&self, _node: &Node<Self>) -> usize {
        2
    }

    /// Builds child `which` of `node`, `which` in `[0, separate(node))`.
    ///
    /// Must be deterministic: the same parent and index always yield equal
    /// restrictions.
    fn make_child(&self, node: &Node<Self>, which: usize) -> Result<Node<Self>, BranchError>;

    /// Returns true if the node's candidate needs no further branching.
    fn terminal(&self, node: &Node<Self>) -> bool {
        self.get_solution(node).is_some()
    }

    /// Returns the value and solution of a terminal node.
    fn get_solution(&self, node: &Node<Self>) -> Option<(f64, Self::Solution)>;
}
