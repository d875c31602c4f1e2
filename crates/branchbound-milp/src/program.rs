//! [`IntegerProgram`]: a [`Problem`] over a [`RelaxationOracle`].

use std::fmt::{self, Debug};

use branchbound_core::{BranchError, Node, OracleError, OracleStatus, Problem, Relaxation, Sense};
use tracing::trace;

use crate::bounds::{BoundChange, VariableBounds};
use crate::branching::most_fractional;
use crate::oracle::RelaxationOracle;

/// Distance to the nearest integer under which a value counts as integral.
pub const DEFAULT_INTEGRALITY_TOLERANCE: f64 = 1e-6;

/// An integer program solved by branching on variable bounds.
///
/// Nodes carry [`BoundChange`] deltas. Bounding resolves the chain on top
/// of the oracle's base bounds and hands them to the oracle; branching
/// splits on the most fractional integer variable of the relaxed point.
pub struct IntegerProgram<O> {
    oracle: O,
    sense: Sense,
    integer_vars: Vec<usize>,
    base: VariableBounds,
    tolerance: f64,
}

impl<O: RelaxationOracle> IntegerProgram<O> {
    pub fn new(oracle: O) -> Self {
        let mut integer_vars = oracle.integer_variables();
        integer_vars.sort_unstable();
        integer_vars.dedup();
        Self {
            sense: oracle.sense(),
            base: oracle.base_bounds(),
            integer_vars,
            oracle,
            tolerance: DEFAULT_INTEGRALITY_TOLERANCE,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.abs();
        self
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn integer_variables(&self) -> &[usize] {
        &self.integer_vars
    }

    /// Bounds in effect at `node`.
    pub fn bounds_at(&self, node: &Node<Self>) -> VariableBounds {
        VariableBounds::resolve(&self.base, node.restrictions())
    }

    fn branching_variable(&self, point: &[f64]) -> Option<usize> {
        most_fractional(point, &self.integer_vars, self.tolerance)
    }
}

impl<O: RelaxationOracle> Problem for IntegerProgram<O> {
    type Branch = BoundChange;
    type Candidate = Vec<f64>;
    type Solution = Vec<f64>;

    fn sense(&self) -> Sense {
        self.sense
    }

    fn compute_bound(&self, node: &Node<Self>) -> Result<Relaxation<Vec<f64>>, OracleError> {
        let bounds = self.bounds_at(node);
        if bounds.has_empty_domain() {
            return Ok(Relaxation::infeasible(self.sense));
        }

        let solution = self.oracle.solve(&bounds)?;
        if solution.status == OracleStatus::Optimal
            && (!solution.objective.is_finite() || solution.values.iter().any(|v| !v.is_finite()))
        {
            return Err(OracleError::Failed(format!(
                "oracle reported optimal with non-finite objective {} or values",
                solution.objective
            )));
        }
        let relaxation =
            Relaxation::from_status(self.sense, solution.status, solution.objective, solution.values)?;

        if let Some(candidate) = &relaxation.candidate {
            let expected = self.oracle.variable_count();
            if candidate.point.len() != expected {
                return Err(OracleError::Failed(format!(
                    "oracle returned {} values for {} variables",
                    candidate.point.len(),
                    expected
                )));
            }
        }
        Ok(relaxation)
    }

    fn separate(&self, node: &Node<Self>) -> usize {
        match node.candidate() {
            Some(candidate) if self.branching_variable(&candidate.point).is_some() => 2,
            _ => 0,
        }
    }

    fn make_child(&self, node: &Node<Self>, which: usize) -> Result<Node<Self>, BranchError> {
        let candidate = node.candidate().ok_or(BranchError::Unbounded)?;
        let var = self
            .branching_variable(&candidate.point)
            .ok_or(BranchError::NoBranchingCandidate)?;
        let value = candidate.point[var];

        let change = match which {
            0 => BoundChange::Down {
                var,
                ub: value.floor(),
            },
            1 => BoundChange::Up {
                var,
                lb: value.ceil(),
            },
            _ => return Err(BranchError::ChildOutOfRange { which, arity: 2 }),
        };
        trace!(depth = node.depth() + 1, %change, "Branching");
        Ok(node.child(change))
    }

    fn get_solution(&self, node: &Node<Self>) -> Option<(f64, Vec<f64>)> {
        let candidate = node.candidate()?;
        if self.branching_variable(&candidate.point).is_some() {
            return None;
        }
        let mut values = candidate.point.clone();
        for &var in &self.integer_vars {
            if let Some(value) = values.get_mut(var) {
                *value = value.round();
            }
        }
        Some((candidate.value, values))
    }
}

impl<O> Debug for IntegerProgram<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntegerProgram")
            .field("sense", &self.sense)
            .field("variables", &self.base.len())
            .field("integer_variables", &self.integer_vars.len())
            .field("tolerance", &self.tolerance)
            .finish()
    }
}
