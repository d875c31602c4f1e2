//! The black-box relaxation oracle contract.

use branchbound_core::{OracleError, OracleStatus, Sense};

use crate::bounds::VariableBounds;

/// Outcome of one relaxation solve.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleSolution {
    pub status: OracleStatus,
    pub objective: f64,
    /// Value of every variable; ignored unless `status` is optimal.
    pub values: Vec<f64>,
}

impl OracleSolution {
    pub fn optimal(objective: f64, values: Vec<f64>) -> Self {
        Self {
            status: OracleStatus::Optimal,
            objective,
            values,
        }
    }

    pub fn infeasible() -> Self {
        Self {
            status: OracleStatus::Infeasible,
            objective: f64::NAN,
            values: Vec::new(),
        }
    }
}

/// Solves the continuous relaxation of an integer program under arbitrary
/// variable bounds.
///
/// Implementations must be pure with respect to `bounds`: the same bounds
/// always produce the same status and objective. The oracle is shared by
/// every worker thread.
pub trait RelaxationOracle: Send + Sync + 'static {
    fn sense(&self) -> Sense;

    fn variable_count(&self) -> usize;

    /// Indices of the variables required to take integral values.
    fn integer_variables(&self) -> Vec<usize>;

    /// Bounds of the unrestricted model.
    fn base_bounds(&self) -> VariableBounds;

    /// Solves the relaxation under `bounds`.
    ///
    /// Returns `Err` only when the oracle could not be run at all; an
    /// infeasible or inconclusive solve is reported through the status.
    fn solve(&self, bounds: &VariableBounds) -> Result<OracleSolution, OracleError>;
}
