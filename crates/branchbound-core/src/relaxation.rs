//! Results of the bound oracle.

use std::fmt;

use crate::error::OracleError;
use crate::sense::Sense;

/// Termination status reported by an external relaxation solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleStatus {
    Optimal,
    Infeasible,
    /// Any other status (iteration limit, unbounded, numerical error, ...).
    Other(String),
}

impl fmt::Display for OracleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleStatus::Optimal => write!(f, "optimal"),
            OracleStatus::Infeasible => write!(f, "infeasible"),
            OracleStatus::Other(status) => write!(f, "{}", status),
        }
    }
}

/// The relaxed point of a feasible relaxation and its objective value.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<C> {
    pub value: f64,
    pub point: C,
}

/// Bound and optional candidate of a solved relaxation.
///
/// # Example
///
/// ```
/// use branchbound_core::{OracleStatus, Relaxation, Sense};
///
/// let solved = Relaxation::from_status(Sense::Maximize, OracleStatus::Optimal, 7.5, vec![1.0, 0.5])
///     .unwrap();
/// assert_eq!(solved.bound, 7.5);
/// assert!(solved.is_feasible(Sense::Maximize));
///
/// let empty = Relaxation::<Vec<f64>>::infeasible(Sense::Maximize);
/// assert_eq!(empty.bound, f64::NEG_INFINITY);
/// assert!(empty.candidate.is_none());
///
/// let stalled = Relaxation::<Vec<f64>>::from_status(
///     Sense::Maximize,
///     OracleStatus::Other("iteration limit".into()),
///     0.0,
///     vec![],
/// );
/// assert!(stalled.is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Relaxation<C> {
    /// Valid bound on every solution in the subtree.
    pub bound: f64,
    /// Relaxed optimum, absent when the relaxation is infeasible.
    pub candidate: Option<Candidate<C>>,
}

impl<C> Relaxation<C> {
    /// A feasible relaxation whose candidate value equals its bound.
    pub fn optimal(value: f64, point: C) -> Self {
        Self {
            bound: value,
            candidate: Some(Candidate { value, point }),
        }
    }

    /// A feasible relaxation with a bound distinct from the candidate value.
    pub fn with_bound(bound: f64, value: f64, point: C) -> Self {
        Self {
            bound,
            candidate: Some(Candidate { value, point }),
        }
    }

    /// An infeasible relaxation: the bound is the sense-respecting infinity.
    pub fn infeasible(sense: Sense) -> Self {
        Self {
            bound: sense.worst(),
            candidate: None,
        }
    }

    /// Interprets an oracle's termination status.
    ///
    /// Anything other than optimal or infeasible is reported as
    /// [`OracleError::Inconclusive`].
    pub fn from_status(
        sense: Sense,
        status: OracleStatus,
        objective: f64,
        point: C,
    ) -> Result<Self, OracleError> {
        match status {
            OracleStatus::Optimal => Ok(Self::optimal(objective, point)),
            OracleStatus::Infeasible => Ok(Self::infeasible(sense)),
            OracleStatus::Other(status) => Err(OracleError::Inconclusive(status)),
        }
    }

    pub fn is_feasible(&self, sense: Sense) -> bool {
        self.candidate.is_some() && !sense.is_infeasible(self.bound)
    }
}
