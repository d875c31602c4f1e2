//! Error types for problem implementations.

use thiserror::Error;

/// Failure of the external bound oracle for a single subproblem.
///
/// The engine never aborts on an oracle error: the subproblem is logged and
/// pruned conservatively, and the run is reported as not proven optimal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// The oracle stopped without a definitive status (iteration limit,
    /// unbounded, numerical trouble, ...).
    #[error("oracle terminated without a definitive status: {0}")]
    Inconclusive(String),

    /// The oracle could not be run at all.
    #[error("oracle failed: {0}")]
    Failed(String),
}

/// Contract violation while producing a child node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BranchError {
    /// The node has no fractional decision left to branch on.
    #[error("node has no branching candidate")]
    NoBranchingCandidate,

    /// The requested child index is outside `[0, arity)`.
    #[error("child {which} requested but the node only separates into {arity}")]
    ChildOutOfRange { which: usize, arity: usize },

    /// The node has not been bounded yet.
    #[error("node must be bounded before it can be branched")]
    Unbounded,
}
