//! Error types for the search engine.

use branchbound_config::ConfigError;
use branchbound_core::{BranchError, OracleError};
use thiserror::Error;

/// Failure to obtain a bound from an executor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutorError {
    #[error("failed to build worker pool: {0}")]
    PoolBuild(String),

    /// The worker evaluating the node panicked.
    #[error("worker lost while evaluating node: {0}")]
    WorkerLost(String),

    /// The result channel closed without a result.
    #[error("result channel disconnected")]
    Disconnected,

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl ExecutorError {
    /// Returns true for failures of the transport rather than the oracle.
    ///
    /// Transport failures are worth one retry; oracle failures are
    /// deterministic.
    pub fn is_transport(&self) -> bool {
        matches!(self, ExecutorError::WorkerLost(_) | ExecutorError::Disconnected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontierError {
    #[error("frontier is empty")]
    Empty,

    #[error("frontier is full ({limit} nodes)")]
    Full { limit: usize },
}

/// Errors that abort a solve.
///
/// Resource exhaustion and oracle failures are not errors: they are
/// reported through [`SolveStatus`](crate::SolveStatus).
#[derive(Debug, Error)]
pub enum SolverError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Executor(#[from] ExecutorError),

    #[error("branching failed: {0}")]
    Branch(#[from] BranchError),
}
