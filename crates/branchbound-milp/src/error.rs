//! Error types for model construction.

use thiserror::Error;

/// Errors raised while building an integer program.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MilpError {
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Variable {index} out of range for a model with {count} variables")]
    VariableOutOfRange { index: usize, count: usize },
}
