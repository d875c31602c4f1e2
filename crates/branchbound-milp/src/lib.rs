//! Integer programs for branchbound.
//!
//! [`IntegerProgram`] turns any black-box [`RelaxationOracle`] into a
//! [`Problem`](branchbound_core::Problem): nodes restrict variable bounds,
//! the oracle solves the continuous relaxation under those bounds, and
//! branching splits on the most fractional integer variable.
//!
//! The [`knapsack`] module bundles the classic 0/1 knapsack with its
//! closed-form LP relaxation.

pub mod bounds;
pub mod branching;
pub mod error;
pub mod knapsack;
pub mod oracle;
pub mod program;

pub use bounds::{BoundChange, VariableBounds};
pub use branching::most_fractional;
pub use error::MilpError;
pub use knapsack::{knapsack, Knapsack, KnapsackRelaxation};
pub use oracle::{OracleSolution, RelaxationOracle};
pub use program::{IntegerProgram, DEFAULT_INTEGRALITY_TOLERANCE};
