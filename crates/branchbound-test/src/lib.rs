//! Shared test fixtures for branchbound crates.
//!
//! This crate provides problem instances and oracle wrappers for testing.
//! It does NOT depend on `branchbound-solver` so the solver can use it as a
//! dev-dependency.
//!
//! - [`knapsack`] - the toy and infeasible knapsack fixtures
//! - [`brute_force`] - exhaustive enumeration for small instances
//! - [`generator`] - seeded random instances
//! - [`oracle`] - fault-injecting and call-counting oracle wrappers
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! branchbound-test = { workspace = true }
//! ```

pub mod brute_force;
pub mod generator;
pub mod knapsack;
pub mod oracle;

pub use brute_force::{best_packing, best_packing_within};
pub use generator::{random_instance, KnapsackInstance};
pub use knapsack::{
    infeasible_knapsack, infeasible_relaxation, toy_knapsack, toy_knapsack_minimizing,
    toy_relaxation, TOY_OPTIMUM,
};
pub use oracle::{CallCount, CountingOracle, FailingOracle, PanickingOracle, SlowOracle};
