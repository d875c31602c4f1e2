//! branchbound - A parallel branch-and-bound engine in Rust
//!
//! Implement [`Problem`] for your model (or wrap a relaxation oracle in an
//! [`IntegerProgram`](milp::IntegerProgram)) and call [`solve`].
//!
//! # Example
//!
//! ```rust
//! use branchbound::prelude::*;
//!
//! let problem = knapsack(&[2.0, 3.0, 4.0, 5.0], &[3.0, 4.0, 5.0, 6.0], 5.0).unwrap();
//! let config = SolverConfig::new().with_scheduler(SchedulerType::Synchronous).with_workers(2);
//! let result = branchbound::solve(problem, &config).unwrap();
//!
//! assert!(result.is_proven_optimal());
//! assert_eq!(result.value, 7.0);
//! ```

// Problem contract
pub use branchbound_core::{
    BranchError, Candidate, Node, OracleError, OracleStatus, Problem, Relaxation, Restrictions,
    Sense,
};

// Configuration
pub use branchbound_config::{
    ConfigError, NodeSelection, PruneRule, SchedulerType, SolverConfig, TerminationConfig,
    WorkerCount,
};

// Engine
pub use branchbound_solver::{
    BoundFuture, Executor, ExecutorError, IncumbentUpdate, InlineExecutor, PoolExecutor,
    SearchStats, SharedIncumbent, SolveResult, SolveStatus, Solver, SolverError, StopReason,
};

/// Terminations that can be layered on a [`Solver`].
pub use branchbound_solver::termination;

/// Integer programs over black-box relaxation oracles.
pub use branchbound_milp as milp;

#[cfg(feature = "console")]
pub mod console;

mod solve;
pub use solve::{load_config, run, solve, solve_with, CONFIG_FILE};

pub mod prelude {
    pub use super::milp::{knapsack, IntegerProgram, Knapsack, RelaxationOracle};
    pub use super::{
        Node, NodeSelection, Problem, PruneRule, Relaxation, SchedulerType, Sense, SolveResult,
        SolveStatus, SolverConfig, StopReason,
    };
}
