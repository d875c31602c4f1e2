//! Branch-and-bound search engine.
//!
//! This crate provides:
//! - [`Frontier`]: open nodes ordered by bound
//! - [`SharedIncumbent`]: the best solution found so far, shared across threads
//! - [`Executor`]: where bound computations run ([`InlineExecutor`], [`PoolExecutor`])
//! - Schedulers: serial, synchronous (batch + barrier) and asynchronous
//! - Terminations: time, evaluation budget, external cancellation
//! - [`Solver`]: the entry point tying them together

pub mod error;
pub mod executor;
pub mod frontier;
pub mod incumbent;
pub mod result;
pub mod scheduler;
pub mod scope;
pub mod solver;
pub mod stats;
pub mod termination;

pub use error::{ExecutorError, FrontierError, SolverError};
pub use executor::{wait_any, BoundFuture, BoundOutcome, Executor, InlineExecutor, PoolExecutor};
pub use frontier::Frontier;
pub use incumbent::{IncumbentUpdate, SharedIncumbent};
pub use result::{SolveResult, SolveStatus, StopReason};
pub use scheduler::{AsynchronousScheduler, Scheduler, SerialScheduler, SynchronousScheduler};
pub use scope::{Disposition, SearchScope};
pub use solver::Solver;
pub use stats::SearchStats;
pub use termination::{
    EvaluationCountTermination, ExternalTermination, NoTermination, OrTermination, Termination,
    TimeTermination,
};
