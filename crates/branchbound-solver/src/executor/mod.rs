//! Where bound computations run.
//!
//! An [`Executor`] turns a node into a [`BoundFuture`]. Schedulers never
//! call [`Problem::compute_bound`] directly, so the same search loop runs
//! unchanged on the calling thread or on a worker pool.

mod future;
mod inline;
mod pool;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use branchbound_core::{Node, Problem};

use crate::error::ExecutorError;

pub use future::{wait_any, BoundFuture, BoundOutcome};
pub use inline::InlineExecutor;
pub use pool::PoolExecutor;

/// Evaluates node bounds, possibly concurrently.
pub trait Executor<P: Problem> {
    /// Number of evaluations that can run at the same time.
    fn workers(&self) -> usize;

    /// Starts evaluating `node`.
    ///
    /// Every submission is evaluated exactly once. The returned future
    /// resolves when the evaluation finishes, in completion order.
    fn submit(&self, problem: &Arc<P>, node: &Node<P>) -> BoundFuture<P>;
}

impl<P: Problem, E: Executor<P> + ?Sized> Executor<P> for &E {
    fn workers(&self) -> usize {
        (**self).workers()
    }

    fn submit(&self, problem: &Arc<P>, node: &Node<P>) -> BoundFuture<P> {
        (**self).submit(problem, node)
    }
}

/// Runs the oracle, converting a panic into [`ExecutorError::WorkerLost`].
pub(crate) fn evaluate<P: Problem>(problem: &P, node: &Node<P>) -> BoundOutcome<P> {
    match panic::catch_unwind(AssertUnwindSafe(|| problem.compute_bound(node))) {
        Ok(Ok(relaxation)) => Ok(relaxation),
        Ok(Err(e)) => Err(ExecutorError::Oracle(e)),
        Err(payload) => Err(ExecutorError::WorkerLost(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests;
