//! Evaluation on a rayon thread pool.

use std::fmt;
use std::sync::Arc;

use branchbound_core::{Node, Problem};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use super::{evaluate, BoundFuture, Executor};
use crate::error::ExecutorError;

/// Runs bound computations on a dedicated pool of worker threads.
///
/// Each worker receives a shared handle to the problem and a clone of the
/// node (restriction chains are shared, not copied). A panicking oracle is
/// reported as [`ExecutorError::WorkerLost`] and the worker survives.
pub struct PoolExecutor {
    pool: ThreadPool,
    workers: usize,
}

impl PoolExecutor {
    pub fn new(workers: usize) -> Result<Self, ExecutorError> {
        let workers = workers.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("branchbound-worker-{}", i))
            .build()
            .map_err(|e| ExecutorError::PoolBuild(e.to_string()))?;
        debug!(workers, "Worker pool started");
        Ok(Self { pool, workers })
    }
}

impl<P: Problem> Executor<P> for PoolExecutor {
    fn workers(&self) -> usize {
        self.workers
    }

    fn submit(&self, problem: &Arc<P>, node: &Node<P>) -> BoundFuture<P> {
        let (sender, future) = BoundFuture::pending();
        let problem = Arc::clone(problem);
        let node = node.clone();
        self.pool.spawn(move || {
            let outcome = evaluate(problem.as_ref(), &node);
            // The receiver may have been abandoned.
            let _ = sender.send(outcome);
        });
        future
    }
}

impl fmt::Debug for PoolExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolExecutor")
            .field("workers", &self.workers)
            .finish()
    }
}
