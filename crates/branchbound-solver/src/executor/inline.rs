//! Evaluation on the calling thread.

use std::sync::Arc;

use branchbound_core::{Node, Problem};

use super::{evaluate, BoundFuture, Executor};

/// Computes bounds synchronously in [`submit`](Executor::submit).
///
/// The returned future is already resolved. Used by the serial scheduler
/// and handy for deterministic tests of the parallel ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineExecutor;

impl InlineExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl<P: Problem> Executor<P> for InlineExecutor {
    fn workers(&self) -> usize {
        1
    }

    fn submit(&self, problem: &Arc<P>, node: &Node<P>) -> BoundFuture<P> {
        BoundFuture::ready(evaluate(problem.as_ref(), node))
    }
}
