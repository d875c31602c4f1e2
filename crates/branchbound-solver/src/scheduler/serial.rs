//! Serial depth of one: pop, evaluate, process.

use branchbound_core::Problem;

use super::{settle, Scheduler};
use crate::error::SolverError;
use crate::executor::Executor;
use crate::scope::SearchScope;

/// Evaluates one node at a time and waits for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialScheduler;

impl<P: Problem> Scheduler<P> for SerialScheduler {
    fn run<E>(&self, scope: &mut SearchScope<'_, P>, executor: &E) -> Result<(), SolverError>
    where
        E: Executor<P> + ?Sized,
    {
        while let Some(node) = scope.next_node() {
            if !scope.can_dispatch() {
                scope.restore(node);
                break;
            }
            let outcome = executor.submit(scope.problem(), &node).wait();
            settle(scope, executor, node, outcome)?;
        }
        Ok(())
    }
}
