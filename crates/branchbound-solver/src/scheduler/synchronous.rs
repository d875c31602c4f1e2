//! Synchronous parallel rounds.

use branchbound_core::Problem;
use tracing::debug;

use super::{settle, Scheduler};
use crate::error::SolverError;
use crate::executor::Executor;
use crate::scope::SearchScope;

/// Dispatches rounds of up to `batch_size` nodes and processes them after
/// all have returned.
///
/// Results are processed in submission order, so the search is
/// deterministic regardless of which worker finishes first. Budgets are
/// checked before each submission; a dispatched round always completes.
#[derive(Debug, Clone, Copy)]
pub struct SynchronousScheduler {
    batch_size: usize,
}

impl SynchronousScheduler {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

impl<P: Problem> Scheduler<P> for SynchronousScheduler {
    fn run<E>(&self, scope: &mut SearchScope<'_, P>, executor: &E) -> Result<(), SolverError>
    where
        E: Executor<P> + ?Sized,
    {
        let mut round = 0u64;
        while scope.stop_reason().is_none() {
            let mut batch = Vec::with_capacity(self.batch_size);
            while batch.len() < self.batch_size {
                let Some(node) = scope.next_node() else {
                    break;
                };
                if !scope.can_dispatch() {
                    scope.restore(node);
                    break;
                }
                let future = executor.submit(scope.problem(), &node);
                batch.push((node, future));
            }
            if batch.is_empty() {
                break;
            }

            round += 1;
            scope.record_in_flight(batch.len());
            debug!(round, batch = batch.len(), open = scope.frontier().len(), "Round dispatched");

            let outcomes: Vec<_> = batch
                .into_iter()
                .map(|(node, future)| (node, future.wait()))
                .collect();
            for (node, outcome) in outcomes {
                settle(scope, executor, node, outcome)?;
            }
        }
        Ok(())
    }
}
