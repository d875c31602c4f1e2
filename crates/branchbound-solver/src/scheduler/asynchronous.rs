//! Asynchronous parallel search.

use std::time::Duration;

use branchbound_core::{Node, Problem};
use tracing::debug;

use super::Scheduler;
use crate::error::SolverError;
use crate::executor::{wait_any, BoundFuture, Executor};
use crate::scope::{Disposition, SearchScope};

struct InFlight<P: Problem> {
    node: Node<P>,
    future: BoundFuture<P>,
    attempt: u32,
}

/// Keeps up to `workers` evaluations in flight and processes each as soon
/// as it completes.
///
/// Waiting times out every `poll_interval` so that time limits and the
/// terminate flag are noticed while all workers are busy. On interruption
/// the outstanding evaluations are abandoned, not cancelled.
#[derive(Debug, Clone, Copy)]
pub struct AsynchronousScheduler {
    workers: usize,
    poll_interval: Duration,
}

impl AsynchronousScheduler {
    pub fn new(workers: usize, poll_interval: Duration) -> Self {
        Self {
            workers: workers.max(1),
            poll_interval,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl<P: Problem> Scheduler<P> for AsynchronousScheduler {
    fn run<E>(&self, scope: &mut SearchScope<'_, P>, executor: &E) -> Result<(), SolverError>
    where
        E: Executor<P> + ?Sized,
    {
        let mut in_flight: Vec<InFlight<P>> = Vec::with_capacity(self.workers);

        while !scope.poll_interrupt() {
            while scope.stop_reason().is_none() && in_flight.len() < self.workers {
                let Some(node) = scope.next_node() else {
                    break;
                };
                if !scope.can_dispatch() {
                    scope.restore(node);
                    break;
                }
                let future = executor.submit(scope.problem(), &node);
                in_flight.push(InFlight {
                    node,
                    future,
                    attempt: 1,
                });
            }
            scope.record_in_flight(in_flight.len());
            if in_flight.is_empty() {
                break;
            }

            let Some(index) = wait_any(in_flight.iter().map(|job| &job.future), self.poll_interval)
            else {
                continue;
            };
            // Select may wake spuriously; only a taken result is processed.
            let Some(outcome) = in_flight[index].future.try_take() else {
                continue;
            };
            let InFlight { node, attempt, .. } = in_flight.swap_remove(index);

            if let Disposition::Retry(node) = scope.process(node, outcome, attempt)? {
                let future = executor.submit(scope.problem(), &node);
                in_flight.push(InFlight {
                    node,
                    future,
                    attempt: attempt + 1,
                });
            }
        }

        if !in_flight.is_empty() {
            debug!(outstanding = in_flight.len(), "Leaving evaluations behind");
        }
        scope.abandon(in_flight.into_iter().map(|job| job.node));
        Ok(())
    }
}
