//! Tree traversal strategies.
//!
//! All schedulers share the node life cycle of [`SearchScope`]; they only
//! differ in how evaluations are dispatched and awaited:
//!
//! - [`SerialScheduler`]: one node at a time on the calling thread
//! - [`SynchronousScheduler`]: rounds of `B` nodes behind a barrier
//! - [`AsynchronousScheduler`]: up to `W` nodes in flight, processed on
//!   completion

mod asynchronous;
mod serial;
mod synchronous;

use branchbound_core::{Node, Problem};

use crate::error::SolverError;
use crate::executor::{BoundOutcome, Executor};
use crate::scope::{Disposition, SearchScope};

pub use asynchronous::AsynchronousScheduler;
pub use serial::SerialScheduler;
pub use synchronous::SynchronousScheduler;

/// Drives a search until the frontier is exhausted or a budget runs out.
pub trait Scheduler<P: Problem> {
    fn run<E>(&self, scope: &mut SearchScope<'_, P>, executor: &E) -> Result<(), SolverError>
    where
        E: Executor<P> + ?Sized;
}

/// Processes `outcome`, resubmitting and blocking on transport failures.
fn settle<P, E>(
    scope: &mut SearchScope<'_, P>,
    executor: &E,
    mut node: Node<P>,
    mut outcome: BoundOutcome<P>,
) -> Result<Disposition<P>, SolverError>
where
    P: Problem,
    E: Executor<P> + ?Sized,
{
    let mut attempt = 1;
    loop {
        match scope.process(node, outcome, attempt)? {
            Disposition::Retry(retry) => {
                attempt += 1;
                outcome = executor.submit(scope.problem(), &retry).wait();
                node = retry;
            }
            disposition => return Ok(disposition),
        }
    }
}

#[cfg(test)]
mod tests;
