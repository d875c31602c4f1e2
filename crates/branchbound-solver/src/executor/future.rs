//! One-shot handles to pending bound computations.

use std::time::Duration;

use branchbound_core::{Problem, Relaxation};
use crossbeam::channel::{self, Receiver, Select, Sender, TryRecvError};

use crate::error::ExecutorError;

/// Result of evaluating one node.
pub type BoundOutcome<P> = Result<Relaxation<<P as Problem>::Candidate>, ExecutorError>;

/// Handle to a bound computation that may still be running.
///
/// Dropping the future abandons the result; the evaluation itself is not
/// cancelled.
pub struct BoundFuture<P: Problem> {
    receiver: Receiver<BoundOutcome<P>>,
}

impl<P: Problem> BoundFuture<P> {
    /// A future and the sender that resolves it.
    pub fn pending() -> (Sender<BoundOutcome<P>>, Self) {
        let (sender, receiver) = channel::bounded(1);
        (sender, Self { receiver })
    }

    /// An already resolved future.
    pub fn ready(outcome: BoundOutcome<P>) -> Self {
        let (sender, future) = Self::pending();
        // The channel has room for exactly this one message.
        let _ = sender.send(outcome);
        future
    }

    /// Blocks until the result is available.
    pub fn wait(self) -> BoundOutcome<P> {
        self.receiver
            .recv()
            .unwrap_or(Err(ExecutorError::Disconnected))
    }

    /// Returns the result if it is available.
    ///
    /// A taken result is consumed; a later [`wait`](Self::wait) reports
    /// [`ExecutorError::Disconnected`].
    pub fn try_take(&self) -> Option<BoundOutcome<P>> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ExecutorError::Disconnected)),
        }
    }
}

/// Blocks until one of `futures` resolves or `timeout` elapses.
///
/// Returns the index of a future that looks resolved, or `None` on timeout
/// or when there is nothing to wait for. Readiness can be spurious, so
/// callers should take the result with [`BoundFuture::try_take`].
pub fn wait_any<'a, P, I>(futures: I, timeout: Duration) -> Option<usize>
where
    P: Problem,
    I: IntoIterator<Item = &'a BoundFuture<P>>,
{
    let mut select = Select::new();
    let mut count = 0;
    for future in futures {
        select.recv(&future.receiver);
        count += 1;
    }
    if count == 0 {
        return None;
    }
    select.ready_timeout(timeout).ok()
}
