//! Budgets that stop a search early.

mod composite;
mod evaluation_count;
mod external;
mod time;

use std::fmt::Debug;

use branchbound_config::TerminationConfig;

use crate::result::StopReason;
use crate::stats::SearchStats;

pub use composite::OrTermination;
pub use evaluation_count::EvaluationCountTermination;
pub use external::ExternalTermination;
pub use time::TimeTermination;

/// Decides when to stop searching.
///
/// Checked by the scheduler before every dispatch and whenever it wakes up
/// while waiting for results.
pub trait Termination: Send + Sync + Debug {
    /// Returns the reason to stop, or `None` to keep going.
    fn check(&self, stats: &SearchStats) -> Option<StopReason>;
}

impl<T: Termination + ?Sized> Termination for &T {
    fn check(&self, stats: &SearchStats) -> Option<StopReason> {
        (**self).check(stats)
    }
}

/// Never terminates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTermination;

impl Termination for NoTermination {
    fn check(&self, _stats: &SearchStats) -> Option<StopReason> {
        None
    }
}

impl<T: Termination> Termination for Option<T> {
    fn check(&self, stats: &SearchStats) -> Option<StopReason> {
        self.as_ref().and_then(|t| t.check(stats))
    }
}

/// Termination built from a [`TerminationConfig`].
pub type ConfiguredTermination =
    OrTermination<(Option<TimeTermination>, Option<EvaluationCountTermination>)>;

pub fn from_config(config: Option<&TerminationConfig>) -> ConfiguredTermination {
    let time = config.and_then(|c| c.time_limit()).map(TimeTermination::new);
    let evaluations = config
        .and_then(|c| c.evaluation_limit)
        .map(EvaluationCountTermination::new);
    OrTermination::new((time, evaluations))
}

#[cfg(test)]
mod tests;
