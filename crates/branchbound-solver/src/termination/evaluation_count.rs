//! Budget on bound computations.

use super::Termination;
use crate::result::StopReason;
use crate::stats::SearchStats;

/// Terminates once `limit` evaluations have been dispatched.
///
/// A limit of zero stops before the oracle is ever called.
#[derive(Debug, Clone)]
pub struct EvaluationCountTermination {
    limit: u64,
}

impl EvaluationCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl Termination for EvaluationCountTermination {
    fn check(&self, stats: &SearchStats) -> Option<StopReason> {
        (stats.evaluations_dispatched >= self.limit).then_some(StopReason::EvaluationLimit)
    }
}
