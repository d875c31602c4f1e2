//! Search statistics.

use std::time::{Duration, Instant};

/// Counters of one search run.
///
/// Owned by the scheduling thread; terminations read it.
///
/// # Example
///
/// ```
/// use branchbound_solver::SearchStats;
///
/// let mut stats = SearchStats::new();
/// stats.record_dispatch();
/// stats.record_dispatch();
/// stats.record_frontier(5);
/// stats.record_frontier(3);
///
/// assert_eq!(stats.evaluations_dispatched, 2);
/// assert_eq!(stats.max_frontier, 5);
/// ```
#[derive(Debug, Clone)]
pub struct SearchStats {
    start_time: Instant,
    frozen: Option<Duration>,
    /// Bound computations submitted (retries excluded).
    pub evaluations_dispatched: u64,
    /// Bound computations that returned, successfully or not.
    pub evaluations_completed: u64,
    /// Nodes discarded because their bound could not beat the incumbent.
    pub nodes_pruned: u64,
    pub nodes_infeasible: u64,
    /// Terminal nodes whose solution was offered to the incumbent.
    pub nodes_accepted: u64,
    pub nodes_branched: u64,
    pub children_created: u64,
    /// Nodes pruned because no bound could be obtained.
    pub oracle_failures: u64,
    pub retries: u64,
    /// In-flight evaluations dropped on interruption.
    pub abandoned: u64,
    pub incumbent_updates: u64,
    pub max_frontier: usize,
    pub max_in_flight: usize,
}

impl SearchStats {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            frozen: None,
            evaluations_dispatched: 0,
            evaluations_completed: 0,
            nodes_pruned: 0,
            nodes_infeasible: 0,
            nodes_accepted: 0,
            nodes_branched: 0,
            children_created: 0,
            oracle_failures: 0,
            retries: 0,
            abandoned: 0,
            incumbent_updates: 0,
            max_frontier: 0,
            max_in_flight: 0,
        }
    }

    /// Time since the search started, or its total duration once finished.
    pub fn elapsed(&self) -> Duration {
        self.frozen.unwrap_or_else(|| self.start_time.elapsed())
    }

    /// Stops the clock.
    pub fn freeze(&mut self) {
        if self.frozen.is_none() {
            self.frozen = Some(self.start_time.elapsed());
        }
    }

    pub fn record_dispatch(&mut self) {
        self.evaluations_dispatched += 1;
    }

    pub fn record_frontier(&mut self, len: usize) {
        self.max_frontier = self.max_frontier.max(len);
    }

    pub fn record_in_flight(&mut self, len: usize) {
        self.max_in_flight = self.max_in_flight.max(len);
    }

    pub fn evaluations_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.evaluations_completed as f64 / secs
        } else {
            0.0
        }
    }
}

impl Default for SearchStats {
    fn default() -> Self {
        Self::new()
    }
}
