//! The incumbent: best solution found so far.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use branchbound_config::PruneRule;
use branchbound_core::Sense;
use tokio::sync::mpsc;

/// One strict improvement of the incumbent.
#[derive(Debug, Clone, PartialEq)]
pub struct IncumbentUpdate<S> {
    pub value: f64,
    pub solution: S,
    /// Time since the search started.
    pub elapsed: Duration,
    /// Evaluations dispatched when the solution was found.
    pub evaluations: u64,
}

struct IncumbentState<S> {
    best_value: f64,
    best_solution: Option<S>,
    history: Vec<IncumbentUpdate<S>>,
    listener: Option<mpsc::UnboundedSender<IncumbentUpdate<S>>>,
}

/// Thread-safe incumbent shared by the scheduler and any observers.
///
/// The value starts at the sense's worst value and only ever improves
/// strictly. Cloning yields another handle to the same incumbent.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use branchbound_config::PruneRule;
/// use branchbound_core::Sense;
/// use branchbound_solver::SharedIncumbent;
///
/// let incumbent = SharedIncumbent::new(Sense::Maximize);
/// assert!(incumbent.offer(5.0, "a", Duration::ZERO, 1));
/// assert!(!incumbent.offer(5.0, "b", Duration::ZERO, 2));
/// assert!(incumbent.offer(6.0, "c", Duration::ZERO, 3));
///
/// assert_eq!(incumbent.best_value(), 6.0);
/// assert!(incumbent.prunes(6.0, PruneRule::NonStrict));
/// assert!(!incumbent.prunes(6.0, PruneRule::Strict));
/// ```
pub struct SharedIncumbent<S> {
    sense: Sense,
    state: Arc<Mutex<IncumbentState<S>>>,
}

impl<S: Clone> SharedIncumbent<S> {
    pub fn new(sense: Sense) -> Self {
        Self {
            sense,
            state: Arc::new(Mutex::new(IncumbentState {
                best_value: sense.worst(),
                best_solution: None,
                history: Vec::new(),
                listener: None,
            })),
        }
    }

    /// Streams every future improvement to `sender`.
    pub fn set_listener(&self, sender: mpsc::UnboundedSender<IncumbentUpdate<S>>) {
        self.lock().listener = Some(sender);
    }

    fn lock(&self) -> MutexGuard<'_, IncumbentState<S>> {
        // Updates under the guard never leave the state torn.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// Replaces the incumbent if `value` is strictly better.
    ///
    /// Returns true on improvement.
    pub fn offer(&self, value: f64, solution: S, elapsed: Duration, evaluations: u64) -> bool {
        let mut state = self.lock();
        if !self.sense.is_better(value, state.best_value) {
            return false;
        }

        let update = IncumbentUpdate {
            value,
            solution: solution.clone(),
            elapsed,
            evaluations,
        };
        state.best_value = value;
        state.best_solution = Some(solution);
        if let Some(listener) = &state.listener {
            if listener.send(update.clone()).is_err() {
                state.listener = None;
            }
        }
        state.history.push(update);
        true
    }

    pub fn best_value(&self) -> f64 {
        self.lock().best_value
    }

    pub fn best_solution(&self) -> Option<S> {
        self.lock().best_solution.clone()
    }

    pub fn has_solution(&self) -> bool {
        self.lock().best_solution.is_some()
    }

    pub fn snapshot(&self) -> (f64, Option<S>) {
        let state = self.lock();
        (state.best_value, state.best_solution.clone())
    }

    pub fn history(&self) -> Vec<IncumbentUpdate<S>> {
        self.lock().history.clone()
    }

    /// Returns true if a subtree with `bound` cannot contain a better solution.
    pub fn prunes(&self, bound: f64, rule: PruneRule) -> bool {
        prunes(self.sense, bound, self.best_value(), rule)
    }
}

/// Pruning test shared by every scheduler.
///
/// Minimizing, `NonStrict` prunes iff `bound >= best` and `Strict` iff
/// `bound > best`; maximizing is mirrored.
pub fn prunes(sense: Sense, bound: f64, best: f64, rule: PruneRule) -> bool {
    match rule {
        PruneRule::NonStrict => !sense.is_better(bound, best),
        PruneRule::Strict => sense.is_better(best, bound),
    }
}

impl<S> Clone for SharedIncumbent<S> {
    fn clone(&self) -> Self {
        Self {
            sense: self.sense,
            state: Arc::clone(&self.state),
        }
    }
}

impl<S> fmt::Debug for SharedIncumbent<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedIncumbent")
            .field("sense", &self.sense)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_starts_at_worst() {
        let incumbent: SharedIncumbent<()> = SharedIncumbent::new(Sense::Minimize);
        assert_eq!(incumbent.best_value(), f64::INFINITY);
        assert!(!incumbent.has_solution());
        assert!(incumbent.history().is_empty());
    }

    #[test]
    fn test_never_regresses() {
        let incumbent = SharedIncumbent::new(Sense::Minimize);
        assert!(incumbent.offer(10.0, 1, Duration::ZERO, 0));
        assert!(!incumbent.offer(12.0, 2, Duration::ZERO, 0));
        assert!(incumbent.offer(8.0, 3, Duration::ZERO, 0));
        assert_eq!(incumbent.snapshot(), (8.0, Some(3)));
        let values: Vec<f64> = incumbent.history().iter().map(|u| u.value).collect();
        assert_eq!(values, vec![10.0, 8.0]);
    }

    #[test]
    fn test_prune_rules_minimize() {
        assert!(prunes(Sense::Minimize, 5.0, 5.0, PruneRule::NonStrict));
        assert!(!prunes(Sense::Minimize, 5.0, 5.0, PruneRule::Strict));
        assert!(prunes(Sense::Minimize, 6.0, 5.0, PruneRule::Strict));
        assert!(!prunes(Sense::Minimize, 4.0, 5.0, PruneRule::NonStrict));
    }

    #[test]
    fn test_prune_rules_maximize() {
        assert!(prunes(Sense::Maximize, 5.0, 5.0, PruneRule::NonStrict));
        assert!(!prunes(Sense::Maximize, 5.0, 5.0, PruneRule::Strict));
        assert!(prunes(Sense::Maximize, 4.0, 5.0, PruneRule::Strict));
        assert!(!prunes(Sense::Maximize, 6.0, 5.0, PruneRule::NonStrict));
    }

    #[test]
    fn test_empty_incumbent_prunes_only_infeasible() {
        let incumbent: SharedIncumbent<()> = SharedIncumbent::new(Sense::Maximize);
        assert!(!incumbent.prunes(1e300, PruneRule::NonStrict));
        assert!(incumbent.prunes(f64::NEG_INFINITY, PruneRule::NonStrict));
    }

    #[test]
    fn test_listener_receives_updates() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let incumbent = SharedIncumbent::new(Sense::Maximize);
        incumbent.set_listener(tx);
        incumbent.offer(1.0, "x", Duration::ZERO, 1);
        incumbent.offer(0.5, "y", Duration::ZERO, 2);
        incumbent.offer(2.0, "z", Duration::ZERO, 3);

        assert_eq!(rx.try_recv().unwrap().solution, "x");
        assert_eq!(rx.try_recv().unwrap().solution, "z");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_concurrent_offers_keep_best() {
        let incumbent = SharedIncumbent::new(Sense::Minimize);
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let incumbent = incumbent.clone();
                thread::spawn(move || {
                    for v in 0..100 {
                        incumbent.offer((i * 100 + v) as f64, i, Duration::ZERO, 0);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(incumbent.best_value(), 0.0);
        let history = incumbent.history();
        assert!(history.windows(2).all(|w| w[1].value < w[0].value));
    }
}
