//! Oracle wrappers for counting calls and injecting faults.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use branchbound_core::{OracleError, OracleStatus, Sense};
use branchbound_milp::{OracleSolution, RelaxationOracle, VariableBounds};

/// Shared counter of oracle invocations.
#[derive(Debug, Clone, Default)]
pub struct CallCount(Arc<AtomicUsize>);

impl CallCount {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn increment(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

macro_rules! delegate_model {
    () => {
        fn sense(&self) -> Sense {
            self.inner.sense()
        }

        fn variable_count(&self) -> usize {
            self.inner.variable_count()
        }

        fn integer_variables(&self) -> Vec<usize> {
            self.inner.integer_variables()
        }

        fn base_bounds(&self) -> VariableBounds {
            self.inner.base_bounds()
        }
    };
}

/// Counts every call to [`RelaxationOracle::solve`].
pub struct CountingOracle<O> {
    inner: O,
    calls: CallCount,
}

impl<O> CountingOracle<O> {
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            calls: CallCount::default(),
        }
    }

    /// Handle that keeps counting after the oracle is moved into a solver.
    pub fn calls(&self) -> CallCount {
        self.calls.clone()
    }
}

impl<O: RelaxationOracle> RelaxationOracle for CountingOracle<O> {
    delegate_model!();

    fn solve(&self, bounds: &VariableBounds) -> Result<OracleSolution, OracleError> {
        self.calls.increment();
        self.inner.solve(bounds)
    }
}

/// Panics on the first `failures` calls, then delegates.
///
/// Simulates a worker that dies mid-evaluation.
pub struct PanickingOracle<O> {
    inner: O,
    failures: usize,
    calls: CallCount,
}

impl<O> PanickingOracle<O> {
    pub fn new(inner: O, failures: usize) -> Self {
        Self {
            inner,
            failures,
            calls: CallCount::default(),
        }
    }

    /// Panics on every call.
    pub fn always(inner: O) -> Self {
        Self::new(inner, usize::MAX)
    }

    pub fn calls(&self) -> CallCount {
        self.calls.clone()
    }
}

impl<O: RelaxationOracle> RelaxationOracle for PanickingOracle<O> {
    delegate_model!();

    fn solve(&self, bounds: &VariableBounds) -> Result<OracleSolution, OracleError> {
        if self.calls.increment() < self.failures {
            panic!("injected oracle crash");
        }
        self.inner.solve(bounds)
    }
}

/// Reports an inconclusive status whenever `predicate` holds for the bounds.
pub struct FailingOracle<O> {
    inner: O,
    predicate: Box<dyn Fn(&VariableBounds) -> bool + Send + Sync>,
}

impl<O> FailingOracle<O> {
    pub fn new<F>(inner: O, predicate: F) -> Self
    where
        F: Fn(&VariableBounds) -> bool + Send + Sync + 'static,
    {
        Self {
            inner,
            predicate: Box::new(predicate),
        }
    }

    /// Fails every solve.
    pub fn always(inner: O) -> Self {
        Self::new(inner, |_| true)
    }
}

impl<O: RelaxationOracle> RelaxationOracle for FailingOracle<O> {
    delegate_model!();

    fn solve(&self, bounds: &VariableBounds) -> Result<OracleSolution, OracleError> {
        if (self.predicate)(bounds) {
            return Ok(OracleSolution {
                status: OracleStatus::Other("iteration limit".into()),
                objective: f64::NAN,
                values: Vec::new(),
            });
        }
        self.inner.solve(bounds)
    }
}

/// Sleeps before every solve.
pub struct SlowOracle<O> {
    inner: O,
    delay: Duration,
}

impl<O> SlowOracle<O> {
    pub fn new(inner: O, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

impl<O: RelaxationOracle> RelaxationOracle for SlowOracle<O> {
    delegate_model!();

    fn solve(&self, bounds: &VariableBounds) -> Result<OracleSolution, OracleError> {
        thread::sleep(self.delay);
        self.inner.solve(bounds)
    }
}
