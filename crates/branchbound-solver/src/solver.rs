//! Solver entry point.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use branchbound_config::{SchedulerType, SolverConfig};
use branchbound_core::Problem;
use tokio::sync::mpsc;
use tracing::info;

use crate::error::SolverError;
use crate::executor::{Executor, InlineExecutor, PoolExecutor};
use crate::incumbent::{IncumbentUpdate, SharedIncumbent};
use crate::result::SolveResult;
use crate::scheduler::{AsynchronousScheduler, Scheduler, SerialScheduler, SynchronousScheduler};
use crate::scope::SearchScope;
use crate::termination::{self, ExternalTermination, NoTermination, OrTermination, Termination};

/// Branch-and-bound solver for a [`Problem`].
///
/// The scheduler, worker count and budgets come from the [`SolverConfig`];
/// an extra [`Termination`] can be layered on top.
///
/// # Example
///
/// ```
/// use branchbound_config::{SchedulerType, SolverConfig};
/// use branchbound_solver::{Solver, SolveStatus};
/// use branchbound_test::toy_knapsack;
///
/// let config = SolverConfig::new()
///     .with_scheduler(SchedulerType::Asynchronous)
///     .with_workers(2);
/// let result = Solver::new(toy_knapsack()).with_config(config).solve().unwrap();
///
/// assert_eq!(result.status, SolveStatus::Optimal);
/// assert_eq!(result.value, 7.0);
/// ```
pub struct Solver<P: Problem, T = NoTermination> {
    problem: Arc<P>,
    config: SolverConfig,
    termination: T,
    listener: Option<mpsc::UnboundedSender<IncumbentUpdate<P::Solution>>>,
    terminate_early_flag: Arc<AtomicBool>,
    solving: Arc<AtomicBool>,
}

impl<P: Problem> Solver<P> {
    pub fn new(problem: P) -> Self {
        Self::from_arc(Arc::new(problem))
    }

    /// Creates a solver over a problem that is shared elsewhere.
    pub fn from_arc(problem: Arc<P>) -> Self {
        Self {
            problem,
            config: SolverConfig::default(),
            termination: NoTermination,
            listener: None,
            terminate_early_flag: Arc::new(AtomicBool::new(false)),
            solving: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl<P: Problem, T: Termination> Solver<P, T> {
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a termination checked alongside the configured budgets.
    pub fn with_termination<T2: Termination>(self, termination: T2) -> Solver<P, T2> {
        Solver {
            problem: self.problem,
            config: self.config,
            termination,
            listener: self.listener,
            terminate_early_flag: self.terminate_early_flag,
            solving: self.solving,
        }
    }

    /// Streams every incumbent improvement to `sender` while solving.
    pub fn with_incumbent_listener(
        mut self,
        sender: mpsc::UnboundedSender<IncumbentUpdate<P::Solution>>,
    ) -> Self {
        self.listener = Some(sender);
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn problem(&self) -> &Arc<P> {
        &self.problem
    }

    /// Flag that stops the running search when set, from any thread.
    ///
    /// It is cleared at the start of every solve.
    pub fn terminate_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.terminate_early_flag)
    }

    /// Requests early termination. Returns false if no solve is running.
    pub fn terminate_early(&self) -> bool {
        if self.solving.load(Ordering::SeqCst) {
            self.terminate_early_flag.store(true, Ordering::SeqCst);
            true
        } else {
            false
        }
    }

    pub fn is_solving(&self) -> bool {
        self.solving.load(Ordering::SeqCst)
    }

    /// Solves with the executor the configured scheduler calls for.
    ///
    /// Serial search runs on the calling thread; the parallel schedulers
    /// get a pool of the configured number of workers.
    pub fn solve(&self) -> Result<SolveResult<P::Solution>, SolverError> {
        self.config.validate()?;
        match self.config.scheduler {
            SchedulerType::Serial => self.solve_with(&InlineExecutor),
            SchedulerType::Synchronous | SchedulerType::Asynchronous => {
                let executor = PoolExecutor::new(self.config.workers())?;
                self.solve_with(&executor)
            }
        }
    }

    /// Solves with a caller-provided executor.
    ///
    /// The synchronous batch size defaults to, and the asynchronous
    /// in-flight limit equals, `executor.workers()`.
    pub fn solve_with<E>(&self, executor: &E) -> Result<SolveResult<P::Solution>, SolverError>
    where
        E: Executor<P> + ?Sized,
    {
        self.config.validate()?;
        self.terminate_early_flag.store(false, Ordering::SeqCst);
        self.solving.store(true, Ordering::SeqCst);
        let result = self.run(executor);
        self.solving.store(false, Ordering::SeqCst);
        result
    }

    fn run<E>(&self, executor: &E) -> Result<SolveResult<P::Solution>, SolverError>
    where
        E: Executor<P> + ?Sized,
    {
        // Cancellation and time first: while in-flight work drains, an
        // exhausted evaluation budget must not mask them.
        let termination = OrTermination::new((
            ExternalTermination::new(self.terminate_flag()),
            termination::from_config(self.config.termination.as_ref()),
            &self.termination,
        ));

        let incumbent = SharedIncumbent::new(self.problem.sense());
        if let Some(listener) = &self.listener {
            incumbent.set_listener(listener.clone());
        }
        let mut scope = SearchScope::new(Arc::clone(&self.problem), &self.config, incumbent, &termination);

        let workers = executor.workers();
        info!(
            event = "solve_start",
            scheduler = %self.config.scheduler,
            sense = %self.problem.sense(),
            workers,
            greedy = self.config.greedy,
        );

        match self.config.scheduler {
            SchedulerType::Serial => SerialScheduler.run(&mut scope, executor)?,
            SchedulerType::Synchronous => {
                let batch_size = self.config.batch_size.unwrap_or(workers);
                SynchronousScheduler::new(batch_size).run(&mut scope, executor)?
            }
            SchedulerType::Asynchronous => {
                AsynchronousScheduler::new(workers, self.config.poll_interval())
                    .run(&mut scope, executor)?
            }
        }

        Ok(scope.finish())
    }
}

impl<P: Problem, T: fmt::Debug> fmt::Debug for Solver<P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solver")
            .field("config", &self.config)
            .field("termination", &self.termination)
            .finish_non_exhaustive()
    }
}
