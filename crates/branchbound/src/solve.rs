//! Solver entry points that hide the wiring.

use branchbound_config::SolverConfig;
use branchbound_core::Problem;
use branchbound_solver::{Executor, SolveResult, Solver, SolverError};
use tracing::debug;

/// Configuration file picked up by [`run`].
pub const CONFIG_FILE: &str = "branchbound.toml";

/// Loads [`CONFIG_FILE`] from the working directory, falling back to the
/// defaults when it is missing or invalid.
pub fn load_config() -> SolverConfig {
    SolverConfig::load(CONFIG_FILE).unwrap_or_else(|e| {
        debug!(error = %e, file = CONFIG_FILE, "Using default configuration");
        SolverConfig::default()
    })
}

/// Solves `problem` with the scheduler and executor `config` selects.
pub fn solve<P: Problem>(
    problem: P,
    config: &SolverConfig,
) -> Result<SolveResult<P::Solution>, SolverError> {
    #[cfg(feature = "console")]
    crate::console::init();

    Solver::new(problem).with_config(config.clone()).solve()
}

/// Solves `problem` on a caller-provided executor.
pub fn solve_with<P, E>(
    problem: P,
    config: &SolverConfig,
    executor: &E,
) -> Result<SolveResult<P::Solution>, SolverError>
where
    P: Problem,
    E: Executor<P> + ?Sized,
{
    #[cfg(feature = "console")]
    crate::console::init();

    Solver::new(problem)
        .with_config(config.clone())
        .solve_with(executor)
}

/// Solves `problem` with the configuration from [`load_config`].
pub fn run<P: Problem>(problem: P) -> Result<SolveResult<P::Solution>, SolverError> {
    solve(problem, &load_config())
}

#[cfg(test)]
mod tests {
    use super::*;
    use branchbound_solver::{InlineExecutor, SolveStatus};
    use branchbound_test::{infeasible_knapsack, toy_knapsack};

    #[test]
    fn test_solve_reports_optimum() {
        let result = solve(toy_knapsack(), &SolverConfig::default()).unwrap();
        assert_eq!(result.status, SolveStatus::Optimal);
        assert_eq!(result.value, 7.0);
    }

    #[test]
    fn test_solve_with_inline_executor() {
        let result = solve_with(infeasible_knapsack(), &SolverConfig::default(), &InlineExecutor).unwrap();
        assert_eq!(result.status, SolveStatus::Infeasible);
    }

    #[test]
    fn test_run_without_config_file_uses_defaults() {
        let result = run(toy_knapsack()).unwrap();
        assert_eq!(result.value, 7.0);
    }
}
