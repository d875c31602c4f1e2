//! Solves 0/1 knapsack instances from the command line.

mod args;

use std::process::ExitCode;

use branchbound::milp::{Knapsack, MilpError};
use branchbound::{ConfigError, SolveStatus, Solver, SolverConfig, SolverError};
use clap::Parser;
use thiserror::Error;
use tracing::debug;

use args::Cli;

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Model(#[from] MilpError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Solver(#[from] SolverError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(status) => ExitCode::from(exit_status(&status)),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<SolveStatus, CliError> {
    let config = build_config(cli)?;
    let problem = build_problem(cli)?;
    debug!(items = cli.weights.len(), capacity = cli.capacity, "Parsed instance");

    let result = if cli.quiet {
        Solver::new(problem).with_config(config).solve()?
    } else {
        branchbound::solve(problem, &config)?
    };

    match &result.solution {
        Some(solution) => {
            println!("status: {}", result.status);
            println!("value: {}", result.value);
            println!("items: {:?}", Knapsack::selected_items(solution));
        }
        None => println!("status: {} (no packing found)", result.status),
    }
    println!(
        "evaluations: {} | pruned: {} | open nodes: {}",
        result.stats.evaluations_completed, result.stats.nodes_pruned, result.open_nodes
    );

    Ok(result.status)
}

fn build_problem(cli: &Cli) -> Result<Knapsack, MilpError> {
    if cli.minimize {
        Knapsack::minimizing(&cli.weights, &cli.values, cli.capacity)
    } else {
        Knapsack::maximizing(&cli.weights, &cli.values, cli.capacity)
    }
}

/// Layers command-line overrides on top of the file configuration.
fn build_config(cli: &Cli) -> Result<SolverConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) if path.extension().is_some_and(|e| e == "yaml" || e == "yml") => {
            SolverConfig::from_yaml_file(path)?
        }
        Some(path) => SolverConfig::load(path)?,
        None => branchbound::load_config(),
    };

    if let Some(scheduler) = cli.scheduler {
        config = config.with_scheduler(scheduler.into());
    }
    if let Some(workers) = cli.workers {
        config = config.with_workers(workers);
    }
    if let Some(batch) = cli.batch {
        config = config.with_batch_size(batch);
    }
    if cli.greedy {
        config = config.with_greedy(true);
    }
    if let Some(ms) = cli.time_limit_ms {
        config = config.with_termination_millis(ms);
    }
    if let Some(limit) = cli.max_evaluations {
        config = config.with_evaluation_limit(limit);
    }

    config.validate()?;
    Ok(config)
}

/// 0 for proven outcomes, 2 when a limit stopped the search, 3 when
/// oracle failures left subtrees unexplored.
fn exit_status(status: &SolveStatus) -> u8 {
    match status {
        SolveStatus::Optimal | SolveStatus::Infeasible => 0,
        SolveStatus::Exhausted(_) => 2,
        SolveStatus::Degraded => 3,
    }
}
