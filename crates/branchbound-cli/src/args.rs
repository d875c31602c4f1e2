use std::path::PathBuf;

use branchbound::SchedulerType;
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "branchbound", version, about = "Solve a 0/1 knapsack by parallel branch-and-bound")]
pub struct Cli {
    /// Item weights, comma separated.
    #[arg(long, value_delimiter = ',', required = true, num_args = 1..)]
    pub weights: Vec<f64>,

    /// Item values, comma separated.
    #[arg(long, value_delimiter = ',', required = true, num_args = 1..)]
    pub values: Vec<f64>,

    /// Knapsack capacity.
    #[arg(long)]
    pub capacity: f64,

    /// Minimize value instead of maximizing it.
    #[arg(long)]
    pub minimize: bool,

    #[arg(long, value_enum)]
    pub scheduler: Option<SchedulerChoice>,

    /// Worker threads (default: one per core).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Nodes dispatched per synchronous round.
    #[arg(long)]
    pub batch: Option<usize>,

    /// Dive into children near the incumbent.
    #[arg(long)]
    pub greedy: bool,

    #[arg(long)]
    pub time_limit_ms: Option<u64>,

    #[arg(long)]
    pub max_evaluations: Option<u64>,

    /// TOML or YAML solver configuration; defaults to ./branchbound.toml.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip the console banner and progress lines.
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerChoice {
    Serial,
    #[value(alias = "sync")]
    Synchronous,
    #[value(alias = "async")]
    Asynchronous,
}

impl From<SchedulerChoice> for SchedulerType {
    fn from(choice: SchedulerChoice) -> Self {
        match choice {
            SchedulerChoice::Serial => SchedulerType::Serial,
            SchedulerChoice::Synchronous => SchedulerType::Synchronous,
            SchedulerChoice::Asynchronous => SchedulerType::Asynchronous,
        }
    }
}
