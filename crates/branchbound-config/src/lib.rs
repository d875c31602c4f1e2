//! Configuration system for branchbound.
//!
//! Load solver configuration from TOML or YAML files to pick the scheduler,
//! the worker pool and the search budget without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use branchbound_config::{SchedulerType, SolverConfig, WorkerCount};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     scheduler = "asynchronous"
//!     worker_count = { count = 4 }
//!     greedy = true
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!     evaluation_limit = 100000
//! "#).unwrap();
//!
//! assert_eq!(config.scheduler, SchedulerType::Asynchronous);
//! assert_eq!(config.worker_count, WorkerCount::Count(4));
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use branchbound_config::SolverConfig;
//!
//! let config = SolverConfig::load("branchbound.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default relative gap under which greedy mode dives into children.
pub const DEFAULT_GREEDY_GAP: f64 = 0.1;

/// Default interval at which the asynchronous scheduler re-checks its
/// termination while waiting on workers.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 10;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Scheduling strategy used to traverse the search tree.
    #[serde(default)]
    pub scheduler: SchedulerType,

    /// Number of workers evaluating bounds in parallel.
    #[serde(default)]
    pub worker_count: WorkerCount,

    /// Nodes per round of the synchronous scheduler (defaults to the
    /// worker count).
    #[serde(default)]
    pub batch_size: Option<usize>,

    /// Dive into freshly branched children when their parent is close to
    /// the incumbent.
    #[serde(default)]
    pub greedy: bool,

    /// Relative gap between a parent's bound and the incumbent under which
    /// greedy mode dives.
    #[serde(default = "default_greedy_gap")]
    pub greedy_gap: f64,

    /// Frontier ordering.
    #[serde(default)]
    pub node_selection: NodeSelection,

    /// Whether ties with the incumbent are pruned.
    #[serde(default)]
    pub prune_rule: PruneRule,

    /// Maximum number of open nodes before the run fails fast.
    #[serde(default)]
    pub frontier_limit: Option<usize>,

    /// Poll interval of the asynchronous scheduler, in milliseconds.
    #[serde(default)]
    pub poll_interval_ms: Option<u64>,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,
}

fn default_greedy_gap() -> f64 {
    DEFAULT_GREEDY_GAP
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            scheduler: SchedulerType::default(),
            worker_count: WorkerCount::default(),
            batch_size: None,
            greedy: false,
            greedy_gap: DEFAULT_GREEDY_GAP,
            node_selection: NodeSelection::default(),
            prune_rule: PruneRule::default(),
            frontier_limit: None,
            poll_interval_ms: None,
            termination: None,
        }
    }
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count == WorkerCount::Count(0) {
            return Err(ConfigError::Invalid("worker_count must be at least 1".into()));
        }
        if self.batch_size == Some(0) {
            return Err(ConfigError::Invalid("batch_size must be at least 1".into()));
        }
        if !self.greedy_gap.is_finite() || self.greedy_gap < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "greedy_gap must be a finite non-negative number, got {}",
                self.greedy_gap
            )));
        }
        if self.frontier_limit == Some(0) {
            return Err(ConfigError::Invalid("frontier_limit must be at least 1".into()));
        }
        if self.poll_interval_ms == Some(0) {
            return Err(ConfigError::Invalid("poll_interval_ms must be at least 1".into()));
        }
        Ok(())
    }

    /// Sets the scheduler.
    pub fn with_scheduler(mut self, scheduler: SchedulerType) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Sets a fixed worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.worker_count = WorkerCount::Count(workers);
        self
    }

    /// Sets the synchronous batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Enables or disables greedy diving.
    pub fn with_greedy(mut self, greedy: bool) -> Self {
        self.greedy = greedy;
        self
    }

    /// Sets the frontier ordering.
    pub fn with_node_selection(mut self, node_selection: NodeSelection) -> Self {
        self.node_selection = node_selection;
        self
    }

    /// Sets the pruning rule.
    pub fn with_prune_rule(mut self, prune_rule: PruneRule) -> Self {
        self.prune_rule = prune_rule;
        self
    }

    /// Sets the open-node ceiling.
    pub fn with_frontier_limit(mut self, limit: usize) -> Self {
        self.frontier_limit = Some(limit);
        self
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the termination time limit in milliseconds.
    pub fn with_termination_millis(mut self, millis: u64) -> Self {
        self.termination = Some(TerminationConfig {
            millis_spent_limit: Some(millis),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the bound-evaluation budget.
    pub fn with_evaluation_limit(mut self, limit: u64) -> Self {
        self.termination = Some(TerminationConfig {
            evaluation_limit: Some(limit),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// # Examples
    ///
    /// ```
    /// use branchbound_config::SolverConfig;
    /// use std::time::Duration;
    ///
    /// let config = SolverConfig::from_toml_str(r#"
    ///     [termination]
    ///     millis_spent_limit = 1500
    /// "#).unwrap();
    ///
    /// assert_eq!(config.time_limit(), Some(Duration::from_millis(1500)));
    /// ```
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Returns the evaluation budget, if configured.
    pub fn evaluation_limit(&self) -> Option<u64> {
        self.termination.as_ref().and_then(|t| t.evaluation_limit)
    }

    /// Returns the resolved number of workers.
    pub fn workers(&self) -> usize {
        self.worker_count.resolve()
    }

    /// Returns the resolved synchronous batch size.
    pub fn resolved_batch_size(&self) -> usize {
        self.batch_size.unwrap_or_else(|| self.workers()).max(1)
    }

    /// Returns the asynchronous poll interval.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS))
    }
}

/// Scheduling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerType {
    /// Single thread, one node at a time.
    #[default]
    Serial,

    /// Rounds of batch dispatch followed by a barrier.
    Synchronous,

    /// Dynamic in-flight set that keeps every worker busy.
    Asynchronous,
}

impl fmt::Display for SchedulerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerType::Serial => write!(f, "serial"),
            SchedulerType::Synchronous => write!(f, "synchronous"),
            SchedulerType::Asynchronous => write!(f, "asynchronous"),
        }
    }
}

/// Worker count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerCount {
    /// One worker per available CPU core.
    #[default]
    Auto,

    /// Specific number of workers.
    Count(usize),
}

impl WorkerCount {
    /// Resolves the worker count to an actual number.
    pub fn resolve(&self) -> usize {
        match self {
            WorkerCount::Auto => std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(1),
            WorkerCount::Count(n) => (*n).max(1),
        }
    }
}

impl fmt::Display for WorkerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerCount::Auto => write!(f, "auto"),
            WorkerCount::Count(n) => write!(f, "{}", n),
        }
    }
}

/// Frontier ordering policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeSelection {
    /// Best bound first; yields the tightest pruning.
    #[default]
    BestBound,

    /// Deepest node first, ties by bound.
    DepthFirst,

    /// Shallowest node first, ties by bound.
    BreadthFirst,
}

/// Comparison used when pruning against the incumbent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PruneRule {
    /// Prune nodes whose bound ties the incumbent.
    #[default]
    NonStrict,

    /// Keep nodes whose bound ties the incumbent.
    Strict,
}

/// Termination configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving, added to the seconds limit.
    pub millis_spent_limit: Option<u64>,

    /// Maximum number of bound evaluations dispatched to the oracle.
    pub evaluation_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        if self.seconds_spent_limit.is_none() && self.millis_spent_limit.is_none() {
            return None;
        }
        let millis = self
            .seconds_spent_limit
            .unwrap_or(0)
            .saturating_mul(1000)
            .saturating_add(self.millis_spent_limit.unwrap_or(0));
        Some(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests;
