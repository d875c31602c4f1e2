//! Tests for solver configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        scheduler = "synchronous"
        worker_count = { count = 8 }
        batch_size = 16
        node_selection = "depth_first"
        prune_rule = "strict"
        frontier_limit = 100000

        [termination]
        seconds_spent_limit = 30
        evaluation_limit = 5000
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.scheduler, SchedulerType::Synchronous);
    assert_eq!(config.workers(), 8);
    assert_eq!(config.resolved_batch_size(), 16);
    assert_eq!(config.node_selection, NodeSelection::DepthFirst);
    assert_eq!(config.prune_rule, PruneRule::Strict);
    assert_eq!(config.frontier_limit, Some(100_000));
    assert_eq!(config.evaluation_limit(), Some(5000));
    assert!(!config.greedy);
    assert_eq!(config.greedy_gap, DEFAULT_GREEDY_GAP);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        scheduler: asynchronous
        worker_count: auto
        greedy: true
        greedy_gap: 0.25
        termination:
          millis_spent_limit: 250
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.scheduler, SchedulerType::Asynchronous);
    assert_eq!(config.worker_count, WorkerCount::Auto);
    assert!(config.greedy);
    assert_eq!(config.greedy_gap, 0.25);
    assert_eq!(config.time_limit(), Some(Duration::from_millis(250)));
}

#[test]
fn test_defaults() {
    let config = SolverConfig::from_toml_str("").unwrap();
    assert_eq!(config.scheduler, SchedulerType::Serial);
    assert_eq!(config.node_selection, NodeSelection::BestBound);
    assert_eq!(config.prune_rule, PruneRule::NonStrict);
    assert_eq!(config.time_limit(), None);
    assert_eq!(config.evaluation_limit(), None);
    assert_eq!(
        config.poll_interval(),
        Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
    );
    assert!(config.workers() >= 1);
    assert_eq!(config.resolved_batch_size(), config.workers());
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_scheduler(SchedulerType::Asynchronous)
        .with_workers(3)
        .with_greedy(true)
        .with_termination_seconds(60)
        .with_evaluation_limit(10);

    assert_eq!(config.scheduler, SchedulerType::Asynchronous);
    assert_eq!(config.workers(), 3);
    assert!(config.greedy);
    assert_eq!(config.time_limit(), Some(Duration::from_secs(60)));
    assert_eq!(config.evaluation_limit(), Some(10));
}

#[test]
fn test_combined_time_limit() {
    let termination = TerminationConfig {
        seconds_spent_limit: Some(2),
        millis_spent_limit: Some(500),
        evaluation_limit: None,
    };
    assert_eq!(termination.time_limit(), Some(Duration::from_millis(2500)));
    assert_eq!(TerminationConfig::default().time_limit(), None);
}

#[test]
fn test_huge_time_limit_saturates() {
    let config = SolverConfig::from_toml_str(
        r#"
        [termination]
        seconds_spent_limit = 9223372036854775807
        millis_spent_limit = 10
    "#,
    )
    .unwrap();
    assert_eq!(config.time_limit(), Some(Duration::from_millis(u64::MAX)));
}

#[test]
fn test_zero_workers_rejected() {
    let result = SolverConfig::from_toml_str("worker_count = { count = 0 }");
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_negative_gap_rejected() {
    let result = SolverConfig::from_toml_str("greedy_gap = -1.0");
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_zero_batch_rejected() {
    let config = SolverConfig::new().with_batch_size(0);
    assert!(config.validate().is_err());
}

#[test]
fn test_missing_file() {
    let result = SolverConfig::load("/definitely/not/here/branchbound.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_unknown_scheduler_rejected() {
    let result = SolverConfig::from_toml_str(r#"scheduler = "quantum""#);
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}
