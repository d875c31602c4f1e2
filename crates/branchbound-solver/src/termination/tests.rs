use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use branchbound_config::TerminationConfig;

use super::*;

#[test]
fn test_time_termination() {
    let stats = SearchStats::new();
    assert_eq!(TimeTermination::millis(0).check(&stats), Some(StopReason::TimeLimit));
    assert_eq!(TimeTermination::seconds(3600).check(&stats), None);
}

#[test]
fn test_evaluation_count_termination() {
    let term = EvaluationCountTermination::new(2);
    let mut stats = SearchStats::new();
    assert_eq!(term.check(&stats), None);
    stats.record_dispatch();
    assert_eq!(term.check(&stats), None);
    stats.record_dispatch();
    assert_eq!(term.check(&stats), Some(StopReason::EvaluationLimit));
}

#[test]
fn test_zero_evaluation_budget_stops_immediately() {
    let term = EvaluationCountTermination::new(0);
    assert_eq!(term.check(&SearchStats::new()), Some(StopReason::EvaluationLimit));
}

#[test]
fn test_external_termination() {
    let flag = Arc::new(AtomicBool::new(false));
    let term = ExternalTermination::new(flag.clone());
    let stats = SearchStats::new();
    assert_eq!(term.check(&stats), None);
    flag.store(true, Ordering::SeqCst);
    assert_eq!(term.check(&stats), Some(StopReason::Cancelled));
}

#[test]
fn test_or_termination_reports_first_reason() {
    let flag = Arc::new(AtomicBool::new(true));
    let term = OrTermination::new((
        EvaluationCountTermination::new(0),
        ExternalTermination::new(flag),
    ));
    assert_eq!(term.check(&SearchStats::new()), Some(StopReason::EvaluationLimit));

    let term = OrTermination::new((NoTermination, TimeTermination::millis(0)));
    assert_eq!(term.check(&SearchStats::new()), Some(StopReason::TimeLimit));
}

#[test]
fn test_option_termination() {
    let none: Option<TimeTermination> = None;
    assert_eq!(none.check(&SearchStats::new()), None);
    let some = Some(TimeTermination::new(Duration::ZERO));
    assert_eq!(some.check(&SearchStats::new()), Some(StopReason::TimeLimit));
}

#[test]
fn test_from_config() {
    assert_eq!(from_config(None).check(&SearchStats::new()), None);

    let config = TerminationConfig {
        evaluation_limit: Some(0),
        ..TerminationConfig::default()
    };
    assert_eq!(
        from_config(Some(&config)).check(&SearchStats::new()),
        Some(StopReason::EvaluationLimit)
    );

    let config = TerminationConfig {
        seconds_spent_limit: Some(3600),
        ..TerminationConfig::default()
    };
    assert_eq!(from_config(Some(&config)).check(&SearchStats::new()), None);
}
