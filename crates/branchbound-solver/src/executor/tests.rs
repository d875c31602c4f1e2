use std::sync::Arc;
use std::time::Duration;

use branchbound_core::{Node, OracleError};
use branchbound_milp::{IntegerProgram, Knapsack};
use branchbound_test::{toy_knapsack, toy_relaxation, FailingOracle, PanickingOracle, SlowOracle};

use super::*;

#[test]
fn test_inline_future_resolves_immediately() {
    let problem = Arc::new(toy_knapsack());
    let root = Node::root(problem.as_ref());
    let future = InlineExecutor.submit(&problem, &root);
    let outcome = future.try_take().unwrap();
    assert_eq!(outcome.unwrap().bound, 7.0);
    assert!(matches!(future.wait(), Err(ExecutorError::Disconnected)));
}

#[test]
fn test_pool_evaluates_on_worker() {
    let problem = Arc::new(toy_knapsack());
    let executor = PoolExecutor::new(2).unwrap();
    assert_eq!(Executor::<Knapsack>::workers(&executor), 2);

    let root = Node::root(problem.as_ref());
    let relaxation = executor.submit(&problem, &root).wait().unwrap();
    assert_eq!(relaxation.candidate.unwrap().point, vec![1.0, 1.0, 0.0, 0.0]);
}

#[test]
fn test_panic_becomes_worker_lost() {
    let problem = Arc::new(IntegerProgram::new(PanickingOracle::always(toy_relaxation())));
    let root = Node::root(problem.as_ref());

    let inline = InlineExecutor.submit(&problem, &root).wait();
    assert!(matches!(inline, Err(ExecutorError::WorkerLost(ref msg)) if msg.contains("injected")));

    let pool = PoolExecutor::new(1).unwrap();
    let pooled = pool.submit(&problem, &root).wait();
    assert!(matches!(pooled, Err(ExecutorError::WorkerLost(_))));

    // The worker survives the panic.
    let again = pool.submit(&problem, &root).wait();
    assert!(matches!(again, Err(ExecutorError::WorkerLost(_))));
}

#[test]
fn test_oracle_error_is_reported() {
    let problem = Arc::new(IntegerProgram::new(FailingOracle::always(toy_relaxation())));
    let root = Node::root(problem.as_ref());
    let outcome = InlineExecutor.submit(&problem, &root).wait();
    assert_eq!(
        outcome.unwrap_err(),
        ExecutorError::Oracle(OracleError::Inconclusive("iteration limit".into()))
    );
}

#[test]
fn test_dropped_sender_is_disconnected() {
    let (sender, future) = BoundFuture::<Knapsack>::pending();
    assert!(future.try_take().is_none());
    drop(sender);
    assert!(matches!(future.try_take(), Some(Err(ExecutorError::Disconnected))));
}

#[test]
fn test_wait_any_times_out_then_resolves() {
    let problem = Arc::new(IntegerProgram::new(SlowOracle::new(
        toy_relaxation(),
        Duration::from_millis(200),
    )));
    let executor = PoolExecutor::new(2).unwrap();
    let root = Node::root(problem.as_ref());
    let mut futures = vec![
        executor.submit(&problem, &root),
        executor.submit(&problem, &root),
    ];

    assert_eq!(wait_any(&futures, Duration::from_millis(1)), None);
    let index = wait_any(&futures, Duration::from_secs(10)).unwrap();
    assert!(index < 2);
    assert_eq!(futures.swap_remove(index).wait().unwrap().bound, 7.0);
}

#[test]
fn test_wait_any_on_nothing() {
    let futures: Vec<BoundFuture<Knapsack>> = Vec::new();
    assert_eq!(wait_any(&futures, Duration::from_millis(1)), None);
}

#[test]
fn test_transport_classification() {
    assert!(ExecutorError::WorkerLost("x".into()).is_transport());
    assert!(ExecutorError::Disconnected.is_transport());
    assert!(!ExecutorError::Oracle(OracleError::Failed("x".into())).is_transport());
}
