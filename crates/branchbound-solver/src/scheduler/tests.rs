use std::sync::Arc;

use branchbound_config::{NodeSelection, PruneRule, SchedulerType, SolverConfig};
use branchbound_core::{Node, Problem};
use branchbound_milp::Knapsack;
use branchbound_test::knapsack::TOY_ITEMS;
use branchbound_test::{
    best_packing, best_packing_within, infeasible_knapsack, random_instance, toy_knapsack,
    toy_knapsack_minimizing, TOY_OPTIMUM,
};
use proptest::prelude::*;

use super::*;
use crate::executor::{BoundFuture, BoundOutcome, Executor, InlineExecutor, PoolExecutor};
use crate::incumbent::SharedIncumbent;
use crate::result::SolveStatus;
use crate::termination::NoTermination;
use crate::Solver;

const SCHEDULERS: [SchedulerType; 3] = [
    SchedulerType::Serial,
    SchedulerType::Synchronous,
    SchedulerType::Asynchronous,
];

fn config(scheduler: SchedulerType) -> SolverConfig {
    SolverConfig::new().with_scheduler(scheduler).with_workers(3)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_toy_knapsack_all_schedulers() {
    for scheduler in SCHEDULERS {
        for greedy in [false, true] {
            let result = Solver::new(toy_knapsack())
                .with_config(config(scheduler).with_greedy(greedy))
                .solve()
                .unwrap();
            assert_eq!(result.status, SolveStatus::Optimal, "{}", scheduler);
            assert_eq!(result.value, TOY_OPTIMUM);
            let solution = result.solution.unwrap();
            assert_eq!(Knapsack::selected_items(&solution), TOY_ITEMS.to_vec());
            assert_eq!(result.open_nodes, 0);
        }
    }
}

#[test]
fn test_infeasible_knapsack_all_schedulers() {
    for scheduler in SCHEDULERS {
        let result = Solver::new(infeasible_knapsack())
            .with_config(config(scheduler))
            .solve()
            .unwrap();
        assert_eq!(result.status, SolveStatus::Infeasible, "{}", scheduler);
        assert!(result.solution.is_none());
        assert_eq!(result.value, f64::NEG_INFINITY);
        assert!(!result.is_proven_optimal());
        assert_eq!(result.stats.nodes_infeasible, 1);
    }
}

#[test]
fn test_minimizing_twin_reaches_negated_optimum() {
    for scheduler in SCHEDULERS {
        let result = Solver::new(toy_knapsack_minimizing())
            .with_config(config(scheduler))
            .solve()
            .unwrap();
        assert_eq!(result.status, SolveStatus::Optimal);
        assert_eq!(result.value, -TOY_OPTIMUM);
    }

    let instance = random_instance(11, 8);
    let problem = instance.relaxation().minimizing().into_program();
    let result = Solver::new(problem)
        .with_config(config(SchedulerType::Asynchronous))
        .solve()
        .unwrap();
    assert_close(result.value, -instance.optimum());
}

#[test]
fn test_seeded_instances_match_brute_force() {
    let selections = [
        NodeSelection::BestBound,
        NodeSelection::DepthFirst,
        NodeSelection::BreadthFirst,
    ];
    for seed in 0..12 {
        let instance = random_instance(seed, 6 + (seed as usize % 5));
        let optimum = instance.optimum();
        for scheduler in SCHEDULERS {
            let selection = selections[seed as usize % selections.len()];
            let greedy = seed % 2 == 0;
            let result = Solver::new(instance.to_problem())
                .with_config(
                    config(scheduler)
                        .with_node_selection(selection)
                        .with_greedy(greedy),
                )
                .solve()
                .unwrap();
            assert_eq!(result.status, SolveStatus::Optimal);
            assert_close(result.value, optimum);

            let solution = result.solution.unwrap();
            let items = Knapsack::selected_items(&solution);
            let weight: f64 = items.iter().map(|&i| instance.weights[i]).sum();
            let value: f64 = items.iter().map(|&i| instance.values[i]).sum();
            assert!(weight <= instance.capacity);
            assert_close(value, optimum);
        }
    }
}

#[test]
fn test_every_bound_covers_its_subtree() {
    let mut checked = 0;
    for seed in 0..30 {
        let instance = random_instance(seed, 7);
        let problem = instance.to_problem();
        let mut open = vec![Node::root(&problem)];

        while let Some(node) = open.pop() {
            let relaxation = problem.compute_bound(&node).unwrap();
            let node = node.with_relaxation(relaxation);
            let bounds = problem.bounds_at(&node);
            let subtree = best_packing_within(
                &instance.weights,
                &instance.values,
                instance.capacity,
                &bounds,
            );
            checked += 1;

            match subtree {
                Some((optimum, _)) => {
                    let bound = node.bound().unwrap();
                    assert!(
                        bound >= optimum - 1e-9,
                        "seed {}: bound {} below subtree optimum {}",
                        seed,
                        bound,
                        optimum
                    );
                }
                None => assert!(node.is_infeasible(), "seed {}: empty subtree not infeasible", seed),
            }

            if !node.is_infeasible() && !problem.terminal(&node) {
                for which in 0..problem.separate(&node) {
                    open.push(problem.make_child(&node, which).unwrap());
                }
            }
        }
    }
    assert!(checked > 30);
}

#[test]
fn test_strict_pruning_finds_same_optimum() {
    let instance = random_instance(5, 10);
    for scheduler in SCHEDULERS {
        let result = Solver::new(instance.to_problem())
            .with_config(config(scheduler).with_prune_rule(PruneRule::Strict))
            .solve()
            .unwrap();
        assert_close(result.value, instance.optimum());
    }
}

#[test]
fn test_incumbent_history_is_monotonic() {
    for seed in 20..26 {
        let instance = random_instance(seed, 12);
        for scheduler in SCHEDULERS {
            let result = Solver::new(instance.to_problem())
                .with_config(config(scheduler).with_greedy(true))
                .solve()
                .unwrap();
            assert!(!result.history.is_empty());
            assert!(result.history.windows(2).all(|w| w[1].value > w[0].value));
            assert!(result
                .history
                .windows(2)
                .all(|w| w[1].evaluations >= w[0].evaluations));
            assert_eq!(result.history.last().map(|u| u.value), Some(result.value));
            assert_eq!(result.stats.incumbent_updates, result.history.len() as u64);
        }
    }
}

#[test]
fn test_synchronous_search_is_deterministic() {
    let instance = random_instance(3, 14);
    let run = || {
        Solver::new(instance.to_problem())
            .with_config(config(SchedulerType::Synchronous).with_batch_size(4))
            .solve()
            .unwrap()
    };
    let first = run();
    let second = run();
    assert_eq!(
        first.stats.evaluations_dispatched,
        second.stats.evaluations_dispatched
    );
    let values = |r: &crate::SolveResult<Vec<f64>>| -> Vec<f64> {
        r.history.iter().map(|u| u.value).collect()
    };
    assert_eq!(values(&first), values(&second));
    assert_eq!(first.solution, second.solution);
}

#[test]
fn test_batch_of_one_matches_serial() {
    let instance = random_instance(8, 12);
    let serial = Solver::new(instance.to_problem())
        .with_config(config(SchedulerType::Serial))
        .solve()
        .unwrap();
    let synchronous = Solver::new(instance.to_problem())
        .with_config(config(SchedulerType::Synchronous).with_batch_size(1))
        .solve()
        .unwrap();
    assert_eq!(
        serial.stats.evaluations_dispatched,
        synchronous.stats.evaluations_dispatched
    );
    assert_eq!(serial.solution, synchronous.solution);
}

#[test]
fn test_asynchronous_keeps_workers_busy() {
    let instance = random_instance(13, 14);
    let executor = PoolExecutor::new(4).unwrap();
    let result = Solver::new(instance.to_problem())
        .with_config(config(SchedulerType::Asynchronous))
        .solve_with(&executor)
        .unwrap();
    assert_close(result.value, instance.optimum());
    assert!(result.stats.max_in_flight <= 4);
    assert!(result.stats.max_in_flight >= 1);
}

#[test]
fn test_schedulers_run_on_inline_executor() {
    let problem = Arc::new(toy_knapsack());
    let termination = NoTermination;
    let config = SolverConfig::default();

    let mut scope = SearchScope::new(
        Arc::clone(&problem),
        &config,
        SharedIncumbent::new(problem.sense()),
        &termination,
    );
    AsynchronousScheduler::new(2, config.poll_interval())
        .run(&mut scope, &InlineExecutor)
        .unwrap();
    assert_eq!(scope.finish().value, TOY_OPTIMUM);

    let mut scope = SearchScope::new(
        Arc::clone(&problem),
        &config,
        SharedIncumbent::new(problem.sense()),
        &termination,
    );
    SynchronousScheduler::new(3)
        .run(&mut scope, &InlineExecutor)
        .unwrap();
    assert_eq!(scope.finish().value, TOY_OPTIMUM);
}

/// Accepts submissions and never resolves them.
#[derive(Default)]
struct StalledExecutor {
    pending: std::sync::Mutex<Vec<crossbeam::channel::Sender<BoundOutcome<Knapsack>>>>,
}

impl Executor<Knapsack> for StalledExecutor {
    fn workers(&self) -> usize {
        2
    }

    fn submit(&self, _problem: &Arc<Knapsack>, _node: &Node<Knapsack>) -> BoundFuture<Knapsack> {
        let (sender, future) = BoundFuture::pending();
        self.pending.lock().unwrap().push(sender);
        future
    }
}

#[test]
fn test_asynchronous_notices_time_limit_while_workers_stall() {
    let executor = StalledExecutor::default();
    let started = std::time::Instant::now();
    let result = Solver::new(toy_knapsack())
        .with_config(config(SchedulerType::Asynchronous).with_termination_millis(30))
        .solve_with(&executor)
        .unwrap();

    assert!(started.elapsed() < std::time::Duration::from_secs(5));
    assert_eq!(
        result.status,
        SolveStatus::Exhausted(crate::result::StopReason::TimeLimit)
    );
    assert_eq!(result.stats.abandoned, 1);
    assert_eq!(result.open_nodes, 1);
    assert_eq!(executor.pending.lock().unwrap().len(), 1);
}

fn knapsack_data() -> impl Strategy<Value = (Vec<f64>, Vec<f64>, f64)> {
    prop::collection::vec((1u32..=10, 1u32..=20), 1..=6).prop_flat_map(|items| {
        let total: u32 = items.iter().map(|(w, _)| *w).sum();
        let weights = items.iter().map(|(w, _)| *w as f64).collect::<Vec<_>>();
        let values = items.iter().map(|(_, v)| *v as f64).collect::<Vec<_>>();
        (Just(weights), Just(values), 0..=total)
            .prop_map(|(w, v, capacity)| (w, v, capacity as f64))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn prop_pruning_is_sound((weights, values, capacity) in knapsack_data(), greedy in any::<bool>()) {
        let (optimum, _) = best_packing(&weights, &values, capacity, &[]).unwrap();
        for scheduler in SCHEDULERS {
            let problem = Knapsack::maximizing(&weights, &values, capacity).unwrap();
            let result = Solver::new(problem)
                .with_config(config(scheduler).with_greedy(greedy))
                .solve()
                .unwrap();
            prop_assert_eq!(result.status, SolveStatus::Optimal);
            prop_assert!((result.value - optimum).abs() < 1e-9);
        }
    }
}
