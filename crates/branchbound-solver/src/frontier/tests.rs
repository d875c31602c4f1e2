use branchbound_config::{NodeSelection, PruneRule};
use branchbound_core::{Node, Relaxation, Sense};
use branchbound_milp::{BoundChange, Knapsack};
use branchbound_test::toy_knapsack;

use super::Frontier;
use crate::error::FrontierError;

fn evaluated(parent: &Node<Knapsack>, var: usize, bound: f64) -> Node<Knapsack> {
    parent
        .child(BoundChange::Down { var, ub: 0.0 })
        .with_relaxation(Relaxation::optimal(bound, vec![]))
}

#[test]
fn test_best_bound_order_for_maximization() {
    let problem = toy_knapsack();
    let root = Node::root(&problem);
    let mut frontier = Frontier::new(NodeSelection::BestBound, None);
    frontier.push(evaluated(&root, 0, 5.0)).unwrap();
    frontier.push(evaluated(&root, 1, 9.0)).unwrap();
    frontier.push(evaluated(&root, 2, 7.0)).unwrap();

    let order: Vec<f64> = std::iter::from_fn(|| frontier.pop_best().ok())
        .map(|n| n.best_known_bound())
        .collect();
    assert_eq!(order, vec![9.0, 7.0, 5.0]);
}

#[test]
fn test_ties_pop_in_insertion_order() {
    let problem = toy_knapsack();
    let root = Node::root(&problem);
    let mut frontier = Frontier::new(NodeSelection::BestBound, None);
    for var in 0..4 {
        frontier.push(evaluated(&root, var, 3.0)).unwrap();
    }
    let vars: Vec<usize> = std::iter::from_fn(|| frontier.pop_best().ok())
        .map(|n| n.restrictions().latest().unwrap().var())
        .collect();
    assert_eq!(vars, vec![0, 1, 2, 3]);
}

#[test]
fn test_unevaluated_nodes_use_inherited_bound() {
    let problem = toy_knapsack();
    let root = Node::root(&problem);
    let high = evaluated(&root, 0, 8.0).child(BoundChange::Up { var: 1, lb: 1.0 });
    let low = evaluated(&root, 2, 4.0);
    let mut frontier = Frontier::new(NodeSelection::BestBound, None);
    frontier.push(low).unwrap();
    frontier.push(high).unwrap();
    assert_eq!(frontier.pop_best().unwrap().inherited_bound(), 8.0);
}

#[test]
fn test_depth_first_prefers_deeper_nodes() {
    let problem = toy_knapsack();
    let root = Node::root(&problem);
    let shallow = evaluated(&root, 0, 9.0);
    let deep = evaluated(&shallow, 1, 2.0);
    let mut frontier = Frontier::new(NodeSelection::DepthFirst, None);
    frontier.push(shallow).unwrap();
    frontier.push(deep).unwrap();
    assert_eq!(frontier.pop_best().unwrap().depth(), 2);
    assert_eq!(frontier.pop_best().unwrap().depth(), 1);
}

#[test]
fn test_breadth_first_prefers_shallow_nodes() {
    let problem = toy_knapsack();
    let root = Node::root(&problem);
    let shallow = evaluated(&root, 0, 1.0);
    let deep = evaluated(&shallow, 1, 9.0);
    let mut frontier = Frontier::new(NodeSelection::BreadthFirst, None);
    frontier.push(deep).unwrap();
    frontier.push(shallow).unwrap();
    assert_eq!(frontier.pop_best().unwrap().depth(), 1);
}

#[test]
fn test_dive_lane_pops_first_and_lifo() {
    let problem = toy_knapsack();
    let root = Node::root(&problem);
    let mut frontier = Frontier::new(NodeSelection::BestBound, None);
    frontier.push(evaluated(&root, 0, 100.0)).unwrap();
    frontier.push_dive(evaluated(&root, 1, 1.0)).unwrap();
    frontier.push_dive(evaluated(&root, 2, 2.0)).unwrap();
    assert_eq!(frontier.dive_len(), 2);

    assert_eq!(frontier.pop_best().unwrap().best_known_bound(), 2.0);
    assert_eq!(frontier.pop_best().unwrap().best_known_bound(), 1.0);
    assert_eq!(frontier.pop_best().unwrap().best_known_bound(), 100.0);
}

#[test]
fn test_empty_pop_is_an_error() {
    let mut frontier: Frontier<Knapsack> = Frontier::new(NodeSelection::BestBound, None);
    assert_eq!(frontier.pop_best().unwrap_err(), FrontierError::Empty);
}

#[test]
fn test_limit_rejects_push_but_not_restore() {
    let problem = toy_knapsack();
    let root = Node::root(&problem);
    let mut frontier = Frontier::new(NodeSelection::BestBound, Some(1));
    frontier.push(evaluated(&root, 0, 1.0)).unwrap();
    assert_eq!(
        frontier.push(evaluated(&root, 1, 1.0)).unwrap_err(),
        FrontierError::Full { limit: 1 }
    );
    assert_eq!(
        frontier.push_dive(evaluated(&root, 1, 1.0)).unwrap_err(),
        FrontierError::Full { limit: 1 }
    );
    frontier.restore(evaluated(&root, 2, 1.0));
    assert_eq!(frontier.len(), 2);
}

#[test]
fn test_prune_dominated() {
    let problem = toy_knapsack();
    let root = Node::root(&problem);
    let mut frontier = Frontier::new(NodeSelection::BestBound, None);
    frontier.push(evaluated(&root, 0, 5.0)).unwrap();
    frontier.push(evaluated(&root, 1, 7.0)).unwrap();
    frontier.push_dive(evaluated(&root, 2, 6.0)).unwrap();
    frontier.push(evaluated(&root, 3, 8.0)).unwrap();

    let pruned = frontier.prune_dominated(Sense::Maximize, 7.0, PruneRule::NonStrict);
    assert_eq!(pruned, 3);
    assert_eq!(frontier.len(), 1);
    assert_eq!(frontier.best_bound(), Some(8.0));
}

#[test]
fn test_counters() {
    let problem = toy_knapsack();
    let mut frontier = Frontier::new(NodeSelection::BestBound, None);
    frontier.push(Node::root(&problem)).unwrap();
    frontier.pop_best().unwrap();
    assert_eq!(frontier.total_pushed(), 1);
    assert_eq!(frontier.total_popped(), 1);
    assert!(frontier.is_empty());
    assert_eq!(frontier.best_bound(), None);
}
