//! The frontier of open nodes.
//!
//! A binary heap ordered by the configured [`NodeSelection`], plus a LIFO
//! dive lane that is always popped first. Nodes are keyed by their own
//! bound once evaluated and by their inherited bound before that; ties are
//! broken by insertion order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use branchbound_config::{NodeSelection, PruneRule};
use branchbound_core::{Node, Problem, Sense};

use crate::error::FrontierError;
use crate::incumbent::prunes;

/// Heap position of a node. Smaller sorts first.
#[derive(Debug, Clone, Copy)]
struct FrontierKey {
    primary: f64,
    secondary: f64,
    seq: u64,
}

impl FrontierKey {
    fn cmp_key(&self, other: &Self) -> Ordering {
        self.primary
            .total_cmp(&other.primary)
            .then_with(|| self.secondary.total_cmp(&other.secondary))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

struct Entry<P: Problem> {
    key: FrontierKey,
    node: Node<P>,
}

impl<P: Problem> PartialEq for Entry<P> {
    fn eq(&self, other: &Self) -> bool {
        self.key.cmp_key(&other.key) == Ordering::Equal
    }
}

impl<P: Problem> Eq for Entry<P> {}

impl<P: Problem> PartialOrd for Entry<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P: Problem> Ord for Entry<P> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse so the smallest key pops first.
        other.key.cmp_key(&self.key)
    }
}

/// Open nodes awaiting evaluation.
///
/// # Example
///
/// ```
/// use branchbound_config::NodeSelection;
/// use branchbound_core::Node;
/// use branchbound_solver::Frontier;
/// use branchbound_test::toy_knapsack;
///
/// let problem = toy_knapsack();
/// let mut frontier = Frontier::new(NodeSelection::BestBound, None);
/// frontier.push(Node::root(&problem)).unwrap();
///
/// assert_eq!(frontier.len(), 1);
/// assert!(frontier.pop_best().is_ok());
/// assert!(frontier.pop_best().is_err());
/// ```
pub struct Frontier<P: Problem> {
    heap: BinaryHeap<Entry<P>>,
    dive: Vec<Node<P>>,
    selection: NodeSelection,
    limit: Option<usize>,
    next_seq: u64,
    total_pushed: u64,
    total_popped: u64,
}

impl<P: Problem> Frontier<P> {
    pub fn new(selection: NodeSelection, limit: Option<usize>) -> Self {
        Self {
            heap: BinaryHeap::new(),
            dive: Vec::new(),
            selection,
            limit,
            next_seq: 0,
            total_pushed: 0,
            total_popped: 0,
        }
    }

    fn key_of(&mut self, node: &Node<P>) -> FrontierKey {
        let seq = self.next_seq;
        self.next_seq += 1;
        let bound_key = node.sense().key(node.best_known_bound());
        let depth = node.depth() as f64;
        let (primary, secondary) = match self.selection {
            NodeSelection::BestBound => (bound_key, 0.0),
            NodeSelection::DepthFirst => (-depth, bound_key),
            NodeSelection::BreadthFirst => (depth, bound_key),
        };
        FrontierKey {
            primary,
            secondary,
            seq,
        }
    }

    fn check_capacity(&self) -> Result<(), FrontierError> {
        match self.limit {
            Some(limit) if self.len() >= limit => Err(FrontierError::Full { limit }),
            _ => Ok(()),
        }
    }

    /// Queues a node by the selection order.
    pub fn push(&mut self, node: Node<P>) -> Result<(), FrontierError> {
        self.check_capacity()?;
        self.insert(node);
        Ok(())
    }

    /// Queues a node on the dive lane, ahead of every heap entry.
    pub fn push_dive(&mut self, node: Node<P>) -> Result<(), FrontierError> {
        self.check_capacity()?;
        self.total_pushed += 1;
        self.dive.push(node);
        Ok(())
    }

    /// Puts back a node that was popped but not evaluated, ignoring the limit.
    pub fn restore(&mut self, node: Node<P>) {
        self.insert(node);
    }

    fn insert(&mut self, node: Node<P>) {
        let key = self.key_of(&node);
        self.total_pushed += 1;
        self.heap.push(Entry { key, node });
    }

    /// Removes the next node: the newest dive-lane node, else the heap top.
    pub fn pop_best(&mut self) -> Result<Node<P>, FrontierError> {
        let node = match self.dive.pop() {
            Some(node) => node,
            None => self.heap.pop().map(|e| e.node).ok_or(FrontierError::Empty)?,
        };
        self.total_popped += 1;
        Ok(node)
    }

    /// Drops every node that cannot beat `best`. Returns how many.
    pub fn prune_dominated(&mut self, sense: Sense, best: f64, rule: PruneRule) -> usize {
        let before = self.len();
        self.heap
            .retain(|e| !prunes(sense, e.node.best_known_bound(), best, rule));
        self.dive
            .retain(|n| !prunes(sense, n.best_known_bound(), best, rule));
        before - self.len()
    }

    /// Best bound over all queued nodes.
    pub fn best_bound(&self) -> Option<f64> {
        let sense = self.sense_of()?;
        self.heap
            .iter()
            .map(|e| &e.node)
            .chain(self.dive.iter())
            .map(|n| n.best_known_bound())
            .min_by(|a, b| sense.compare(*a, *b))
    }

    fn sense_of(&self) -> Option<Sense> {
        self.dive
            .first()
            .or_else(|| self.heap.peek().map(|e| &e.node))
            .map(|n| n.sense())
    }

    pub fn len(&self) -> usize {
        self.heap.len() + self.dive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty() && self.dive.is_empty()
    }

    pub fn dive_len(&self) -> usize {
        self.dive.len()
    }

    pub fn selection(&self) -> NodeSelection {
        self.selection
    }

    pub fn total_pushed(&self) -> u64 {
        self.total_pushed
    }

    pub fn total_popped(&self) -> u64 {
        self.total_popped
    }

    /// Drains every queued node.
    pub fn clear(&mut self) -> usize {
        let len = self.len();
        self.heap.clear();
        self.dive.clear();
        len
    }
}

#[cfg(test)]
mod tests;
