//! Per-run search state and the node life cycle shared by all schedulers.

use std::fmt;
use std::sync::Arc;

use branchbound_config::{PruneRule, SolverConfig};
use branchbound_core::{Node, Problem, Sense};
use smallvec::SmallVec;
use tracing::{debug, info, trace, warn};

use crate::error::SolverError;
use crate::executor::BoundOutcome;
use crate::frontier::Frontier;
use crate::incumbent::SharedIncumbent;
use crate::result::{SolveResult, SolveStatus, StopReason};
use crate::stats::SearchStats;
use crate::termination::Termination;

/// Submissions allowed per node before a transport failure counts as an
/// oracle failure.
pub const MAX_ATTEMPTS: u32 = 2;

/// What happened to a node after its evaluation returned.
pub enum Disposition<P: Problem> {
    /// Its bound cannot beat the incumbent.
    Pruned,
    Infeasible,
    /// Terminal; its solution was offered to the incumbent.
    Accepted { improved: bool },
    /// Split into this many children.
    Branched(usize),
    /// No bound could be obtained; the subtree is pruned and the run is
    /// degraded.
    Failed,
    /// The evaluation was lost in transport and should be submitted again.
    Retry(Node<P>),
}

impl<P: Problem> fmt::Debug for Disposition<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disposition::Pruned => write!(f, "Pruned"),
            Disposition::Infeasible => write!(f, "Infeasible"),
            Disposition::Accepted { improved } => write!(f, "Accepted {{ improved: {} }}", improved),
            Disposition::Branched(k) => write!(f, "Branched({})", k),
            Disposition::Failed => write!(f, "Failed"),
            Disposition::Retry(node) => write!(f, "Retry(depth {})", node.depth()),
        }
    }
}

/// State of one search run.
///
/// Owned by the scheduling thread. Holds the frontier, statistics and
/// termination; only the incumbent is shared.
pub struct SearchScope<'t, P: Problem> {
    problem: Arc<P>,
    sense: Sense,
    frontier: Frontier<P>,
    incumbent: SharedIncumbent<P::Solution>,
    stats: SearchStats,
    termination: &'t dyn Termination,
    prune_rule: PruneRule,
    greedy_gap: Option<f64>,
    stop: Option<StopReason>,
    /// Best bound among children the frontier had no room for.
    lost_bound: Option<f64>,
}

impl<'t, P: Problem> SearchScope<'t, P> {
    /// Creates the scope with the root node queued.
    pub fn new(
        problem: Arc<P>,
        config: &SolverConfig,
        incumbent: SharedIncumbent<P::Solution>,
        termination: &'t dyn Termination,
    ) -> Self {
        let mut frontier = Frontier::new(config.node_selection, config.frontier_limit);
        frontier.restore(Node::root(problem.as_ref()));
        Self {
            sense: problem.sense(),
            problem,
            frontier,
            incumbent,
            stats: SearchStats::new(),
            termination,
            prune_rule: config.prune_rule,
            greedy_gap: config.greedy.then_some(config.greedy_gap),
            stop: None,
            lost_bound: None,
        }
    }

    pub fn problem(&self) -> &Arc<P> {
        &self.problem
    }

    pub fn incumbent(&self) -> &SharedIncumbent<P::Solution> {
        &self.incumbent
    }

    pub fn frontier(&self) -> &Frontier<P> {
        &self.frontier
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop
    }

    /// Returns true if in-flight evaluations should be abandoned.
    pub fn is_interrupted(&self) -> bool {
        self.stop.is_some_and(StopReason::interrupts_in_flight)
    }

    /// Records the first reason to stop; later reasons are ignored.
    pub fn interrupt(&mut self, reason: StopReason) {
        if self.stop.is_none() {
            debug!(reason = %reason, evaluations = self.stats.evaluations_dispatched, "Search interrupted");
            self.stop = Some(reason);
        }
    }

    /// Pops the next node worth evaluating.
    ///
    /// Nodes whose inherited bound can no longer beat the incumbent are
    /// discarded without evaluation.
    pub fn next_node(&mut self) -> Option<Node<P>> {
        loop {
            let node = self.frontier.pop_best().ok()?;
            if self.incumbent.prunes(node.best_known_bound(), self.prune_rule) {
                self.stats.nodes_pruned += 1;
                trace!(depth = node.depth(), "Pruned before evaluation");
                continue;
            }
            return Some(node);
        }
    }

    pub fn record_in_flight(&mut self, count: usize) {
        self.stats.record_in_flight(count);
    }

    /// Returns a popped node that will not be evaluated.
    pub fn restore(&mut self, node: Node<P>) {
        self.frontier.restore(node);
    }

    /// Consults the termination before a submission and counts it.
    ///
    /// Returns false once any budget is exhausted.
    pub fn can_dispatch(&mut self) -> bool {
        if self.stop.is_some() {
            return false;
        }
        if let Some(reason) = self.termination.check(&self.stats) {
            self.interrupt(reason);
            return false;
        }
        self.stats.record_dispatch();
        true
    }

    /// Checks for a stop that must not wait for in-flight work.
    ///
    /// Called while blocked on results. An exhausted evaluation budget is
    /// ignored here because outstanding work was dispatched within budget.
    pub fn poll_interrupt(&mut self) -> bool {
        if let Some(reason) = self.termination.check(&self.stats) {
            if reason.interrupts_in_flight() {
                self.interrupt(reason);
            }
        }
        self.is_interrupted()
    }

    /// Gives up on dispatched nodes whose results will not be awaited.
    ///
    /// The nodes go back to the frontier so the result reports them as open.
    pub fn abandon(&mut self, nodes: impl IntoIterator<Item = Node<P>>) {
        let mut count = 0u64;
        for node in nodes {
            self.frontier.restore(node);
            count += 1;
        }
        if count > 0 {
            self.stats.abandoned += count;
            debug!(abandoned = count, "Abandoned in-flight evaluations");
        }
    }

    /// Applies an evaluation result to `node`.
    ///
    /// `attempt` is the 1-based submission count of this node.
    pub fn process(
        &mut self,
        node: Node<P>,
        outcome: BoundOutcome<P>,
        attempt: u32,
    ) -> Result<Disposition<P>, SolverError> {
        let relaxation = match outcome {
            Ok(relaxation) => relaxation,
            Err(e) if e.is_transport() && attempt < MAX_ATTEMPTS => {
                self.stats.retries += 1;
                warn!(depth = node.depth(), attempt, error = %e, "Evaluation lost, retrying");
                return Ok(Disposition::Retry(node));
            }
            Err(e) => {
                self.stats.evaluations_completed += 1;
                self.stats.oracle_failures += 1;
                warn!(depth = node.depth(), error = %e, "No bound for node, pruning its subtree");
                return Ok(Disposition::Failed);
            }
        };
        self.stats.evaluations_completed += 1;

        let node = node.with_relaxation(relaxation);
        if node.is_infeasible() {
            self.stats.nodes_infeasible += 1;
            trace!(depth = node.depth(), "Infeasible");
            return Ok(Disposition::Infeasible);
        }

        let bound = node.best_known_bound();
        if self.incumbent.prunes(bound, self.prune_rule) {
            self.stats.nodes_pruned += 1;
            trace!(depth = node.depth(), bound, "Pruned by bound");
            return Ok(Disposition::Pruned);
        }

        if self.problem.terminal(&node) {
            self.stats.nodes_accepted += 1;
            let improved = match self.problem.get_solution(&node) {
                Some((value, solution)) => self.offer(value, solution),
                None => false,
            };
            trace!(depth = node.depth(), bound, improved, "Terminal");
            return Ok(Disposition::Accepted { improved });
        }

        let arity = self.problem.separate(&node);
        let children: SmallVec<[Node<P>; 2]> = (0..arity)
            .map(|which| self.problem.make_child(&node, which))
            .collect::<Result<_, _>>()?;
        let count = children.len();
        self.stats.nodes_branched += 1;
        self.stats.children_created += count as u64;

        let pushed = if self.should_dive(bound) {
            // Reversed so that child 0 is popped first.
            children
                .into_iter()
                .rev()
                .try_for_each(|child| self.frontier.push_dive(child))
        } else {
            children
                .into_iter()
                .try_for_each(|child| self.frontier.push(child))
        };
        if let Err(e) = pushed {
            warn!(error = %e, bound, "Frontier exhausted, dropping children");
            self.lost_bound = Some(match self.lost_bound {
                Some(lost) if self.sense.is_better(lost, bound) => lost,
                _ => bound,
            });
            self.interrupt(StopReason::FrontierLimit);
        }
        self.stats.record_frontier(self.frontier.len());
        trace!(depth = node.depth(), bound, children = count, "Branched");
        Ok(Disposition::Branched(count))
    }

    /// Greedy diving applies until a solution exists, then only near it.
    fn should_dive(&self, bound: f64) -> bool {
        let Some(gap) = self.greedy_gap else {
            return false;
        };
        let (best, solution) = self.incumbent.snapshot();
        if solution.is_none() {
            return true;
        }
        (bound - best).abs() / best.abs().max(1.0) <= gap
    }

    fn offer(&mut self, value: f64, solution: P::Solution) -> bool {
        let improved = self.incumbent.offer(
            value,
            solution,
            self.stats.elapsed(),
            self.stats.evaluations_dispatched,
        );
        if improved {
            self.stats.incumbent_updates += 1;
            let pruned = self
                .frontier
                .prune_dominated(self.sense, value, self.prune_rule);
            self.stats.nodes_pruned += pruned as u64;
            info!(
                event = "incumbent",
                value,
                evaluations = self.stats.evaluations_dispatched,
                pruned,
            );
        }
        improved
    }

    /// Ends the run and builds its result.
    ///
    /// A stop only makes the result non-optimal if unexplored work remains
    /// after discarding nodes the final incumbent dominates.
    pub fn finish(mut self) -> SolveResult<P::Solution> {
        self.stats.freeze();
        let best = self.incumbent.best_value();
        let pruned = self.frontier.prune_dominated(self.sense, best, self.prune_rule);
        self.stats.nodes_pruned += pruned as u64;

        let complete = self.frontier.is_empty() && self.lost_bound.is_none();
        let (value, solution) = self.incumbent.snapshot();
        let status = match self.stop {
            Some(reason) if !complete => SolveStatus::Exhausted(reason),
            _ if self.stats.oracle_failures > 0 => SolveStatus::Degraded,
            _ if solution.is_none() => SolveStatus::Infeasible,
            _ => SolveStatus::Optimal,
        };

        info!(
            event = "solve_end",
            status = %status,
            value,
            evaluations = self.stats.evaluations_completed,
            pruned = self.stats.nodes_pruned,
            open_nodes = self.frontier.len(),
            elapsed_ms = self.stats.elapsed().as_millis() as u64,
        );

        let best_bound = match (self.frontier.best_bound(), self.lost_bound) {
            (Some(open), Some(lost)) if self.sense.is_better(lost, open) => Some(lost),
            (open, lost) => open.or(lost),
        };

        SolveResult {
            status,
            value,
            solution,
            best_bound,
            open_nodes: self.frontier.len(),
            stats: self.stats,
            history: self.incumbent.history(),
        }
    }
}
