//! Outcome of a search run.

use std::fmt;

use crate::incumbent::IncumbentUpdate;
use crate::stats::SearchStats;

/// Why a search stopped before exploring the whole tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    TimeLimit,
    EvaluationLimit,
    /// The frontier reached its configured node ceiling.
    FrontierLimit,
    /// The external terminate flag was raised.
    Cancelled,
}

impl StopReason {
    /// Returns true if evaluations already in flight are abandoned.
    ///
    /// An exhausted evaluation budget only stops new dispatches; work that
    /// was dispatched within budget is still processed.
    pub fn interrupts_in_flight(self) -> bool {
        !matches!(self, StopReason::EvaluationLimit)
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::TimeLimit => write!(f, "time limit"),
            StopReason::EvaluationLimit => write!(f, "evaluation limit"),
            StopReason::FrontierLimit => write!(f, "frontier limit"),
            StopReason::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// The whole tree was explored; the incumbent is optimal.
    Optimal,
    /// The whole tree was explored and no feasible solution exists.
    Infeasible,
    /// A budget ran out with unexplored nodes left.
    Exhausted(StopReason),
    /// The tree was exhausted but some subtree was pruned after an oracle
    /// failure.
    Degraded,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "optimal"),
            SolveStatus::Infeasible => write!(f, "infeasible"),
            SolveStatus::Exhausted(reason) => write!(f, "exhausted ({})", reason),
            SolveStatus::Degraded => write!(f, "degraded"),
        }
    }
}

/// Result of [`Solver::solve`](crate::Solver::solve).
#[derive(Debug, Clone)]
pub struct SolveResult<S> {
    pub status: SolveStatus,
    /// Incumbent value; the sense's worst value when no solution was found.
    pub value: f64,
    pub solution: Option<S>,
    /// Best bound over the unexplored nodes, if any remain.
    pub best_bound: Option<f64>,
    pub open_nodes: usize,
    pub stats: SearchStats,
    /// Every incumbent improvement, in order.
    pub history: Vec<IncumbentUpdate<S>>,
}

impl<S> SolveResult<S> {
    pub fn is_proven_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }

    pub fn is_feasible(&self) -> bool {
        self.solution.is_some()
    }
}
