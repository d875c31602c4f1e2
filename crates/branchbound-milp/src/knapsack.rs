//! The 0/1 knapsack and its closed-form LP relaxation.
//!
//! ```
//! use branchbound_milp::Knapsack;
//!
//! let problem = Knapsack::maximizing(&[2.0, 3.0, 4.0, 5.0], &[3.0, 4.0, 5.0, 6.0], 5.0).unwrap();
//! assert_eq!(problem.oracle().item_count(), 4);
//! assert_eq!(Knapsack::selected_items(&[1.0, 1.0, 0.0, 0.0]), vec![0, 1]);
//! ```

use branchbound_core::{OracleError, Sense};

use crate::bounds::VariableBounds;
use crate::error::MilpError;
use crate::oracle::{OracleSolution, RelaxationOracle};
use crate::program::IntegerProgram;

/// Slack allowed when checking the fixed items against the capacity.
const CAPACITY_TOLERANCE: f64 = 1e-9;

/// A knapsack solved by branch-and-bound over its LP relaxation.
pub type Knapsack = IntegerProgram<KnapsackRelaxation>;

/// Dantzig bound of a 0/1 knapsack under variable bounds.
///
/// Items at their lower bound are packed first; the remaining capacity is
/// filled greedily by value density (ties by index), so at most one item is
/// fractional. With `minimizing`, the objective is negated: the relaxed
/// point is unchanged and the bound becomes a lower bound on `-value`.
#[derive(Debug, Clone)]
pub struct KnapsackRelaxation {
    weights: Vec<f64>,
    values: Vec<f64>,
    capacity: f64,
    required: Vec<usize>,
    order: Vec<usize>,
    sense: Sense,
}

impl KnapsackRelaxation {
    pub fn new(weights: Vec<f64>, values: Vec<f64>, capacity: f64) -> Result<Self, MilpError> {
        if weights.len() != values.len() {
            return Err(MilpError::InvalidModel(format!(
                "{} weights but {} values",
                weights.len(),
                values.len()
            )));
        }
        if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(MilpError::InvalidModel(format!(
                "weights must be finite and non-negative, got {}",
                w
            )));
        }
        if let Some(v) = values.iter().find(|v| !v.is_finite()) {
            return Err(MilpError::InvalidModel(format!("values must be finite, got {}", v)));
        }
        if !capacity.is_finite() {
            return Err(MilpError::InvalidModel(format!(
                "capacity must be finite, got {}",
                capacity
            )));
        }

        let mut order: Vec<usize> = (0..weights.len()).collect();
        let density = |i: usize| {
            if weights[i] > 0.0 {
                values[i] / weights[i]
            } else {
                f64::INFINITY
            }
        };
        // Stable: equal densities keep index order.
        order.sort_by(|&a, &b| density(b).total_cmp(&density(a)));

        Ok(Self {
            weights,
            values,
            capacity,
            required: Vec::new(),
            order,
            sense: Sense::Maximize,
        })
    }

    /// Forces `item` into every solution.
    pub fn require(mut self, item: usize) -> Result<Self, MilpError> {
        if item >= self.weights.len() {
            return Err(MilpError::VariableOutOfRange {
                index: item,
                count: self.weights.len(),
            });
        }
        if !self.required.contains(&item) {
            self.required.push(item);
        }
        Ok(self)
    }

    /// Switches to minimizing the negated value.
    pub fn minimizing(mut self) -> Self {
        self.sense = Sense::Minimize;
        self
    }

    pub fn into_program(self) -> Knapsack {
        IntegerProgram::new(self)
    }

    pub fn item_count(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn required(&self) -> &[usize] {
        &self.required
    }

    /// Objective of `point` in this relaxation's sense.
    pub fn objective(&self, point: &[f64]) -> f64 {
        let value: f64 = self.values.iter().zip(point).map(|(v, x)| v * x).sum();
        match self.sense {
            Sense::Maximize => value,
            Sense::Minimize => -value,
        }
    }
}

impl RelaxationOracle for KnapsackRelaxation {
    fn sense(&self) -> Sense {
        self.sense
    }

    fn variable_count(&self) -> usize {
        self.weights.len()
    }

    fn integer_variables(&self) -> Vec<usize> {
        (0..self.weights.len()).collect()
    }

    fn base_bounds(&self) -> VariableBounds {
        let mut bounds = VariableBounds::binary(self.weights.len());
        for &item in &self.required {
            bounds.lower[item] = 1.0;
        }
        bounds
    }

    fn solve(&self, bounds: &VariableBounds) -> Result<OracleSolution, OracleError> {
        if bounds.len() != self.weights.len() {
            return Err(OracleError::Failed(format!(
                "expected bounds for {} items, got {}",
                self.weights.len(),
                bounds.len()
            )));
        }
        if bounds.has_empty_domain() {
            return Ok(OracleSolution::infeasible());
        }

        let mut point = bounds.lower.clone();
        let used: f64 = self.weights.iter().zip(&point).map(|(w, x)| w * x).sum();
        if used > self.capacity + CAPACITY_TOLERANCE {
            return Ok(OracleSolution::infeasible());
        }

        let mut remaining = self.capacity - used;
        for &i in &self.order {
            let span = bounds.upper[i] - bounds.lower[i];
            if span <= 0.0 || self.values[i] <= 0.0 {
                continue;
            }
            if self.weights[i] == 0.0 {
                point[i] = bounds.upper[i];
                continue;
            }
            if remaining <= 0.0 {
                break;
            }
            let take = span.min(remaining / self.weights[i]);
            point[i] += take;
            remaining -= take * self.weights[i];
        }

        Ok(OracleSolution::optimal(self.objective(&point), point))
    }
}

impl IntegerProgram<KnapsackRelaxation> {
    /// The classic knapsack: maximize packed value.
    pub fn maximizing(weights: &[f64], values: &[f64], capacity: f64) -> Result<Self, MilpError> {
        Ok(KnapsackRelaxation::new(weights.to_vec(), values.to_vec(), capacity)?.into_program())
    }

    /// The same knapsack minimizing `-value`; its optimum is the negated
    /// optimum of [`maximizing`](Self::maximizing).
    pub fn minimizing(weights: &[f64], values: &[f64], capacity: f64) -> Result<Self, MilpError> {
        Ok(KnapsackRelaxation::new(weights.to_vec(), values.to_vec(), capacity)?
            .minimizing()
            .into_program())
    }

    /// Indices of the items packed in a solution.
    pub fn selected_items(solution: &[f64]) -> Vec<usize> {
        solution
            .iter()
            .enumerate()
            .filter(|(_, x)| **x > 0.5)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Shorthand for [`Knapsack::maximizing`].
pub fn knapsack(weights: &[f64], values: &[f64], capacity: f64) -> Result<Knapsack, MilpError> {
    Knapsack::maximizing(weights, values, capacity)
}
