//! Seeded random knapsack instances.

use branchbound_milp::{Knapsack, KnapsackRelaxation};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::brute_force::best_packing;

/// Data of a 0/1 knapsack with integral weights and values.
#[derive(Debug, Clone, PartialEq)]
pub struct KnapsackInstance {
    pub weights: Vec<f64>,
    pub values: Vec<f64>,
    pub capacity: f64,
}

impl KnapsackInstance {
    pub fn relaxation(&self) -> KnapsackRelaxation {
        match KnapsackRelaxation::new(self.weights.clone(), self.values.clone(), self.capacity) {
            Ok(relaxation) => relaxation,
            Err(e) => panic!("generated instance is invalid: {}", e),
        }
    }

    pub fn to_problem(&self) -> Knapsack {
        self.relaxation().into_program()
    }

    /// Optimal value by exhaustive enumeration.
    pub fn optimum(&self) -> f64 {
        best_packing(&self.weights, &self.values, self.capacity, &[])
            .map(|(value, _)| value)
            .unwrap_or(0.0)
    }
}

/// Generates an instance with `items` items from `seed`.
///
/// Weights are drawn from `1..=10`, values from `1..=20`, and the capacity
/// is half the total weight so that roughly half the items fit.
pub fn random_instance(seed: u64, items: usize) -> KnapsackInstance {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let weights: Vec<f64> = (0..items).map(|_| rng.random_range(1..=10) as f64).collect();
    let values: Vec<f64> = (0..items).map(|_| rng.random_range(1..=20) as f64).collect();
    let capacity = (weights.iter().sum::<f64>() / 2.0).floor();
    KnapsackInstance {
        weights,
        values,
        capacity,
    }
}
