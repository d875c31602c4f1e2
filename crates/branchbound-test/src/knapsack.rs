//! Knapsack fixtures with known answers.

use branchbound_milp::{Knapsack, KnapsackRelaxation};

pub const TOY_WEIGHTS: [f64; 4] = [2.0, 3.0, 4.0, 5.0];
pub const TOY_VALUES: [f64; 4] = [3.0, 4.0, 5.0, 6.0];
pub const TOY_CAPACITY: f64 = 5.0;

/// Optimal value of the toy knapsack.
pub const TOY_OPTIMUM: f64 = 7.0;

/// Items packed by the toy optimum.
pub const TOY_ITEMS: [usize; 2] = [0, 1];

/// Oracle of the toy knapsack, for wrapping.
pub fn toy_relaxation() -> KnapsackRelaxation {
    // Fixture data is valid by construction.
    match KnapsackRelaxation::new(TOY_WEIGHTS.to_vec(), TOY_VALUES.to_vec(), TOY_CAPACITY) {
        Ok(relaxation) => relaxation,
        Err(e) => panic!("toy knapsack fixture is invalid: {}", e),
    }
}

/// Weights `[2, 3, 4, 5]`, values `[3, 4, 5, 6]`, capacity 5.
pub fn toy_knapsack() -> Knapsack {
    toy_relaxation().into_program()
}

/// The toy knapsack minimizing `-value`; optimum `-7`.
pub fn toy_knapsack_minimizing() -> Knapsack {
    toy_relaxation().minimizing().into_program()
}

/// A knapsack with capacity 0 whose first item must be packed.
pub fn infeasible_relaxation() -> KnapsackRelaxation {
    let relaxation = KnapsackRelaxation::new(TOY_WEIGHTS.to_vec(), TOY_VALUES.to_vec(), 0.0)
        .and_then(|r| r.require(0));
    match relaxation {
        Ok(relaxation) => relaxation,
        Err(e) => panic!("infeasible knapsack fixture is invalid: {}", e),
    }
}

pub fn infeasible_knapsack() -> Knapsack {
    infeasible_relaxation().into_program()
}
