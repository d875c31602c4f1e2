//! Exhaustive enumeration of small knapsacks.

use branchbound_milp::VariableBounds;

/// Best packing of a 0/1 knapsack by trying every subset.
///
/// Returns `None` when no subset is feasible (only possible when
/// `required` items overflow the capacity). Ties keep the subset found
/// first in bitmask order. Intended for at most ~20 items.
pub fn best_packing(
    weights: &[f64],
    values: &[f64],
    capacity: f64,
    required: &[usize],
) -> Option<(f64, Vec<usize>)> {
    let required_mask = required.iter().fold(0u32, |mask, &i| mask | (1 << i));
    enumerate(weights, values, capacity, required_mask, 0)
}

/// Best packing among the subsets that `bounds` allow.
///
/// An item is forced in when its lower bound is at least one and left out
/// when its upper bound is below one. Returns `None` for an empty domain.
pub fn best_packing_within(
    weights: &[f64],
    values: &[f64],
    capacity: f64,
    bounds: &VariableBounds,
) -> Option<(f64, Vec<usize>)> {
    if bounds.has_empty_domain() {
        return None;
    }
    let mut required_mask = 0u32;
    let mut excluded_mask = 0u32;
    for i in 0..weights.len() {
        if bounds.lower[i] >= 0.5 {
            required_mask |= 1 << i;
        }
        if bounds.upper[i] < 0.5 {
            excluded_mask |= 1 << i;
        }
    }
    if required_mask & excluded_mask != 0 {
        return None;
    }
    enumerate(weights, values, capacity, required_mask, excluded_mask)
}

fn enumerate(
    weights: &[f64],
    values: &[f64],
    capacity: f64,
    required_mask: u32,
    excluded_mask: u32,
) -> Option<(f64, Vec<usize>)> {
    let n = weights.len();
    assert!(n < 32, "brute force over {} items", n);

    let mut best: Option<(f64, u32)> = None;
    for mask in 0u32..(1 << n) {
        if mask & required_mask != required_mask || mask & excluded_mask != 0 {
            continue;
        }
        let (weight, value) = (0..n)
            .filter(|i| mask & (1 << i) != 0)
            .fold((0.0, 0.0), |(w, v), i| (w + weights[i], v + values[i]));
        if weight > capacity + 1e-9 {
            continue;
        }
        match best {
            Some((best_value, _)) if value <= best_value => {}
            _ => best = Some((value, mask)),
        }
    }

    best.map(|(value, mask)| (value, (0..n).filter(|i| mask & (1 << i) != 0).collect()))
}
