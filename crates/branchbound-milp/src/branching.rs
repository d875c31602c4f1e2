//! Branching variable selection.

/// Fractional part distance of `value` to its nearest integer.
#[inline]
pub fn fractionality(value: f64) -> f64 {
    (value - value.floor()).min(value.ceil() - value)
}

/// Picks the most fractional integer variable of `values`.
///
/// `integer_vars` must be sorted ascending; on ties the lowest index wins.
/// Returns `None` when every integer variable is within `tolerance` of an
/// integer.
pub fn most_fractional(values: &[f64], integer_vars: &[usize], tolerance: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for &var in integer_vars {
        let Some(&value) = values.get(var) else {
            continue;
        };
        let frac = fractionality(value);
        if frac <= tolerance {
            continue;
        }
        match best {
            Some((_, best_frac)) if frac <= best_frac => {}
            _ => best = Some((var, frac)),
        }
    }
    best.map(|(var, _)| var)
}
