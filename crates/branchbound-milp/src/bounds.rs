//! Variable bounds and the branching deltas that tighten them.

use std::fmt;

use branchbound_core::Restrictions;

/// Tolerance under which a lower bound above an upper bound is still
/// considered consistent.
const EMPTY_DOMAIN_TOLERANCE: f64 = 1e-9;

/// A single bound tightening produced by branching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundChange {
    /// `x[var] <= ub`
    Down { var: usize, ub: f64 },
    /// `x[var] >= lb`
    Up { var: usize, lb: f64 },
}

impl BoundChange {
    pub fn var(&self) -> usize {
        match self {
            BoundChange::Down { var, .. } | BoundChange::Up { var, .. } => *var,
        }
    }
}

impl fmt::Display for BoundChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundChange::Down { var, ub } => write!(f, "x{} <= {}", var, ub),
            BoundChange::Up { var, lb } => write!(f, "x{} >= {}", var, lb),
        }
    }
}

/// Lower and upper bounds of every variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableBounds {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl VariableBounds {
    /// Bounds `[lower, upper]` for `count` variables.
    pub fn uniform(count: usize, lower: f64, upper: f64) -> Self {
        Self {
            lower: vec![lower; count],
            upper: vec![upper; count],
        }
    }

    /// Binary domains `[0, 1]`.
    pub fn binary(count: usize) -> Self {
        Self::uniform(count, 0.0, 1.0)
    }

    pub fn len(&self) -> usize {
        self.lower.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// Applies one tightening. Bounds only ever shrink.
    pub fn apply(&mut self, change: &BoundChange) {
        match *change {
            BoundChange::Down { var, ub } => {
                if let Some(upper) = self.upper.get_mut(var) {
                    *upper = upper.min(ub);
                }
            }
            BoundChange::Up { var, lb } => {
                if let Some(lower) = self.lower.get_mut(var) {
                    *lower = lower.max(lb);
                }
            }
        }
    }

    /// Resolves a node's restriction chain on top of `base`.
    ///
    /// Tightenings commute, so the chain is applied newest first without
    /// collecting it.
    pub fn resolve(base: &VariableBounds, restrictions: &Restrictions<BoundChange>) -> Self {
        let mut bounds = base.clone();
        for change in restrictions {
            bounds.apply(change);
        }
        bounds
    }

    /// Returns true if some variable has an empty domain.
    pub fn has_empty_domain(&self) -> bool {
        self.lower
            .iter()
            .zip(&self.upper)
            .any(|(lo, up)| *lo > *up + EMPTY_DOMAIN_TOLERANCE)
    }

    /// Returns true if the variable's domain is a single point.
    pub fn is_fixed(&self, var: usize) -> bool {
        (self.upper[var] - self.lower[var]).abs() <= EMPTY_DOMAIN_TOLERANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_tightens_in_any_order() {
        let base = VariableBounds::uniform(2, 0.0, 10.0);
        let chain = Restrictions::new()
            .extend(BoundChange::Down { var: 0, ub: 7.0 })
            .extend(BoundChange::Up { var: 1, lb: 3.0 })
            .extend(BoundChange::Down { var: 0, ub: 4.0 });

        let bounds = VariableBounds::resolve(&base, &chain);
        assert_eq!(bounds.upper, vec![4.0, 10.0]);
        assert_eq!(bounds.lower, vec![0.0, 3.0]);
        assert!(!bounds.has_empty_domain());
    }

    #[test]
    fn test_looser_change_never_relaxes() {
        let mut bounds = VariableBounds::binary(1);
        bounds.apply(&BoundChange::Down { var: 0, ub: 0.0 });
        bounds.apply(&BoundChange::Down { var: 0, ub: 1.0 });
        assert_eq!(bounds.upper[0], 0.0);
        assert!(bounds.is_fixed(0));
    }

    #[test]
    fn test_empty_domain_detected() {
        let base = VariableBounds::binary(1);
        let chain = Restrictions::new()
            .extend(BoundChange::Down { var: 0, ub: 0.0 })
            .extend(BoundChange::Up { var: 0, lb: 1.0 });
        assert!(VariableBounds::resolve(&base, &chain).has_empty_domain());
    }

    #[test]
    fn test_display() {
        assert_eq!(BoundChange::Down { var: 2, ub: 0.0 }.to_string(), "x2 <= 0");
        assert_eq!(BoundChange::Up { var: 5, lb: 1.0 }.to_string(), "x5 >= 1");
    }
}
