//! Optimization direction.

use std::cmp::Ordering;
use std::fmt;

/// Direction of optimization, shared by every node of a search tree.
///
/// Every comparison of bounds and objective values in the engine goes
/// through [`Sense::key`], which maps values so that a smaller key is always
/// better. Keys are compared with [`f64::total_cmp`].
///
/// # Example
///
/// ```
/// use branchbound_core::Sense;
///
/// assert!(Sense::Maximize.is_better(7.0, 6.0));
/// assert!(Sense::Minimize.is_better(6.0, 7.0));
/// assert_eq!(Sense::Maximize.worst(), f64::NEG_INFINITY);
/// assert!(Sense::Minimize.is_infeasible(f64::INFINITY));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sense {
    #[default]
    Minimize,
    Maximize,
}

impl Sense {
    /// +1 for minimization, -1 for maximization.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Sense::Minimize => 1.0,
            Sense::Maximize => -1.0,
        }
    }

    /// The sense-respecting infinity: bound of an infeasible subproblem and
    /// the value of an empty incumbent.
    #[inline]
    pub fn worst(self) -> f64 {
        self.sign() * f64::INFINITY
    }

    /// The opposite infinity: a bound that carries no information.
    #[inline]
    pub fn best_possible(self) -> f64 {
        -self.worst()
    }

    /// Maps a value to a key where smaller is better.
    #[inline]
    pub fn key(self, value: f64) -> f64 {
        self.sign() * value
    }

    /// Orders two values from best to worst.
    #[inline]
    pub fn compare(self, a: f64, b: f64) -> Ordering {
        self.key(a).total_cmp(&self.key(b))
    }

    /// Returns true if `a` is strictly better than `b`.
    #[inline]
    pub fn is_better(self, a: f64, b: f64) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// Returns true if `bound` is the sense-respecting infinity.
    #[inline]
    pub fn is_infeasible(self, bound: f64) -> bool {
        self.key(bound) == f64::INFINITY
    }
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sense::Minimize => write!(f, "minimize"),
            Sense::Maximize => write!(f, "maximize"),
        }
    }
}
