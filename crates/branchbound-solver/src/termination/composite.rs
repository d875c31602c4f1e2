//! OR-composition of terminations.
//!
//! Uses macro-generated tuple implementations for zero type erasure.

use super::Termination;
use crate::result::StopReason;
use crate::stats::SearchStats;

/// Combines terminations with OR logic.
///
/// Reports the reason of the first child (in tuple order) that wants to
/// stop.
///
/// ```
/// use branchbound_solver::termination::{EvaluationCountTermination, OrTermination, TimeTermination};
///
/// // Stop after 30 seconds or 1000 evaluations
/// let termination = OrTermination::new((
///     TimeTermination::seconds(30),
///     EvaluationCountTermination::new(1000),
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn check(&self, stats: &SearchStats) -> Option<StopReason> {
                None $(.or_else(|| (self.0).$idx.check(stats)))+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4);
