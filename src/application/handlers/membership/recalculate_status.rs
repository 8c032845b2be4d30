//! Per-membership status recalculation.
//!
//! Pure decision step: given one candidate, the calculator and the plan,
//! decide whether its status has to move. Nothing is written here.

use crate::domain::membership::{Membership, RecalculationPlan, StatusChange};
use crate::ports::StatusCalculator;

/// Decision for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recalculation {
    /// Already at its natural status.
    Unchanged,
    /// No status qualifies (or only Deceased would); left alone.
    Unqualified,
    /// An administrator override is in force; left alone.
    Overridden,
    /// Must move to a new status.
    Change(StatusChange),
}

/// Decides the outcome for one membership as of the plan date.
pub fn recalculate(
    membership: &Membership,
    calculator: &dyn StatusCalculator,
    plan: &RecalculationPlan,
) -> Recalculation {
    if membership.is_status_overridden(plan.as_of) {
        return Recalculation::Overridden;
    }

    let natural = match calculator.natural_status(membership, plan.as_of) {
        Some(status_id) if Some(status_id) != plan.deceased_status_id => status_id,
        _ => return Recalculation::Unqualified,
    };

    if natural == membership.status_id {
        Recalculation::Unchanged
    } else {
        Recalculation::Change(StatusChange {
            membership_id: membership.id,
            from: membership.status_id,
            to: natural,
        })
    }
}
