//! Rule-based status calculator.
//!
//! Evaluates catalog rules in weight order and returns the first status the
//! membership qualifies for.

use chrono::NaiveDate;

use crate::domain::foundation::MembershipStatusId;
use crate::domain::membership::{Membership, MembershipStatus};
use crate::ports::StatusCalculator;

/// Computes natural statuses from the date-window rules of a status catalog.
#[derive(Debug, Clone)]
pub struct RuleBasedStatusCalculator {
    statuses: Vec<MembershipStatus>,
}

impl RuleBasedStatusCalculator {
    /// Build a calculator over the given catalog. Order of input is irrelevant.
    pub fn new(mut statuses: Vec<MembershipStatus>) -> Self {
        statuses.sort_by_key(|s| (s.weight, s.id));
        Self { statuses }
    }

    pub fn default_catalog() -> Self {
        Self::new(MembershipStatus::default_catalog())
    }
}

impl StatusCalculator for RuleBasedStatusCalculator {
    fn natural_status(&self, membership: &Membership, as_of: NaiveDate) -> Option<MembershipStatusId> {
        self.statuses
            .iter()
            .find(|status| status.qualifies(membership, as_of))
            .map(|status| status.id)
    }
}
