//! Status calculator port.
//!
//! Computes the status a membership should have on a given date. The job only
//! consumes the answer; how qualification is decided (date rules, external
//! service) is up to the implementation.

use chrono::NaiveDate;

use crate::domain::foundation::MembershipStatusId;
use crate::domain::membership::Membership;

/// Capability that computes a membership's natural status.
///
/// Implementations must be pure: same membership and date, same answer.
pub trait StatusCalculator: Send + Sync {
    /// Returns the status the membership qualifies for on `as_of`, or `None`
    /// when no status qualifies.
    fn natural_status(&self, membership: &Membership, as_of: NaiveDate)
        -> Option<MembershipStatusId>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_calculator_is_object_safe() {
        fn _accepts_dyn(_calculator: &dyn StatusCalculator) {}
    }
}
