//! Membership aggregate entity.
//!
//! A Membership ties one contact to one membership type for a period of time.
//! Memberships are created by enrollment flows outside this crate; the
//! recalculation job only ever rewrites their status.
//!
//! # Invariants
//!
//! - `status_id` refers to a status present in the status catalog
//! - `start_date <= end_date` when an end date is present
//! - The job never deletes a membership

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ContactId, DomainError, ErrorCode, MembershipId, MembershipStatusId, MembershipTypeId,
};

/// Administrator pin on a membership's status.
///
/// While an override is in force the recalculation job leaves the status alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "until", rename_all = "snake_case")]
pub enum StatusOverride {
    #[default]
    None,
    Permanent,
    /// Pinned through the given date (inclusive).
    Until(NaiveDate),
}

impl StatusOverride {
    /// Returns true while the override still applies on `as_of`.
    pub fn is_active_on(&self, as_of: NaiveDate) -> bool {
        match self {
            StatusOverride::None => false,
            StatusOverride::Permanent => true,
            StatusOverride::Until(until) => as_of <= *until,
        }
    }
}

/// Membership aggregate - one contact's association with one membership type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: MembershipId,

    pub contact_id: ContactId,

    pub membership_type_id: MembershipTypeId,

    /// When the contact first joined; feeds join-date based status rules.
    pub join_date: NaiveDate,

    pub start_date: NaiveDate,

    /// `None` for lifetime memberships.
    pub end_date: Option<NaiveDate>,

    pub status_id: MembershipStatusId,

    /// Marks sandbox/demo data created by test transactions.
    #[serde(default)]
    pub is_test: bool,

    #[serde(default)]
    pub status_override: StatusOverride,
}

impl Membership {
    /// Creates a live (non-test) membership with no status override.
    ///
    /// The join date defaults to the start date.
    pub fn new(
        id: MembershipId,
        contact_id: ContactId,
        membership_type_id: MembershipTypeId,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        status_id: MembershipStatusId,
    ) -> Self {
        Self {
            id,
            contact_id,
            membership_type_id,
            join_date: start_date,
            start_date,
            end_date,
            status_id,
            is_test: false,
            status_override: StatusOverride::None,
        }
    }

    pub fn with_join_date(mut self, join_date: NaiveDate) -> Self {
        self.join_date = join_date;
        self
    }

    pub fn as_test(mut self) -> Self {
        self.is_test = true;
        self
    }

    pub fn with_status_override(mut self, status_override: StatusOverride) -> Self {
        self.status_override = status_override;
        self
    }

    /// Checks the date invariant.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` if the end date precedes the start date.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(DomainError::new(
                    ErrorCode::ValidationFailed,
                    format!(
                        "Membership {} ends ({}) before it starts ({})",
                        self.id, end, self.start_date
                    ),
                )
                .with_detail("field", "end_date"));
            }
        }
        Ok(())
    }

    /// Returns true when an administrator pin keeps the status fixed on `as_of`.
    pub fn is_status_overridden(&self, as_of: NaiveDate) -> bool {
        self.status_override.is_active_on(as_of)
    }

    /// Rewrites the status. The only mutation the recalculation job performs.
    pub fn assign_status(&mut self, status_id: MembershipStatusId) {
        self.status_id = status_id;
    }
}
