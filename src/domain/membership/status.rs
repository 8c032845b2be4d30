//! Membership status catalog entries and their qualification rules.
//!
//! A status is a named lifecycle state (Current, Grace, Expired, ...). Statuses
//! driven by dates carry a [`StatusRule::DateWindow`]; statuses that only an
//! administrator may assign carry [`StatusRule::Manual`] and are never produced
//! by recalculation.

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::MembershipStatusId;

use super::Membership;

/// Name of the terminal status assigned when a member passes away.
///
/// Memberships in this status are never recalculated.
pub const DECEASED_STATUS_NAME: &str = "Deceased";

/// Status names excluded from recalculation when a request names none.
pub const DEFAULT_EXCLUDED_STATUS_NAMES: [&str; 3] = ["Pending", "Cancelled", "Expired"];

/// Membership date a rule boundary is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateEvent {
    JoinDate,
    StartDate,
    EndDate,
}

/// Unit of a boundary adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetUnit {
    Day,
    Month,
    Year,
}

/// Signed adjustment applied to an event date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOffset {
    pub unit: OffsetUnit,
    pub interval: i32,
}

impl DateOffset {
    pub fn days(interval: i32) -> Self {
        Self { unit: OffsetUnit::Day, interval }
    }

    pub fn months(interval: i32) -> Self {
        Self { unit: OffsetUnit::Month, interval }
    }

    pub fn years(interval: i32) -> Self {
        Self { unit: OffsetUnit::Year, interval }
    }

    /// Applies the offset, clamping month arithmetic to the last day of the month.
    ///
    /// Returns `None` when the result falls outside chrono's date range.
    pub fn apply(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self.unit {
            OffsetUnit::Day => date.checked_add_signed(Duration::days(i64::from(self.interval))),
            OffsetUnit::Month => add_months(date, i64::from(self.interval)),
            OffsetUnit::Year => add_months(date, i64::from(self.interval) * 12),
        }
    }
}

fn add_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let magnitude = u32::try_from(months.unsigned_abs()).ok()?;
    if months >= 0 {
        date.checked_add_months(Months::new(magnitude))
    } else {
        date.checked_sub_months(Months::new(magnitude))
    }
}

/// One end of a date window: an event date plus an optional adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBoundary {
    pub event: DateEvent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<DateOffset>,
}

impl DateBoundary {
    pub fn at(event: DateEvent) -> Self {
        Self { event, offset: None }
    }

    pub fn offset_by(event: DateEvent, offset: DateOffset) -> Self {
        Self {
            event,
            offset: Some(offset),
        }
    }

    /// Resolves the boundary for a membership.
    ///
    /// Returns `None` when the membership lacks the event date (lifetime
    /// memberships have no end date).
    pub fn resolve(&self, membership: &Membership) -> Option<NaiveDate> {
        let base = match self.event {
            DateEvent::JoinDate => Some(membership.join_date),
            DateEvent::StartDate => Some(membership.start_date),
            DateEvent::EndDate => membership.end_date,
        }?;
        match self.offset {
            Some(offset) => offset.apply(base),
            None => Some(base),
        }
    }
}

/// How a membership qualifies for a status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusRule {
    /// Assigned by administrators only; never qualifies automatically.
    Manual,

    /// Qualifies when `start <= as_of` and, if the end resolves, `as_of <= end`.
    ///
    /// An unresolvable start never qualifies. An unresolvable end leaves the
    /// window open.
    DateWindow {
        start: DateBoundary,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end: Option<DateBoundary>,
    },
}

impl StatusRule {
    pub fn qualifies(&self, membership: &Membership, as_of: NaiveDate) -> bool {
        match self {
            StatusRule::Manual => false,
            StatusRule::DateWindow { start, end } => {
                let Some(start) = start.resolve(membership) else {
                    return false;
                };
                if as_of < start {
                    return false;
                }
                match end.and_then(|boundary| boundary.resolve(membership)) {
                    Some(end) => as_of <= end,
                    None => true,
                }
            }
        }
    }
}

/// Entry of the membership status catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipStatus {
    pub id: MembershipStatusId,

    /// Machine name, used for lookups ("Current", "Deceased").
    pub name: String,

    /// Display label.
    pub label: String,

    /// Precedence; lower weights win when several statuses qualify.
    pub weight: i32,

    #[serde(default = "default_true")]
    pub is_active: bool,

    /// Whether memberships in this status count as current members.
    #[serde(default)]
    pub is_current_member: bool,

    /// Reserved statuses ship with the system and cannot be deleted.
    #[serde(default)]
    pub is_reserved: bool,

    pub rule: StatusRule,
}

fn default_true() -> bool {
    true
}

impl MembershipStatus {
    /// Returns true for administrator-assigned statuses.
    pub fn is_manual(&self) -> bool {
        matches!(self.rule, StatusRule::Manual)
    }

    /// Catalog names match case-insensitively.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns true for the terminal Deceased status.
    pub fn is_deceased(&self) -> bool {
        self.has_name(DECEASED_STATUS_NAME)
    }

    /// Returns true when this status may be computed for the membership as of the date.
    ///
    /// Inactive, manual and Deceased statuses never qualify.
    pub fn qualifies(&self, membership: &Membership, as_of: NaiveDate) -> bool {
        self.is_active && !self.is_deceased() && self.rule.qualifies(membership, as_of)
    }

    /// The catalog installed by the initial migration.
    ///
    /// Current covers start through end date, Grace runs one month past the end
    /// date, Expired follows. Pending, Cancelled and Deceased are manual.
    pub fn default_catalog() -> Vec<MembershipStatus> {
        vec![
            MembershipStatus {
                id: MembershipStatusId::from_raw(1),
                name: "Current".to_string(),
                label: "Current".to_string(),
                weight: 1,
                is_active: true,
                is_current_member: true,
                is_reserved: false,
                rule: StatusRule::DateWindow {
                    start: DateBoundary::at(DateEvent::StartDate),
                    end: Some(DateBoundary::at(DateEvent::EndDate)),
                },
            },
            MembershipStatus {
                id: MembershipStatusId::from_raw(2),
                name: "Grace".to_string(),
                label: "Grace".to_string(),
                weight: 2,
                is_active: true,
                is_current_member: true,
                is_reserved: false,
                rule: StatusRule::DateWindow {
                    start: DateBoundary::at(DateEvent::EndDate),
                    end: Some(DateBoundary::offset_by(
                        DateEvent::EndDate,
                        DateOffset::months(1),
                    )),
                },
            },
            MembershipStatus {
                id: MembershipStatusId::from_raw(3),
                name: "Expired".to_string(),
                label: "Expired".to_string(),
                weight: 3,
                is_active: true,
                is_current_member: false,
                is_reserved: false,
                rule: StatusRule::DateWindow {
                    start: DateBoundary::offset_by(DateEvent::EndDate, DateOffset::months(1)),
                    end: None,
                },
            },
            manual_status(4, "Pending", 4),
            manual_status(5, "Cancelled", 5),
            manual_status(6, DECEASED_STATUS_NAME, 6),
        ]
    }
}

fn manual_status(id: i64, name: &str, weight: i32) -> MembershipStatus {
    MembershipStatus {
        id: MembershipStatusId::from_raw(id),
        name: name.to_string(),
        label: name.to_string(),
        weight,
        is_active: true,
        is_current_member: false,
        is_reserved: true,
        rule: StatusRule::Manual,
    }
}
