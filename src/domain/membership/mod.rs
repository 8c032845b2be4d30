//! Membership domain module.
//!
//! Memberships, their types, the status catalog entries and the value types
//! of the status recalculation job.
//!
//! # Module Structure
//!
//! - `aggregate` - Membership aggregate entity
//! - `membership_type` - Membership categories and their active flag
//! - `status` - Status catalog entries and qualification rules
//! - `request` - Job request and its resolved plan
//! - `summary` - Run outcome and per-record failures
//! - `errors` - Errors that abort a run

mod aggregate;
mod errors;
mod membership_type;
mod request;
mod status;
mod summary;

pub use aggregate::{Membership, StatusOverride};
pub use errors::MembershipJobError;
pub use membership_type::MembershipType;
pub use request::{
    RecalculationDefaults, RecalculationPlan, RecalculationRequest, EXCLUDED_STATUS_IDS_FIELD,
};
pub use status::{
    DateBoundary, DateEvent, DateOffset, MembershipStatus, OffsetUnit, StatusRule,
    DECEASED_STATUS_NAME, DEFAULT_EXCLUDED_STATUS_NAMES,
};
pub use summary::{RecalculationSummary, RecordFailure, StatusChange};
