//! Membership handlers.
//!
//! ## Commands
//! - Recalculating membership statuses from their dates
//!
//! The selection and per-membership decision steps are exposed for callers
//! that want to preview a run without writing.

mod process_memberships;
mod recalculate_status;
mod select_memberships;

pub use process_memberships::{ProcessMembershipsCommand, ProcessMembershipsHandler};
pub use recalculate_status::{recalculate, Recalculation};
pub use select_memberships::MembershipSelector;
