//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and error types
//! that form the vocabulary of the membership domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ContactId, JobRunId, MembershipId, MembershipStatusId, MembershipTypeId};
pub use timestamp::Timestamp;
