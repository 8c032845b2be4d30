//! Errors that abort a recalculation run.
//!
//! Per-record persistence failures do not abort a run; they are collected as
//! [`RecordFailure`](super::RecordFailure) entries in the run summary.
//!
//! | Error | Raised when |
//! |-------|-------------|
//! | InvalidParameter | An excluded status id is not in the catalog |
//! | Infrastructure | The catalog, type store or membership store cannot be read |

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors that fail a whole recalculation run before any write happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipJobError {
    /// A request parameter refers to something that does not exist.
    InvalidParameter { field: String, message: String },

    /// A collaborator could not be read.
    Infrastructure(String),
}

impl MembershipJobError {
    pub fn invalid_parameter(field: impl Into<String>, message: impl Into<String>) -> Self {
        MembershipJobError::InvalidParameter {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipJobError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipJobError::InvalidParameter { .. } => ErrorCode::InvalidParameter,
            MembershipJobError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a human-readable error message.
    pub fn message(&self) -> String {
        match self {
            MembershipJobError::InvalidParameter { field, message } => {
                format!("Invalid parameter '{}': {}", field, message)
            }
            MembershipJobError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if running the job again may succeed without changing the request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, MembershipJobError::Infrastructure(_))
    }
}

impl std::fmt::Display for MembershipJobError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MembershipJobError {}

impl From<DomainError> for MembershipJobError {
    fn from(err: DomainError) -> Self {
        // Malformed store records are infrastructure, not a bad request.
        match err.code {
            ErrorCode::InvalidParameter => {
                MembershipJobError::InvalidParameter {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: err.message,
                }
            }
            _ => MembershipJobError::Infrastructure(err.to_string()),
        }
    }
}

impl From<MembershipJobError> for DomainError {
    fn from(err: MembershipJobError) -> Self {
        let domain = DomainError::new(err.code(), err.message());
        match err {
            MembershipJobError::InvalidParameter { field, .. } => domain.with_detail("field", field),
            MembershipJobError::Infrastructure(_) => domain,
        }
    }
}
