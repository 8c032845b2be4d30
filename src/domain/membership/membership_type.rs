//! Membership types (e.g. "General", "Student").

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MembershipTypeId, ValidationError};

/// A category of membership.
///
/// Disabling a type stops new enrollments; by default the recalculation job
/// also leaves existing memberships of a disabled type untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipType {
    pub id: MembershipTypeId,
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl MembershipType {
    /// Creates an active membership type.
    pub fn new(id: MembershipTypeId, name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            id,
            name,
            is_active: true,
        })
    }

    pub fn disabled(mut self) -> Self {
        self.is_active = false;
        self
    }
}
