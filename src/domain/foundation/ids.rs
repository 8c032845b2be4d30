//! Strongly-typed identifier value objects.
//!
//! Records owned by the membership store use database-assigned integer keys.
//! Job runs are identified by a random UUID so log lines can be correlated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for a membership record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MembershipId(i64);

impl MembershipId {
    /// Creates a MembershipId, rejecting non-positive keys.
    pub fn new(id: i64) -> Result<Self, ValidationError> {
        if id <= 0 {
            return Err(ValidationError::below_minimum("membership_id", 1, id));
        }
        Ok(Self(id))
    }

    /// Wraps a key already known to be valid (e.g. read back from the database).
    pub fn from_raw(id: i64) -> Self {
        Self(id)
    }

    /// Returns the inner key.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for MembershipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MembershipId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Identifier of the contact (person or organization) holding a membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(i64);

impl ContactId {
    /// Creates a ContactId, rejecting non-positive keys.
    pub fn new(id: i64) -> Result<Self, ValidationError> {
        if id <= 0 {
            return Err(ValidationError::below_minimum("contact_id", 1, id));
        }
        Ok(Self(id))
    }

    /// Wraps a key already known to be valid.
    pub fn from_raw(id: i64) -> Self {
        Self(id)
    }

    /// Returns the inner key.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a membership type (e.g. "General").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MembershipTypeId(i64);

impl MembershipTypeId {
    /// Creates a MembershipTypeId, rejecting non-positive keys.
    pub fn new(id: i64) -> Result<Self, ValidationError> {
        if id <= 0 {
            return Err(ValidationError::below_minimum("membership_type_id", 1, id));
        }
        Ok(Self(id))
    }

    /// Wraps a key already known to be valid.
    pub fn from_raw(id: i64) -> Self {
        Self(id)
    }

    /// Returns the inner key.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for MembershipTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a membership status in the status catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MembershipStatusId(i64);

impl MembershipStatusId {
    /// Creates a MembershipStatusId, rejecting non-positive keys.
    pub fn new(id: i64) -> Result<Self, ValidationError> {
        if id <= 0 {
            return Err(ValidationError::below_minimum("membership_status_id", 1, id));
        }
        Ok(Self(id))
    }

    /// Wraps a key already known to be valid.
    pub fn from_raw(id: i64) -> Self {
        Self(id)
    }

    /// Returns the inner key.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for MembershipStatusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MembershipStatusId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Unique identifier for one execution of the recalculation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobRunId(Uuid);

impl JobRunId {
    /// Creates a new random JobRunId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a JobRunId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for JobRunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobRunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_id_accepts_positive_key() {
        let id = MembershipId::new(42).unwrap();
        assert_eq!(id.as_i64(), 42);
    }

    #[test]
    fn membership_id_rejects_zero_and_negative_keys() {
        assert!(MembershipId::new(0).is_err());
        match MembershipId::new(-3) {
            Err(ValidationError::BelowMinimum { field, actual, .. }) => {
                assert_eq!(field, "membership_id");
                assert_eq!(actual, -3);
            }
            other => panic!("Expected BelowMinimum error, got {:?}", other),
        }
    }

    #[test]
    fn membership_ids_order_by_key() {
        let mut ids = vec![
            MembershipId::from_raw(7),
            MembershipId::from_raw(2),
            MembershipId::from_raw(5),
        ];
        ids.sort();
        assert_eq!(
            ids.iter().map(MembershipId::as_i64).collect::<Vec<_>>(),
            vec![2, 5, 7]
        );
    }

    #[test]
    fn membership_id_parses_from_string() {
        let id: MembershipId = "17".parse().unwrap();
        assert_eq!(id, MembershipId::from_raw(17));
        assert!("abc".parse::<MembershipId>().is_err());
    }

    #[test]
    fn status_id_serializes_as_bare_number() {
        let id = MembershipStatusId::from_raw(3);
        assert_eq!(serde_json::to_string(&id).unwrap(), "3");

        let parsed: MembershipStatusId = serde_json::from_str("5").unwrap();
        assert_eq!(parsed.as_i64(), 5);
    }

    #[test]
    fn type_and_contact_ids_reject_non_positive_keys() {
        assert!(MembershipTypeId::new(0).is_err());
        assert!(ContactId::new(-1).is_err());
        assert!(MembershipTypeId::new(1).is_ok());
    }

    #[test]
    fn job_run_id_generates_unique_values() {
        let id1 = JobRunId::new();
        let id2 = JobRunId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn job_run_id_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = JobRunId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
        assert_eq!(id.to_string(), uuid.to_string());
    }
}
