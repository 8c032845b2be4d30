//! Recalculation job configuration
//!
//! List values are comma-separated so they can be set from a single
//! environment variable.

use serde::Deserialize;

use crate::domain::foundation::MembershipStatusId;
use crate::domain::membership::{
    RecalculationDefaults, RecalculationRequest, DEFAULT_EXCLUDED_STATUS_NAMES,
};

use super::error::ValidationError;

/// Job configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    /// Skip memberships flagged as test data unless a request says otherwise
    #[serde(default = "default_true")]
    pub exclude_test_memberships: bool,

    /// Skip memberships of disabled types unless a request says otherwise
    #[serde(default = "default_true")]
    pub only_active_membership_types: bool,

    /// Status names excluded when no explicit ids are given
    #[serde(default = "default_excluded_status_names")]
    pub default_excluded_status_names: String,

    /// Explicit excluded status ids; replaces the default names when set
    #[serde(default)]
    pub exclude_membership_status_ids: Option<String>,
}

impl JobConfig {
    /// Default exclusion names, trimmed, blanks dropped
    pub fn excluded_status_names(&self) -> Vec<String> {
        split_list(&self.default_excluded_status_names)
            .map(str::to_string)
            .collect()
    }

    /// Parsed explicit exclusions, if configured
    pub fn excluded_status_ids(&self) -> Result<Option<Vec<MembershipStatusId>>, ValidationError> {
        let Some(raw) = &self.exclude_membership_status_ids else {
            return Ok(None);
        };
        split_list(raw)
            .map(|item| {
                item.parse::<i64>()
                    .ok()
                    .and_then(|value| MembershipStatusId::new(value).ok())
                    .ok_or_else(|| ValidationError::InvalidExcludedStatusId(item.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Values the handler falls back to for unset request fields
    pub fn defaults(&self) -> RecalculationDefaults {
        RecalculationDefaults {
            exclude_test_memberships: self.exclude_test_memberships,
            only_active_membership_types: self.only_active_membership_types,
            excluded_status_names: self.excluded_status_names(),
        }
    }

    /// Request for a scheduled run
    pub fn request(&self) -> Result<RecalculationRequest, ValidationError> {
        Ok(RecalculationRequest {
            exclude_membership_status_ids: self.excluded_status_ids()?,
            ..RecalculationRequest::default()
        })
    }

    /// Validate job configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let names = &self.default_excluded_status_names;
        if !names.trim().is_empty() && names.split(',').any(|name| name.trim().is_empty()) {
            return Err(ValidationError::BlankExcludedStatusName);
        }
        self.excluded_status_ids()?;
        Ok(())
    }
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            exclude_test_memberships: true,
            only_active_membership_types: true,
            default_excluded_status_names: default_excluded_status_names(),
            exclude_membership_status_ids: None,
        }
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|item| !item.is_empty())
}

fn default_true() -> bool {
    true
}

fn default_excluded_status_names() -> String {
    DEFAULT_EXCLUDED_STATUS_NAMES.join(",")
}
