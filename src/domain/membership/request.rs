//! Recalculation request and its resolved plan.
//!
//! A [`RecalculationRequest`] is what a caller passes in: every field optional.
//! [`RecalculationPlan::resolve`] turns it into the concrete settings for one
//! run, once, against the status catalog. Nothing downstream looks at the raw
//! request again.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::MembershipStatusId;

use super::{
    Membership, MembershipJobError, MembershipStatus, DEFAULT_EXCLUDED_STATUS_NAMES,
};

/// Field name reported when an excluded status id is unknown.
pub const EXCLUDED_STATUS_IDS_FIELD: &str = "exclude_membership_status_ids";

/// Parameters of one job invocation. Unset fields take the configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecalculationRequest {
    #[serde(default)]
    pub exclude_test_memberships: Option<bool>,

    #[serde(default)]
    pub only_active_membership_types: Option<bool>,

    #[serde(default)]
    pub exclude_membership_status_ids: Option<Vec<MembershipStatusId>>,
}

impl RecalculationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exclude_test_memberships(mut self, exclude: bool) -> Self {
        self.exclude_test_memberships = Some(exclude);
        self
    }

    pub fn only_active_membership_types(mut self, only_active: bool) -> Self {
        self.only_active_membership_types = Some(only_active);
        self
    }

    pub fn exclude_status_ids(mut self, ids: impl IntoIterator<Item = MembershipStatusId>) -> Self {
        self.exclude_membership_status_ids = Some(ids.into_iter().collect());
        self
    }
}

/// Values used for request fields the caller leaves unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecalculationDefaults {
    pub exclude_test_memberships: bool,
    pub only_active_membership_types: bool,
    /// Resolved by name against the catalog; names absent from it are ignored.
    pub excluded_status_names: Vec<String>,
}

impl Default for RecalculationDefaults {
    fn default() -> Self {
        Self {
            exclude_test_memberships: true,
            only_active_membership_types: true,
            excluded_status_names: DEFAULT_EXCLUDED_STATUS_NAMES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecalculationPlan {
    pub as_of: NaiveDate,
    pub exclude_test_memberships: bool,
    pub only_active_membership_types: bool,
    /// Requested (or default) exclusions plus the Deceased status.
    pub excluded_status_ids: BTreeSet<MembershipStatusId>,
    pub deceased_status_id: Option<MembershipStatusId>,
    /// Default exclusion names that matched no catalog entry.
    pub unresolved_default_names: Vec<String>,
}

impl RecalculationPlan {
    /// Resolves a request against the catalog.
    ///
    /// Takes the catalog as listed once for the run, so every id check and
    /// name lookup in the plan sees the same snapshot.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if an explicitly excluded status id is not in
    /// the catalog.
    pub fn resolve(
        request: &RecalculationRequest,
        defaults: &RecalculationDefaults,
        catalog: &[MembershipStatus],
        as_of: NaiveDate,
    ) -> Result<Self, MembershipJobError> {
        let mut unresolved_default_names = Vec::new();

        let mut excluded_status_ids: BTreeSet<MembershipStatusId> =
            match &request.exclude_membership_status_ids {
                Some(ids) => {
                    let unknown: Vec<String> = ids
                        .iter()
                        .filter(|id| !catalog.iter().any(|status| status.id == **id))
                        .map(|id| id.to_string())
                        .collect();
                    if !unknown.is_empty() {
                        return Err(MembershipJobError::invalid_parameter(
                            EXCLUDED_STATUS_IDS_FIELD,
                            format!("unknown membership status id(s): {}", unknown.join(", ")),
                        ));
                    }
                    ids.iter().copied().collect()
                }
                None => {
                    let mut ids = BTreeSet::new();
                    for name in &defaults.excluded_status_names {
                        match catalog.iter().find(|status| status.has_name(name)) {
                            Some(status) => {
                                ids.insert(status.id);
                            }
                            None => unresolved_default_names.push(name.clone()),
                        }
                    }
                    ids
                }
            };

        let deceased_status_id = catalog
            .iter()
            .find(|status| status.is_deceased())
            .map(|status| status.id);
        if let Some(id) = deceased_status_id {
            excluded_status_ids.insert(id);
        }

        Ok(Self {
            as_of,
            exclude_test_memberships: request
                .exclude_test_memberships
                .unwrap_or(defaults.exclude_test_memberships),
            only_active_membership_types: request
                .only_active_membership_types
                .unwrap_or(defaults.only_active_membership_types),
            excluded_status_ids,
            deceased_status_id,
            unresolved_default_names,
        })
    }

    /// Returns true if the status keeps a membership out of the run.
    pub fn excludes_status(&self, status_id: MembershipStatusId) -> bool {
        self.excluded_status_ids.contains(&status_id)
    }

    /// Selection rule for one membership.
    ///
    /// `type_is_active` is `None` when the membership type is unknown, which
    /// counts as inactive.
    pub fn selects(&self, membership: &Membership, type_is_active: Option<bool>) -> bool {
        if self.excludes_status(membership.status_id) {
            return false;
        }
        if self.exclude_test_memberships && membership.is_test {
            return false;
        }
        if self.only_active_membership_types && !type_is_active.unwrap_or(false) {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ContactId, MembershipId, MembershipTypeId};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn status_id(catalog: &[MembershipStatus], name: &str) -> MembershipStatusId {
        catalog.iter().find(|s| s.has_name(name)).unwrap().id
    }

    fn membership(status: MembershipStatusId) -> Membership {
        Membership::new(
            MembershipId::from_raw(1),
            ContactId::from_raw(1),
            MembershipTypeId::from_raw(1),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Some(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()),
            status,
        )
    }

    #[test]
    fn defaults_exclude_pending_cancelled_expired_and_deceased() {
        let catalog = MembershipStatus::default_catalog();
        let plan = RecalculationPlan::resolve(
            &RecalculationRequest::new(),
            &RecalculationDefaults::default(),
            &catalog,
            today(),
        )
        .unwrap();

        let expected: BTreeSet<_> = ["Pending", "Cancelled", "Expired", "Deceased"]
            .iter()
            .map(|name| status_id(&catalog, name))
            .collect();
        assert_eq!(plan.excluded_status_ids, expected);
        assert!(plan.exclude_test_memberships);
        assert!(plan.only_active_membership_types);
        assert!(plan.unresolved_default_names.is_empty());
    }

    #[test]
    fn explicit_exclusions_replace_defaults_but_keep_deceased() {
        let catalog = MembershipStatus::default_catalog();
        let cancelled = status_id(&catalog, "Cancelled");
        let request = RecalculationRequest::new().exclude_status_ids([cancelled]);

        let plan =
            RecalculationPlan::resolve(&request, &RecalculationDefaults::default(), &catalog, today())
                .unwrap();

        let expected: BTreeSet<_> = [cancelled, status_id(&catalog, "Deceased")].into();
        assert_eq!(plan.excluded_status_ids, expected);
        assert!(!plan.excludes_status(status_id(&catalog, "Pending")));
    }

    #[test]
    fn empty_explicit_exclusions_still_exclude_deceased() {
        let catalog = MembershipStatus::default_catalog();
        let request = RecalculationRequest::new().exclude_status_ids(Vec::<MembershipStatusId>::new());

        let plan =
            RecalculationPlan::resolve(&request, &RecalculationDefaults::default(), &catalog, today())
                .unwrap();

        assert_eq!(plan.excluded_status_ids.len(), 1);
        assert!(plan.excludes_status(status_id(&catalog, "Deceased")));
    }

    #[test]
    fn unknown_excluded_status_id_is_invalid_parameter() {
        let catalog = MembershipStatus::default_catalog();
        let request = RecalculationRequest::new()
            .exclude_status_ids([MembershipStatusId::from_raw(1), MembershipStatusId::from_raw(99)]);

        let err =
            RecalculationPlan::resolve(&request, &RecalculationDefaults::default(), &catalog, today())
                .unwrap_err();

        match err {
            MembershipJobError::InvalidParameter { field, message } => {
                assert_eq!(field, EXCLUDED_STATUS_IDS_FIELD);
                assert!(message.contains("99"));
            }
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn request_flags_override_defaults() {
        let catalog = MembershipStatus::default_catalog();
        let request = RecalculationRequest::new()
            .exclude_test_memberships(false)
            .only_active_membership_types(false);

        let plan =
            RecalculationPlan::resolve(&request, &RecalculationDefaults::default(), &catalog, today())
                .unwrap();

        assert!(!plan.exclude_test_memberships);
        assert!(!plan.only_active_membership_types);
    }

    #[test]
    fn default_names_missing_from_catalog_are_reported() {
        let catalog: Vec<_> = MembershipStatus::default_catalog()
            .into_iter()
            .filter(|s| s.name != "Pending")
            .collect();

        let plan = RecalculationPlan::resolve(
            &RecalculationRequest::new(),
            &RecalculationDefaults::default(),
            &catalog,
            today(),
        )
        .unwrap();

        assert_eq!(plan.unresolved_default_names, vec!["Pending".to_string()]);
    }

    #[test]
    fn default_names_resolve_like_the_catalog_port() {
        let catalog: Vec<_> = MembershipStatus::default_catalog()
            .into_iter()
            .map(|mut s| {
                s.name = s.name.to_uppercase();
                s
            })
            .collect();

        let plan = RecalculationPlan::resolve(
            &RecalculationRequest::new(),
            &RecalculationDefaults::default(),
            &catalog,
            today(),
        )
        .unwrap();

        assert!(plan.unresolved_default_names.is_empty());
        assert_eq!(plan.excluded_status_ids.len(), 4);
        assert_eq!(plan.deceased_status_id, Some(status_id(&catalog, "deceased")));
    }

    #[test]
    fn catalog_without_deceased_has_no_implicit_exclusion() {
        let catalog: Vec<_> = MembershipStatus::default_catalog()
            .into_iter()
            .filter(|s| !s.is_deceased())
            .collect();

        let plan = RecalculationPlan::resolve(
            &RecalculationRequest::new().exclude_status_ids(Vec::<MembershipStatusId>::new()),
            &RecalculationDefaults::default(),
            &catalog,
            today(),
        )
        .unwrap();

        assert_eq!(plan.deceased_status_id, None);
        assert!(plan.excluded_status_ids.is_empty());
    }

    #[test]
    fn selects_applies_all_three_filters() {
        let catalog = MembershipStatus::default_catalog();
        let plan = RecalculationPlan::resolve(
            &RecalculationRequest::new(),
            &RecalculationDefaults::default(),
            &catalog,
            today(),
        )
        .unwrap();
        let grace = status_id(&catalog, "Grace");

        assert!(plan.selects(&membership(grace), Some(true)));
        assert!(!plan.selects(&membership(status_id(&catalog, "Pending")), Some(true)));
        assert!(!plan.selects(&membership(grace).as_test(), Some(true)));
        assert!(!plan.selects(&membership(grace), Some(false)));
        assert!(!plan.selects(&membership(grace), None));
    }

    #[test]
    fn request_deserializes_with_missing_fields() {
        let request: RecalculationRequest =
            serde_json::from_str(r#"{"exclude_membership_status_ids": [5]}"#).unwrap();
        assert_eq!(request.exclude_test_memberships, None);
        assert_eq!(
            request.exclude_membership_status_ids,
            Some(vec![MembershipStatusId::from_raw(5)])
        );
    }
}
