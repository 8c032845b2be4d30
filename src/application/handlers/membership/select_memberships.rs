//! MembershipSelector - builds the candidate set for a recalculation run.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, MembershipTypeId};
use crate::domain::membership::{Membership, RecalculationPlan};
use crate::ports::{MembershipFilter, MembershipRepository, MembershipTypeReader};

/// Selects the memberships a plan applies to, ordered by id ascending.
///
/// Status and test-flag filters are pushed down to the repository; the full
/// selection rule is re-applied here, including the membership type check.
pub struct MembershipSelector {
    repository: Arc<dyn MembershipRepository>,
    types: Arc<dyn MembershipTypeReader>,
}

impl MembershipSelector {
    pub fn new(
        repository: Arc<dyn MembershipRepository>,
        types: Arc<dyn MembershipTypeReader>,
    ) -> Self {
        Self { repository, types }
    }

    pub async fn select(&self, plan: &RecalculationPlan) -> Result<Vec<Membership>, DomainError> {
        let filter = MembershipFilter {
            excluded_status_ids: plan.excluded_status_ids.clone(),
            exclude_test: plan.exclude_test_memberships,
        };
        let mut memberships = self.repository.find_matching(&filter).await?;

        let type_activity: HashMap<MembershipTypeId, bool> = if plan.only_active_membership_types {
            self.types
                .list()
                .await?
                .into_iter()
                .map(|t| (t.id, t.is_active))
                .collect()
        } else {
            HashMap::new()
        };

        memberships.retain(|m| plan.selects(m, type_activity.get(&m.membership_type_id).copied()));
        memberships.sort_by_key(|m| m.id);
        Ok(memberships)
    }
}
