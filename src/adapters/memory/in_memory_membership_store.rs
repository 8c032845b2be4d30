//! In-Memory Membership Store Adapter
//!
//! Keeps memberships in a map keyed by id.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, MembershipId, MembershipStatusId};
use crate::domain::membership::Membership;
use crate::ports::{MembershipFilter, MembershipRepository};

/// In-memory membership repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMembershipStore {
    memberships: Arc<RwLock<BTreeMap<MembershipId, Membership>>>,
}

impl InMemoryMembershipStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given memberships
    pub fn with_memberships(memberships: impl IntoIterator<Item = Membership>) -> Self {
        let map = memberships.into_iter().map(|m| (m.id, m)).collect();
        Self {
            memberships: Arc::new(RwLock::new(map)),
        }
    }

    /// Insert or replace a membership.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` if the membership ends before it starts.
    pub async fn insert(&self, membership: Membership) -> Result<(), DomainError> {
        membership.validate()?;
        self.memberships.write().await.insert(membership.id, membership);
        Ok(())
    }

    /// Current status of a membership, if present
    pub async fn status_of(&self, id: &MembershipId) -> Option<MembershipStatusId> {
        self.memberships.read().await.get(id).map(|m| m.status_id)
    }

    /// Snapshot of all memberships ordered by id
    pub async fn all(&self) -> Vec<Membership> {
        self.memberships.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipStore {
    async fn find_matching(&self, filter: &MembershipFilter) -> Result<Vec<Membership>, DomainError> {
        let memberships = self.memberships.read().await;
        Ok(memberships
            .values()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError> {
        Ok(self.memberships.read().await.get(id).cloned())
    }

    async fn update_status(
        &self,
        id: &MembershipId,
        status_id: MembershipStatusId,
    ) -> Result<(), DomainError> {
        let mut memberships = self.memberships.write().await;
        match memberships.get_mut(id) {
            Some(membership) => {
                membership.assign_status(status_id);
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                format!("Membership not found: {}", id),
            )),
        }
    }
}
