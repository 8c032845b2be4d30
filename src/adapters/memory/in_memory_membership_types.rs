//! In-Memory Membership Type Adapter

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, MembershipTypeId};
use crate::domain::membership::MembershipType;
use crate::ports::MembershipTypeReader;

/// In-memory membership type store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMembershipTypes {
    types: Arc<RwLock<BTreeMap<MembershipTypeId, MembershipType>>>,
}

impl InMemoryMembershipTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_types(types: impl IntoIterator<Item = MembershipType>) -> Self {
        let map = types.into_iter().map(|t| (t.id, t)).collect();
        Self {
            types: Arc::new(RwLock::new(map)),
        }
    }

    /// Enable or disable a type. Returns false if the type is unknown.
    pub async fn set_active(&self, id: MembershipTypeId, is_active: bool) -> bool {
        match self.types.write().await.get_mut(&id) {
            Some(membership_type) => {
                membership_type.is_active = is_active;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl MembershipTypeReader for InMemoryMembershipTypes {
    async fn list(&self) -> Result<Vec<MembershipType>, DomainError> {
        Ok(self.types.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: MembershipTypeId) -> Result<Option<MembershipType>, DomainError> {
        Ok(self.types.read().await.get(&id).cloned())
    }
}
