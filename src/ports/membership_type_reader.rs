//! Membership type reader port.

use crate::domain::foundation::{DomainError, MembershipTypeId};
use crate::domain::membership::MembershipType;
use async_trait::async_trait;

/// Read access to membership types.
#[async_trait]
pub trait MembershipTypeReader: Send + Sync {
    /// All membership types, active or not, ordered by id.
    async fn list(&self) -> Result<Vec<MembershipType>, DomainError>;

    /// Find a membership type by id. Returns `None` if absent.
    async fn find_by_id(&self, id: MembershipTypeId) -> Result<Option<MembershipType>, DomainError>;
}
