//! Status catalog port (read-only).
//!
//! The catalog is configured by administrators and read by the job once per
//! run. Lookups by name are case-insensitive.

use crate::domain::foundation::{DomainError, MembershipStatusId};
use crate::domain::membership::MembershipStatus;
use async_trait::async_trait;

/// Read-only access to the membership status catalog.
#[async_trait]
pub trait StatusCatalog: Send + Sync {
    /// All statuses, ordered by weight then id.
    async fn list(&self) -> Result<Vec<MembershipStatus>, DomainError>;

    /// Find a status by id. Returns `None` if absent.
    async fn find_by_id(
        &self,
        id: MembershipStatusId,
    ) -> Result<Option<MembershipStatus>, DomainError>;

    /// Find a status by machine name. Returns `None` if absent.
    async fn find_by_name(&self, name: &str) -> Result<Option<MembershipStatus>, DomainError>;
}
