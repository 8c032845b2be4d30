//! Membership repository port.
//!
//! Defines the contract for reading membership records and rewriting their
//! status. Memberships are created and deleted elsewhere; this port only
//! exposes what the recalculation job needs.
//!
//! # Example
//!
//! ```ignore
//! async fn reassign(
//!     repo: &dyn MembershipRepository,
//!     id: &MembershipId,
//!     to: MembershipStatusId,
//! ) -> Result<(), DomainError> {
//!     let membership = repo
//!         .find_by_id(id)
//!         .await?
//!         .ok_or_else(|| DomainError::new(ErrorCode::MembershipNotFound, "Membership not found"))?;
//!     if membership.status_id != to {
//!         repo.update_status(&membership.id, to).await?;
//!     }
//!     Ok(())
//! }
//! ```

use std::collections::BTreeSet;

use crate::domain::foundation::{DomainError, MembershipId, MembershipStatusId};
use crate::domain::membership::Membership;
use async_trait::async_trait;

/// Criteria an implementation may push down to storage.
///
/// Implementations are free to return a superset of the matching records; the
/// caller re-applies the full selection rule. They must not drop matching
/// records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipFilter {
    pub excluded_status_ids: BTreeSet<MembershipStatusId>,
    pub exclude_test: bool,
}

impl MembershipFilter {
    pub fn matches(&self, membership: &Membership) -> bool {
        !self.excluded_status_ids.contains(&membership.status_id)
            && !(self.exclude_test && membership.is_test)
    }
}

/// Repository port for membership records.
///
/// Implementations must ensure:
/// - `find_matching` returns memberships ordered by id ascending
/// - `update_status` touches nothing but the status column
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Read every membership matching the filter, ordered by id ascending.
    async fn find_matching(&self, filter: &MembershipFilter) -> Result<Vec<Membership>, DomainError>;

    /// Find a membership by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError>;

    /// Rewrite the status of one membership.
    ///
    /// # Errors
    ///
    /// - `MembershipNotFound` if the membership doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update_status(
        &self,
        id: &MembershipId,
        status_id: MembershipStatusId,
    ) -> Result<(), DomainError>;
}
