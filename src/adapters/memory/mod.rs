//! In-Memory Adapters
//!
//! Implementations of the store ports backed by process memory.
//!
//! ## Available Adapters
//!
//! - **InMemoryMembershipStore** - `MembershipRepository`
//! - **InMemoryStatusCatalog** - `StatusCatalog`, built-in or loaded from YAML
//! - **InMemoryMembershipTypes** - `MembershipTypeReader`
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::memory::{InMemoryMembershipStore, InMemoryStatusCatalog};
//!
//! let catalog = InMemoryStatusCatalog::from_yaml_file("catalog.yaml").await?;
//! let store = InMemoryMembershipStore::with_memberships(fixtures);
//! ```

mod in_memory_membership_store;
mod in_memory_membership_types;
mod in_memory_status_catalog;

pub use in_memory_membership_store::InMemoryMembershipStore;
pub use in_memory_membership_types::InMemoryMembershipTypes;
pub use in_memory_status_catalog::InMemoryStatusCatalog;
