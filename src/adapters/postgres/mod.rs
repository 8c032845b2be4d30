//! PostgreSQL adapters - Database implementations for the store ports.
//!
//! - `PostgresMembershipRepository` - Membership rows and status rewrites
//! - `PostgresStatusCatalog` - Status catalog with flattened rule columns
//! - `PostgresMembershipTypeReader` - Membership types
//!
//! The schema lives in `migrations/` at the crate root.

mod membership_repository;
mod membership_type_reader;
mod status_catalog;

pub use membership_repository::PostgresMembershipRepository;
pub use membership_type_reader::PostgresMembershipTypeReader;
pub use status_catalog::PostgresStatusCatalog;
