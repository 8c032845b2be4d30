//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Store Ports
//!
//! - `MembershipRepository` - Membership records and status rewrites
//! - `StatusCatalog` - Read-only membership status catalog
//! - `MembershipTypeReader` - Membership types and their active flag
//!
//! ## Capability Ports
//!
//! - `StatusCalculator` - Natural status of a membership on a date
//! - `Clock` - Current calendar date

mod clock;
mod membership_repository;
mod membership_type_reader;
mod status_calculator;
mod status_catalog;

pub use clock::Clock;
pub use membership_repository::{MembershipFilter, MembershipRepository};
pub use membership_type_reader::MembershipTypeReader;
pub use status_calculator::StatusCalculator;
pub use status_catalog::StatusCatalog;
