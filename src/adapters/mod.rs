//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - PostgreSQL-backed stores (sqlx)
//! - `memory` - In-memory stores, including a YAML-loaded status catalog
//! - `status` - Rule-based status calculator
//! - `clock` - System and fixed clocks

pub mod clock;
pub mod memory;
pub mod postgres;
pub mod status;

pub use clock::{FixedClock, SystemClock};
pub use memory::{InMemoryMembershipStore, InMemoryMembershipTypes, InMemoryStatusCatalog};
pub use postgres::{PostgresMembershipRepository, PostgresMembershipTypeReader, PostgresStatusCatalog};
pub use status::RuleBasedStatusCalculator;
