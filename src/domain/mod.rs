//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `membership` - Memberships, status catalog entries and recalculation types

pub mod foundation;
pub mod membership;
