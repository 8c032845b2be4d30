//! Membership Status Job - scheduled recalculation of membership statuses
//!
//! Moves every eligible membership to the status its dates call for
//! (Current, Grace, Expired, ...) according to the rules of the status
//! catalog, leaving Deceased, administratively held and excluded memberships
//! untouched.
//!
//! The entry point is [`application::ProcessMembershipsHandler`].

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
