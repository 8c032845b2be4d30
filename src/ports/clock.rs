//! Clock port.
//!
//! Status rules are evaluated against "today". Injecting the clock keeps runs
//! reproducible in tests.

use chrono::NaiveDate;

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}
