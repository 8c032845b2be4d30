//! Status calculation adapters.

mod rule_based_calculator;

pub use rule_based_calculator::RuleBasedStatusCalculator;
