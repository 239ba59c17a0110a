//! Rejection rule interpretation for coverage validation.
//!
//! Rules are stored as text thresholds (`R_Alter`, `R_Betrag`). This crate
//! parses and evaluates them without touching the store.

pub mod age;
pub mod error;
pub mod evaluation;
pub mod grammar;

pub use age::{age_at, whole_months_between};
pub use error::RuleParseError;
pub use evaluation::{RuleEvaluation, evaluate_rule};
pub use grammar::{
    AgeRule, AmountRule, age_rule_violated, amount_rule_violated, parse_age_rule,
    parse_amount_rule,
};
