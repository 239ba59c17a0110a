//! Coverage validation pipeline.
//!
//! Decides whether a coverage may be attached to a contract by checking, in
//! order: contract, coverage type, product compatibility, amount, price and
//! rejection rules. Only a request that passes every step is inserted.

pub mod checks;
mod doctor;
mod engine;
mod error;
mod insert;
mod service;
mod store;

pub use doctor::{DoctorReport, OPTIONAL_TABLES, REQUIRED_TABLES, TableStatus};
pub use engine::{RejectionRuleEngine, RuleReport};
pub use error::{CoverageError, DataAccessCause, ErrorKind, Result};
pub use insert::insert_coverage;
pub use service::{CoverageService, create_coverage};
