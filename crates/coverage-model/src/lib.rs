pub mod coverage;
pub mod error;
pub mod ids;
pub mod rule;

pub use coverage::{CoverageRecord, CoverageRequest, parse_amount};
pub use error::{ModelError, Result};
pub use ids::{ContractId, CoverageTypeId};
pub use rule::{NO_AMOUNT_RULE, RejectionRule};
