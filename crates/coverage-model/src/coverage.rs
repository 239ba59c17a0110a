use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::ids::{ContractId, CoverageTypeId};

/// A proposed coverage addition: attach `coverage_type_id` with `amount` to `contract_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageRequest {
    pub contract_id: ContractId,
    pub coverage_type_id: CoverageTypeId,
    pub amount: Decimal,
}

impl CoverageRequest {
    pub fn new(contract_id: ContractId, coverage_type_id: CoverageTypeId, amount: Decimal) -> Self {
        Self {
            contract_id,
            coverage_type_id,
            amount,
        }
    }
}

impl fmt::Display for CoverageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "contract {} / coverage type {} / amount {}",
            self.contract_id, self.coverage_type_id, self.amount
        )
    }
}

/// A `Deckung` row. Created once by a successful validation and never updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageRecord {
    pub contract_id: ContractId,
    pub coverage_type_id: CoverageTypeId,
    pub amount: Decimal,
}

impl From<CoverageRequest> for CoverageRecord {
    fn from(request: CoverageRequest) -> Self {
        Self {
            contract_id: request.contract_id,
            coverage_type_id: request.coverage_type_id,
            amount: request.amount,
        }
    }
}

/// Parse a coverage amount as an exact decimal.
///
/// Only the textual shape is checked; whether the amount is offered for a
/// coverage type is decided by the store.
pub fn parse_amount(value: &str) -> Result<Decimal> {
    Decimal::from_str(value.trim()).map_err(|_| ModelError::InvalidAmount(value.to_string()))
}
