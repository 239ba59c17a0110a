//! Error types for coverage validation.

use chrono::NaiveDate;
use coverage_model::{ContractId, CoverageTypeId};
use coverage_rules::RuleParseError;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Why a coverage request was not persisted.
///
/// Every variant except [`CoverageError::DataAccess`] is a business rejection
/// produced by one step of the pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoverageError {
    /// No `Vertrag` row with this id.
    #[error("contract {0} does not exist")]
    ContractNotFound(ContractId),

    /// No `Deckungsart` row with this id.
    #[error("coverage type {0} does not exist")]
    CoverageTypeNotFound(CoverageTypeId),

    /// Coverage type belongs to a different product than the contract.
    #[error(
        "coverage type {coverage_type_id} does not belong to the product of contract {contract_id}"
    )]
    ProductMismatch {
        contract_id: ContractId,
        coverage_type_id: CoverageTypeId,
    },

    /// Amount is not listed in `Deckungsbetrag` for the coverage type.
    #[error("amount {amount} is not offered for coverage type {coverage_type_id}")]
    InvalidAmount {
        coverage_type_id: CoverageTypeId,
        amount: Decimal,
    },

    /// No `Deckungspreis` window covers the evaluation date.
    #[error("no price valid on {on} for coverage type {coverage_type_id} with amount {amount}")]
    PriceUnavailable {
        coverage_type_id: CoverageTypeId,
        amount: Decimal,
        on: NaiveDate,
    },

    /// A rejection rule matched.
    #[error("coverage type {coverage_type_id} is rejected by rule {rule_sequence}")]
    RuleViolation {
        coverage_type_id: CoverageTypeId,
        /// `LfdNr` of the first matching row.
        rule_sequence: i64,
    },

    /// The store failed or behaved unexpectedly.
    #[error("data access failed while {operation}: {source}")]
    DataAccess {
        operation: &'static str,
        #[source]
        source: DataAccessCause,
    },
}

/// Underlying cause of a [`CoverageError::DataAccess`].
#[derive(Debug, Error)]
pub enum DataAccessCause {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("expected exactly 1 affected row, got {0}")]
    UnexpectedRowCount(usize),

    #[error(transparent)]
    RuleText(#[from] RuleParseError),
}

/// Stable tag for a [`CoverageError`], for callers that only need the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ContractNotFound,
    CoverageTypeNotFound,
    ProductMismatch,
    InvalidAmount,
    PriceUnavailable,
    RuleViolation,
    DataAccess,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContractNotFound => "contract_not_found",
            Self::CoverageTypeNotFound => "coverage_type_not_found",
            Self::ProductMismatch => "product_mismatch",
            Self::InvalidAmount => "invalid_amount",
            Self::PriceUnavailable => "price_unavailable",
            Self::RuleViolation => "rule_violation",
            Self::DataAccess => "data_access",
        }
    }
}

impl CoverageError {
    pub(crate) fn data_access(operation: &'static str, cause: impl Into<DataAccessCause>) -> Self {
        Self::DataAccess {
            operation,
            source: cause.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ContractNotFound(_) => ErrorKind::ContractNotFound,
            Self::CoverageTypeNotFound(_) => ErrorKind::CoverageTypeNotFound,
            Self::ProductMismatch { .. } => ErrorKind::ProductMismatch,
            Self::InvalidAmount { .. } => ErrorKind::InvalidAmount,
            Self::PriceUnavailable { .. } => ErrorKind::PriceUnavailable,
            Self::RuleViolation { .. } => ErrorKind::RuleViolation,
            Self::DataAccess { .. } => ErrorKind::DataAccess,
        }
    }

    /// Returns whether the request was refused by a business rule, as opposed
    /// to failing inside the store.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::DataAccess { .. })
    }
}

/// Result type alias for coverage validation.
pub type Result<T> = std::result::Result<T, CoverageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let err = CoverageError::ContractNotFound(ContractId::new(4));
        assert_eq!(err.kind(), ErrorKind::ContractNotFound);
        assert_eq!(err.kind().as_str(), "contract_not_found");

        let err = CoverageError::RuleViolation {
            coverage_type_id: CoverageTypeId::new(7),
            rule_sequence: 2,
        };
        assert_eq!(err.kind(), ErrorKind::RuleViolation);
    }

    #[test]
    fn test_rejection_vs_failure() {
        assert!(CoverageError::CoverageTypeNotFound(CoverageTypeId::new(1)).is_rejection());
        let err = CoverageError::data_access(
            "inserting coverage",
            DataAccessCause::UnexpectedRowCount(0),
        );
        assert!(!err.is_rejection());
        assert_eq!(err.kind(), ErrorKind::DataAccess);
    }

    #[test]
    fn test_data_access_keeps_source() {
        use std::error::Error as _;

        let err = CoverageError::data_access(
            "checking contract",
            rusqlite::Error::InvalidQuery,
        );
        let source = err.source().expect("source preserved");
        assert_eq!(source.to_string(), rusqlite::Error::InvalidQuery.to_string());
    }

    #[test]
    fn test_messages() {
        insta::assert_snapshot!(
            CoverageError::ContractNotFound(ContractId::new(42)).to_string(),
            @"contract 42 does not exist"
        );
        insta::assert_snapshot!(
            CoverageError::data_access("inserting coverage", DataAccessCause::UnexpectedRowCount(2))
                .to_string(),
            @"data access failed while inserting coverage: expected exactly 1 affected row, got 2"
        );
    }
}
