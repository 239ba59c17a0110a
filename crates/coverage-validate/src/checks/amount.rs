//! Coverage amount validity (`Deckungsbetrag`).

use coverage_model::CoverageTypeId;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{CoverageError, Result};
use crate::store::{AMOUNT_LISTED, amount_param, row_exists};

/// Fail unless `amount` is one of the amounts listed for the coverage type.
pub fn check(conn: &Connection, coverage_type_id: CoverageTypeId, amount: Decimal) -> Result<()> {
    debug!(%coverage_type_id, %amount, "checking coverage amount");
    let listed = row_exists(
        conn,
        AMOUNT_LISTED,
        params![coverage_type_id.get(), amount_param(amount)],
        "checking coverage amount",
    )?;
    if !listed {
        warn!(%coverage_type_id, %amount, "amount is not offered for coverage type");
        return Err(CoverageError::InvalidAmount {
            coverage_type_id,
            amount,
        });
    }
    Ok(())
}
