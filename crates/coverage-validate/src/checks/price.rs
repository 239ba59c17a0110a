//! Price availability (`Deckungspreis`).
//!
//! A price window is usable when the evaluation date lies between
//! `Gueltig_Von` and `Gueltig_Bis`, both inclusive.

use chrono::NaiveDate;
use coverage_model::CoverageTypeId;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{CoverageError, Result};
use crate::store::{PRICE_VALID, amount_param, row_exists};

pub fn check(
    conn: &Connection,
    coverage_type_id: CoverageTypeId,
    amount: Decimal,
    on: NaiveDate,
) -> Result<()> {
    debug!(%coverage_type_id, %amount, %on, "checking coverage price");
    let priced = row_exists(
        conn,
        PRICE_VALID,
        params![coverage_type_id.get(), amount_param(amount), on],
        "checking coverage price",
    )?;
    if !priced {
        warn!(%coverage_type_id, %amount, %on, "no valid price for coverage amount");
        return Err(CoverageError::PriceUnavailable {
            coverage_type_id,
            amount,
            on,
        });
    }
    Ok(())
}
