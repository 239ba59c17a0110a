//! Lookup checks.
//!
//! Each module runs one existence query and fails with its own error kind.
//! They are read-only and may be repeated freely.

pub mod amount;
pub mod contract;
pub mod coverage_type;
pub mod price;
pub mod product;

use chrono::NaiveDate;
use coverage_model::CoverageRequest;
use rusqlite::Connection;

use crate::error::Result;

/// Run all lookup checks in pipeline order, stopping at the first failure.
pub fn run_all(conn: &Connection, request: &CoverageRequest, on: NaiveDate) -> Result<()> {
    // 1. Contract exists
    contract::check(conn, request.contract_id)?;

    // 2. Coverage type exists
    coverage_type::check(conn, request.coverage_type_id)?;

    // 3. Coverage type belongs to the contract's product
    product::check(conn, request.contract_id, request.coverage_type_id)?;

    // 4. Amount is listed for the coverage type
    amount::check(conn, request.coverage_type_id, request.amount)?;

    // 5. A price is valid on the evaluation date
    price::check(conn, request.coverage_type_id, request.amount, on)?;

    Ok(())
}
