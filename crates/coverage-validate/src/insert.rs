//! Persisting a validated coverage (`Deckung`).

use coverage_model::{CoverageRecord, CoverageRequest};
use rusqlite::{Connection, params};
use tracing::{error, info};

use crate::error::{CoverageError, DataAccessCause, Result};
use crate::store::{INSERT_COVERAGE, amount_param, data_access_failure};

const OPERATION: &str = "inserting coverage";

/// Insert one `Deckung` row for an already validated request.
///
/// Any affected-row count other than one is a data integrity failure.
pub fn insert_coverage(conn: &Connection, request: &CoverageRequest) -> Result<CoverageRecord> {
    let mut stmt = conn
        .prepare(INSERT_COVERAGE)
        .map_err(|e| data_access_failure(OPERATION, e))?;
    let affected = stmt
        .execute(params![
            request.contract_id.get(),
            request.coverage_type_id.get(),
            amount_param(request.amount)
        ])
        .map_err(|e| data_access_failure(OPERATION, e))?;

    if affected != 1 {
        error!(affected, "unexpected number of affected rows");
        return Err(CoverageError::data_access(
            OPERATION,
            DataAccessCause::UnexpectedRowCount(affected),
        ));
    }

    let record = CoverageRecord::from(*request);
    info!(
        contract_id = %record.contract_id,
        coverage_type_id = %record.coverage_type_id,
        amount = %record.amount,
        "coverage inserted"
    );
    Ok(record)
}
