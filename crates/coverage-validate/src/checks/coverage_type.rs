//! Coverage type existence (`Deckungsart`).

use coverage_model::CoverageTypeId;
use rusqlite::Connection;
use tracing::{debug, warn};

use crate::error::{CoverageError, Result};
use crate::store::{COVERAGE_TYPE_EXISTS, row_exists};

pub fn check(conn: &Connection, coverage_type_id: CoverageTypeId) -> Result<()> {
    debug!(%coverage_type_id, "checking coverage type exists");
    let exists = row_exists(
        conn,
        COVERAGE_TYPE_EXISTS,
        [coverage_type_id.get()],
        "checking coverage type",
    )?;
    if !exists {
        warn!(%coverage_type_id, "coverage type does not exist");
        return Err(CoverageError::CoverageTypeNotFound(coverage_type_id));
    }
    Ok(())
}
