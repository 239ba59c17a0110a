//! Contract existence (`Vertrag`).

use coverage_model::ContractId;
use rusqlite::Connection;
use tracing::{debug, warn};

use crate::error::{CoverageError, Result};
use crate::store::{CONTRACT_EXISTS, row_exists};

/// Fail with [`CoverageError::ContractNotFound`] unless the contract exists.
pub fn check(conn: &Connection, contract_id: ContractId) -> Result<()> {
    debug!(%contract_id, "checking contract exists");
    if !row_exists(conn, CONTRACT_EXISTS, [contract_id.get()], "checking contract")? {
        warn!(%contract_id, "contract does not exist");
        return Err(CoverageError::ContractNotFound(contract_id));
    }
    Ok(())
}
