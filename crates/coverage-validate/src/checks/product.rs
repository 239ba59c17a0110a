//! Coverage type / product compatibility.
//!
//! A coverage type may only be attached to contracts of the product it is
//! defined for (`Vertrag.Produkt_FK = Deckungsart.Produkt_FK`).

use coverage_model::{ContractId, CoverageTypeId};
use rusqlite::Connection;
use tracing::{debug, warn};

use crate::error::{CoverageError, Result};
use crate::store::{PRODUCT_MATCHES, row_exists};

pub fn check(
    conn: &Connection,
    contract_id: ContractId,
    coverage_type_id: CoverageTypeId,
) -> Result<()> {
    debug!(%contract_id, %coverage_type_id, "checking product compatibility");
    let matches = row_exists(
        conn,
        PRODUCT_MATCHES,
        [contract_id.get(), coverage_type_id.get()],
        "checking product compatibility",
    )?;
    if !matches {
        warn!(
            %contract_id,
            %coverage_type_id,
            "coverage type does not belong to the contract's product"
        );
        return Err(CoverageError::ProductMismatch {
            contract_id,
            coverage_type_id,
        });
    }
    Ok(())
}
