//! SQL issued against the insurance schema.
//!
//! Table and column names are the external schema contract. Dates are ISO-8601
//! text; amounts are bound as decimal text and compared under the column's
//! numeric affinity, so `10000.00` matches a stored `10000`.

use rusqlite::{Connection, Params};
use rust_decimal::Decimal;

use crate::error::{CoverageError, Result};

pub(crate) const CONTRACT_EXISTS: &str = "SELECT 1 FROM Vertrag WHERE ID = ?1";

pub(crate) const COVERAGE_TYPE_EXISTS: &str = "SELECT 1 FROM Deckungsart WHERE ID = ?1";

pub(crate) const PRODUCT_MATCHES: &str = "SELECT 1 FROM Vertrag v, Deckungsart d \
     WHERE v.ID = ?1 AND d.ID = ?2 AND v.Produkt_FK = d.Produkt_FK";

pub(crate) const AMOUNT_LISTED: &str =
    "SELECT 1 FROM Deckungsbetrag WHERE Deckungsart_FK = ?1 AND Deckungsbetrag = ?2";

pub(crate) const PRICE_VALID: &str = "SELECT 1 FROM Deckungspreis dp \
     JOIN Deckungsbetrag db ON dp.Deckungsbetrag_FK = db.ID \
     WHERE db.Deckungsart_FK = ?1 AND db.Deckungsbetrag = ?2 \
     AND ?3 BETWEEN dp.Gueltig_Von AND dp.Gueltig_Bis";

pub(crate) const REJECTION_RULES: &str = "SELECT ar.LfdNr, ar.R_Alter, ar.R_Betrag, \
     v.Versicherungsbeginn, k.Geburtsdatum \
     FROM Ablehnungsregel ar, Vertrag v, Kunde k \
     WHERE ar.Deckungsart_FK = ?1 AND v.ID = ?2 AND k.ID = v.Kunde_FK \
     ORDER BY ar.LfdNr";

pub(crate) const INSERT_COVERAGE: &str =
    "INSERT INTO Deckung (Vertrag_FK, Deckungsart_FK, Deckungsbetrag) VALUES (?1, ?2, ?3)";

/// Bind form of an amount. `Decimal` has no `ToSql`, and text keeps the exact value.
pub(crate) fn amount_param(amount: Decimal) -> String {
    amount.to_string()
}

/// Run a single-row existence query.
///
/// The statement is dropped before returning on every path.
pub(crate) fn row_exists<P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    operation: &'static str,
) -> Result<bool> {
    let mut stmt = conn.prepare(sql).map_err(|e| data_access_failure(operation, e))?;
    stmt.exists(params).map_err(|e| data_access_failure(operation, e))
}

/// Wrap a store error, logging it at the point of occurrence.
pub(crate) fn data_access_failure(operation: &'static str, error: rusqlite::Error) -> CoverageError {
    tracing::error!(operation, %error, "database error");
    CoverageError::data_access(operation, error)
}
