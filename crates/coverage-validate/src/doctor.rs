//! Connectivity and schema probe.

use rusqlite::Connection;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::store::data_access_failure;

/// Tables read or written by the pipeline.
pub const REQUIRED_TABLES: [&str; 7] = [
    "Vertrag",
    "Kunde",
    "Deckungsart",
    "Deckungsbetrag",
    "Deckungspreis",
    "Ablehnungsregel",
    "Deckung",
];

/// Tables reported when present but not needed by the pipeline.
pub const OPTIONAL_TABLES: [&str; 1] = ["Produkt"];

const OPERATION: &str = "probing schema";

#[derive(Debug, Clone, Serialize)]
pub struct DoctorReport {
    pub schema: String,
    pub schema_version: u32,
    pub database: String,
    pub sqlite_version: String,
    pub tables: Vec<TableStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableStatus {
    pub name: String,
    /// Whether the pipeline reads or writes this table.
    pub required: bool,
    pub present: bool,
    /// Row count; `None` when the table is missing.
    pub rows: Option<u64>,
}

impl DoctorReport {
    /// Inspect the database behind `conn`.
    pub fn probe(conn: &Connection) -> Result<Self> {
        let database = conn
            .path()
            .filter(|path| !path.is_empty())
            .unwrap_or(":memory:")
            .to_string();

        let probed = REQUIRED_TABLES
            .iter()
            .map(|name| (*name, true))
            .chain(OPTIONAL_TABLES.iter().map(|name| (*name, false)));
        let mut tables = Vec::with_capacity(REQUIRED_TABLES.len() + OPTIONAL_TABLES.len());
        for (name, required) in probed {
            let status = table_status(conn, name, required)?;
            debug!(table = name, present = status.present, rows = ?status.rows, "probed table");
            tables.push(status);
        }

        Ok(Self {
            schema: "coverage-gate.doctor".to_string(),
            schema_version: 1,
            database,
            sqlite_version: rusqlite::version().to_string(),
            tables,
        })
    }

    /// Required tables that do not exist.
    pub fn missing_tables(&self) -> Vec<&str> {
        self.tables
            .iter()
            .filter(|table| table.required && !table.present)
            .map(|table| table.name.as_str())
            .collect()
    }

    pub fn is_healthy(&self) -> bool {
        self.missing_tables().is_empty()
    }

    /// No probed table exists at all; the schema has not been created yet.
    pub fn is_empty_schema(&self) -> bool {
        self.tables.iter().all(|table| !table.present)
    }
}

fn table_status(conn: &Connection, name: &str, required: bool) -> Result<TableStatus> {
    let present: bool = conn
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
            [name],
            |row| row.get(0),
        )
        .map_err(|e| data_access_failure(OPERATION, e))?;

    let rows = if present {
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM \"{name}\""), [], |row| row.get(0))
            .map_err(|e| data_access_failure(OPERATION, e))?;
        Some(count.unsigned_abs())
    } else {
        None
    };

    Ok(TableStatus {
        name: name.to_string(),
        required,
        present,
        rows,
    })
}
