//! Shared in-memory database fixture.
//!
//! Contract 100 belongs to product 1; its customer was born 1980-03-01 and the
//! contract starts 2025-06-01, so the customer is 45 at contract start.
//! Coverage type 7 belongs to product 1, type 8 to product 2.

#![allow(dead_code)]

use std::str::FromStr;

use chrono::NaiveDate;
use coverage_validate::CoverageService;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

pub const SCHEMA: &str = r"
CREATE TABLE Produkt (
    ID INTEGER PRIMARY KEY,
    KuerzelP VARCHAR2(10) NOT NULL
);
CREATE TABLE Kunde (
    ID INTEGER PRIMARY KEY,
    Name VARCHAR2(100),
    Geburtsdatum DATE NOT NULL
);
CREATE TABLE Vertrag (
    ID INTEGER PRIMARY KEY,
    Versicherungsbeginn DATE NOT NULL,
    Versicherungsende DATE,
    Produkt_FK INTEGER NOT NULL REFERENCES Produkt (ID),
    Kunde_FK INTEGER NOT NULL REFERENCES Kunde (ID)
);
CREATE TABLE Deckungsart (
    ID INTEGER PRIMARY KEY,
    KuerzelDA VARCHAR2(10),
    Bezeichnung VARCHAR2(100),
    Produkt_FK INTEGER NOT NULL REFERENCES Produkt (ID)
);
CREATE TABLE Deckungsbetrag (
    ID INTEGER PRIMARY KEY,
    Deckungsart_FK INTEGER NOT NULL REFERENCES Deckungsart (ID),
    Deckungsbetrag NUMBER(10, 2) NOT NULL
);
CREATE TABLE Deckungspreis (
    ID INTEGER PRIMARY KEY,
    Deckungsbetrag_FK INTEGER NOT NULL REFERENCES Deckungsbetrag (ID),
    Gueltig_Von DATE NOT NULL,
    Gueltig_Bis DATE NOT NULL,
    Preis NUMBER(10, 2)
);
CREATE TABLE Ablehnungsregel (
    Deckungsart_FK INTEGER NOT NULL REFERENCES Deckungsart (ID),
    LfdNr INTEGER NOT NULL,
    R_Betrag VARCHAR2(20),
    R_Alter VARCHAR2(20),
    PRIMARY KEY (Deckungsart_FK, LfdNr)
);
CREATE TABLE Deckung (
    Vertrag_FK INTEGER NOT NULL REFERENCES Vertrag (ID),
    Deckungsart_FK INTEGER NOT NULL REFERENCES Deckungsart (ID),
    Deckungsbetrag NUMBER(10, 2) NOT NULL,
    PRIMARY KEY (Vertrag_FK, Deckungsart_FK)
);
";

const SEED: &str = r"
INSERT INTO Produkt (ID, KuerzelP) VALUES (1, 'P1'), (2, 'P2');
INSERT INTO Kunde (ID, Name, Geburtsdatum) VALUES
    (1, 'Muster', '1980-03-01'),
    (2, 'Junior', '2000-06-02');
INSERT INTO Vertrag (ID, Versicherungsbeginn, Versicherungsende, Produkt_FK, Kunde_FK) VALUES
    (100, '2025-06-01', '2035-05-31', 1, 1),
    (101, '2025-06-01', '2035-05-31', 1, 2),
    (200, '2025-06-01', NULL, 2, 1);
INSERT INTO Deckungsart (ID, KuerzelDA, Bezeichnung, Produkt_FK) VALUES
    (7, 'HR', 'Haftpflicht', 1),
    (8, 'GL', 'Glasbruch', 2),
    (9, 'UF', 'Unfall', 1);
INSERT INTO Deckungsbetrag (ID, Deckungsart_FK, Deckungsbetrag) VALUES
    (1, 7, 10000.00),
    (2, 7, 5000.00),
    (3, 7, 20000.00),
    (4, 8, 10000.00),
    (5, 9, 4999.99),
    (6, 9, 5000.00);
INSERT INTO Deckungspreis (ID, Deckungsbetrag_FK, Gueltig_Von, Gueltig_Bis, Preis) VALUES
    (1, 1, '2025-01-01', '2025-12-31', 120.00),
    (2, 2, '2000-01-01', '2999-12-31', 80.00),
    (3, 3, '2020-01-01', '2020-12-31', 210.00),
    (4, 4, '2025-01-01', '2025-12-31', 35.00),
    (5, 5, '2025-01-01', '2025-12-31', 50.00),
    (6, 6, '2025-01-01', '2025-12-31', 55.00);
";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Fixed evaluation date inside every 2025 price window.
pub fn today() -> NaiveDate {
    date(2025, 7, 15)
}

pub fn empty_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    conn
}

pub fn seeded_db() -> Connection {
    let conn = empty_db();
    conn.execute_batch(SEED).unwrap();
    conn
}

pub fn service(conn: &Connection) -> CoverageService<'_> {
    CoverageService::new(conn).with_evaluation_date(today())
}

pub fn add_rule(
    conn: &Connection,
    coverage_type: i64,
    sequence: i64,
    age_rule: Option<&str>,
    amount_rule: Option<&str>,
) {
    conn.execute(
        "INSERT INTO Ablehnungsregel (Deckungsart_FK, LfdNr, R_Betrag, R_Alter) VALUES (?1, ?2, ?3, ?4)",
        params![coverage_type, sequence, amount_rule, age_rule],
    )
    .unwrap();
}

/// All `Deckung` rows as (contract, coverage type, amount).
pub fn coverages(conn: &Connection) -> Vec<(i64, i64, Decimal)> {
    let mut stmt = conn
        .prepare(
            "SELECT Vertrag_FK, Deckungsart_FK, CAST(Deckungsbetrag AS TEXT) \
             FROM Deckung ORDER BY Vertrag_FK, Deckungsart_FK",
        )
        .unwrap();
    stmt.query_map([], |row| {
        let amount: String = row.get(2)?;
        Ok((row.get(0)?, row.get(1)?, Decimal::from_str(&amount).unwrap()))
    })
    .unwrap()
    .collect::<Result<Vec<_>, _>>()
    .unwrap()
}
