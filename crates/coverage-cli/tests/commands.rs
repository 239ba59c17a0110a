use std::path::Path;

use chrono::NaiveDate;
use coverage_cli::commands::{
    EXIT_FAILURE, EXIT_REJECTED, exit_code, open_database, run_add, run_doctor, run_rules,
};
use coverage_cli::config::GateConfig;
use coverage_cli::types::AddOutcome;
use coverage_model::{ContractId, CoverageRequest, CoverageTypeId};
use coverage_validate::{CoverageError, ErrorKind};
use rusqlite::Connection;
use rust_decimal::Decimal;
use tempfile::TempDir;

const SCHEMA_AND_DATA: &str = r"
CREATE TABLE Kunde (ID INTEGER PRIMARY KEY, Geburtsdatum DATE NOT NULL);
CREATE TABLE Vertrag (
    ID INTEGER PRIMARY KEY,
    Versicherungsbeginn DATE NOT NULL,
    Produkt_FK INTEGER NOT NULL,
    Kunde_FK INTEGER NOT NULL
);
CREATE TABLE Deckungsart (ID INTEGER PRIMARY KEY, Produkt_FK INTEGER NOT NULL);
CREATE TABLE Deckungsbetrag (
    ID INTEGER PRIMARY KEY,
    Deckungsart_FK INTEGER NOT NULL,
    Deckungsbetrag NUMBER(10, 2) NOT NULL
);
CREATE TABLE Deckungspreis (
    ID INTEGER PRIMARY KEY,
    Deckungsbetrag_FK INTEGER NOT NULL,
    Gueltig_Von DATE NOT NULL,
    Gueltig_Bis DATE NOT NULL
);
CREATE TABLE Ablehnungsregel (
    Deckungsart_FK INTEGER NOT NULL,
    LfdNr INTEGER NOT NULL,
    R_Betrag VARCHAR2(20),
    R_Alter VARCHAR2(20)
);
CREATE TABLE Deckung (
    Vertrag_FK INTEGER NOT NULL,
    Deckungsart_FK INTEGER NOT NULL,
    Deckungsbetrag NUMBER(10, 2) NOT NULL
);

INSERT INTO Kunde VALUES (1, '1980-03-01');
INSERT INTO Vertrag VALUES (100, '2025-06-01', 1, 1);
INSERT INTO Deckungsart VALUES (7, 1), (9, 1);
INSERT INTO Deckungsbetrag VALUES (1, 7, 10000.00), (2, 9, 2500.00);
INSERT INTO Deckungspreis VALUES (1, 1, '2025-01-01', '2025-12-31'), (2, 2, '2025-01-01', '2025-12-31');
INSERT INTO Ablehnungsregel VALUES (9, 1, NULL, '>=40');
";

fn database() -> (TempDir, GateConfig) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coverage.db");
    Connection::open(&path)
        .unwrap()
        .execute_batch(SCHEMA_AND_DATA)
        .unwrap();
    let config = GateConfig::default()
        .with_overrides(Some(path), NaiveDate::from_ymd_opt(2025, 7, 15));
    (dir, config)
}

fn request(coverage_type: i64, amount: Decimal) -> CoverageRequest {
    CoverageRequest::new(ContractId::new(100), CoverageTypeId::new(coverage_type), amount)
}

fn coverage_count(path: &Path) -> i64 {
    Connection::open(path)
        .unwrap()
        .query_row("SELECT COUNT(*) FROM Deckung", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn add_commits_the_coverage() {
    let (_dir, config) = database();

    let result = run_add(&config, request(7, Decimal::new(1_000_000, 2)), false).unwrap();

    assert!(matches!(result.outcome, AddOutcome::Added(_)));
    assert_eq!(result.evaluation_date, NaiveDate::from_ymd_opt(2025, 7, 15).unwrap());
    assert_eq!(coverage_count(&config.database.path), 1);
}

#[test]
fn dry_run_writes_nothing() {
    let (_dir, config) = database();

    let result = run_add(&config, request(7, Decimal::new(10_000, 0)), true).unwrap();

    assert!(matches!(result.outcome, AddOutcome::Validated));
    assert_eq!(coverage_count(&config.database.path), 0);
}

#[test]
fn rejection_is_a_result_not_an_error() {
    let (_dir, config) = database();

    let result = run_add(&config, request(9, Decimal::new(2_500, 0)), false).unwrap();

    assert!(result.is_rejected());
    let AddOutcome::Rejected(error) = &result.outcome else {
        panic!("expected rejection");
    };
    assert_eq!(error.kind(), ErrorKind::RuleViolation);
    assert_eq!(coverage_count(&config.database.path), 0);
}

#[test]
fn price_date_follows_the_config() {
    let (_dir, config) = database();
    let config = config.with_overrides(None, NaiveDate::from_ymd_opt(2026, 1, 1));

    let result = run_add(&config, request(7, Decimal::new(10_000, 0)), false).unwrap();

    let AddOutcome::Rejected(error) = &result.outcome else {
        panic!("expected rejection");
    };
    assert_eq!(error.kind(), ErrorKind::PriceUnavailable);
}

#[test]
fn reported_date_is_the_one_prices_were_checked_on() {
    let (dir, _) = database();
    let path = dir.path().join("coverage.db");
    Connection::open(&path)
        .unwrap()
        .execute_batch(
            "INSERT INTO Deckungsart VALUES (11, 1);
             INSERT INTO Deckungsbetrag VALUES (3, 11, 700.00);
             INSERT INTO Deckungspreis VALUES (3, 3, '2000-01-01', '2000-12-31');",
        )
        .unwrap();
    // No configured date: the clock decides.
    let config = GateConfig::default().with_overrides(Some(path), None);

    let result = run_add(&config, request(11, Decimal::new(700, 0)), false).unwrap();

    let AddOutcome::Rejected(CoverageError::PriceUnavailable { on, .. }) = &result.outcome else {
        panic!("expected missing price, got {:?}", result.outcome);
    };
    assert_eq!(*on, result.evaluation_date);
}

#[test]
fn store_failure_is_an_error() {
    let (_dir, config) = database();
    Connection::open(&config.database.path)
        .unwrap()
        .execute_batch("DROP TABLE Deckung")
        .unwrap();

    let err = run_add(&config, request(7, Decimal::new(10_000, 0)), false).unwrap_err();

    assert!(format!("{err:#}").contains("inserting coverage"));
    assert_eq!(exit_code(&err), EXIT_FAILURE);
}

#[test]
fn missing_database_is_not_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.db");
    let config = GateConfig::default().with_overrides(Some(path.clone()), None);

    assert!(open_database(&config.database).is_err());
    assert!(!path.exists());
}

#[test]
fn rules_explains_each_row() {
    let (_dir, config) = database();

    let report = run_rules(&config, &request(9, Decimal::ZERO)).unwrap();

    assert_eq!(report.customer_age, Some(45));
    assert_eq!(report.evaluations.len(), 1);
    assert!(report.first_violation().is_some());
}

#[test]
fn rules_for_unknown_contract_fail() {
    let (_dir, config) = database();
    let req = CoverageRequest::new(ContractId::new(1), CoverageTypeId::new(9), Decimal::ZERO);

    let err = run_rules(&config, &req).unwrap_err();

    assert_eq!(err.to_string(), "contract 1 does not exist");
    assert_eq!(exit_code(&err), EXIT_REJECTED);
}

#[test]
fn rules_for_unknown_coverage_type_exit_as_rejected() {
    let (_dir, config) = database();

    let err = run_rules(&config, &request(12345, Decimal::ZERO)).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CoverageError>(),
        Some(CoverageError::CoverageTypeNotFound(_))
    ));
    assert_eq!(exit_code(&err), EXIT_REJECTED);
}

#[test]
fn missing_database_exits_as_failure() {
    let dir = tempfile::tempdir().unwrap();
    let config = GateConfig::default().with_overrides(Some(dir.path().join("absent.db")), None);

    let err = run_rules(&config, &request(7, Decimal::ZERO)).unwrap_err();

    assert_eq!(exit_code(&err), EXIT_FAILURE);
}

#[test]
fn doctor_reports_counts() {
    let (_dir, config) = database();

    let report = run_doctor(&config).unwrap();

    // The fixture has no Produkt table; it is optional.
    assert!(report.is_healthy());
    assert!(!report.is_empty_schema());
    assert!(report.database.ends_with("coverage.db"));
    let rules = report
        .tables
        .iter()
        .find(|table| table.name == "Ablehnungsregel")
        .unwrap();
    assert_eq!(rules.rows, Some(1));
}

#[test]
fn doctor_on_blank_database_reports_no_tables() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blank.db");
    Connection::open(&path)
        .unwrap()
        .execute_batch("PRAGMA user_version = 1")
        .unwrap();
    let config = GateConfig::default().with_overrides(Some(path), None);

    let report = run_doctor(&config).unwrap();

    assert!(report.is_empty_schema());
    assert!(!report.is_healthy());
}
