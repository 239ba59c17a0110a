use anyhow::{Context, Result};
use coverage_model::CoverageRequest;
use coverage_validate::checks::{contract, coverage_type};
use coverage_validate::{
    CoverageError, CoverageService, DoctorReport, RejectionRuleEngine, RuleReport,
};
use rusqlite::{Connection, OpenFlags};
use tracing::{debug, info, info_span, warn};

use crate::config::{DatabaseConfig, GateConfig};
use crate::types::{AddOutcome, AddResult};

/// Exit code for store, setup and configuration failures.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code when a business rule refused the request.
pub const EXIT_REJECTED: i32 = 2;

/// Exit code for a failed command.
///
/// A business rejection anywhere in the error chain maps to
/// [`EXIT_REJECTED`], whichever command surfaced it.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    let rejected = error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<CoverageError>())
        .any(CoverageError::is_rejection);
    if rejected { EXIT_REJECTED } else { EXIT_FAILURE }
}

/// Open an existing database. A missing file is an error, not a new database.
pub fn open_database(config: &DatabaseConfig) -> Result<Connection> {
    let conn = Connection::open_with_flags(
        &config.path,
        OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("open database {}", config.path.display()))?;
    conn.busy_timeout(config.busy_timeout())
        .context("set busy timeout")?;
    debug!(path = %config.path.display(), "database opened");
    Ok(conn)
}

fn service_for<'conn>(conn: &'conn Connection, config: &GateConfig) -> CoverageService<'conn> {
    let service = CoverageService::new(conn);
    match config.validation.evaluation_date {
        Some(date) => service.with_evaluation_date(date),
        None => service,
    }
}

/// Validate `request` and, unless `dry_run`, add it inside one transaction.
///
/// Business rejections are part of the result; only store and setup failures
/// are errors.
pub fn run_add(config: &GateConfig, request: CoverageRequest, dry_run: bool) -> Result<AddResult> {
    let span = info_span!("add", %request, dry_run);
    let _guard = span.enter();

    let mut conn = open_database(&config.database)?;
    let tx = conn.transaction().context("begin transaction")?;
    // Report the same date the price check used.
    let service = service_for(&tx, config).pin_evaluation_date();
    let evaluation_date = service.evaluation_date();

    let outcome = if dry_run {
        service.validate(&request).map(|()| AddOutcome::Validated)
    } else {
        service.create_coverage(request).map(AddOutcome::Added)
    };
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(error) if error.is_rejection() => AddOutcome::Rejected(error),
        Err(error) => return Err(error).context("add coverage"),
    };

    if matches!(outcome, AddOutcome::Added(_)) {
        tx.commit().context("commit transaction")?;
        info!("coverage committed");
    } else {
        tx.rollback().context("roll back transaction")?;
        if let AddOutcome::Rejected(error) = &outcome {
            warn!(kind = error.kind().as_str(), %error, "coverage rejected");
        }
    }

    Ok(AddResult {
        request,
        evaluation_date,
        outcome,
    })
}

/// Evaluate every rejection rule of the request's coverage type.
///
/// The contract and coverage type must exist; the other lookup checks are
/// not run.
pub fn run_rules(config: &GateConfig, request: &CoverageRequest) -> Result<RuleReport> {
    let conn = open_database(&config.database)?;
    contract::check(&conn, request.contract_id)?;
    coverage_type::check(&conn, request.coverage_type_id)?;
    RejectionRuleEngine::new(&conn)
        .explain(request)
        .context("evaluate rejection rules")
}

pub fn run_doctor(config: &GateConfig) -> Result<DoctorReport> {
    let conn = open_database(&config.database)?;
    let report = DoctorReport::probe(&conn).context("probe database")?;
    if report.is_empty_schema() {
        warn!(database = %report.database, "no tables found; create the schema and load the seed data");
        return Ok(report);
    }
    for name in report.missing_tables() {
        warn!(table = name, "required table missing");
    }
    Ok(report)
}
