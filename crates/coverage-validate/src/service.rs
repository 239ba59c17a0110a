//! Coverage validation pipeline.
//!
//! Runs the lookup checks, the rejection rule engine and finally the insert,
//! in a fixed order. The first failing step ends the run; nothing is written
//! unless every step passed.
//!
//! The service borrows a connection for its lifetime and never begins, commits
//! or rolls back a transaction. Callers that want the insert to be atomic with
//! other work pass a `rusqlite::Transaction`, which derefs to `Connection`.

use chrono::{Local, NaiveDate};
use coverage_model::{ContractId, CoverageRecord, CoverageRequest, CoverageTypeId};
use rusqlite::Connection;
use rust_decimal::Decimal;
use tracing::{info, info_span};

use crate::checks;
use crate::engine::RejectionRuleEngine;
use crate::error::Result;
use crate::insert::insert_coverage;

/// Validates and persists coverage additions over one borrowed connection.
#[derive(Debug, Clone, Copy)]
pub struct CoverageService<'conn> {
    conn: &'conn Connection,
    evaluation_date: Option<NaiveDate>,
}

impl<'conn> CoverageService<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            evaluation_date: None,
        }
    }

    /// Pin the date used for price validity instead of reading the clock.
    #[must_use]
    pub fn with_evaluation_date(mut self, date: NaiveDate) -> Self {
        self.evaluation_date = Some(date);
        self
    }

    /// Read the clock once and keep that date for every later call.
    ///
    /// Without this, a service that spans midnight checks prices against a
    /// different day than [`Self::evaluation_date`] reported earlier.
    #[must_use]
    pub fn pin_evaluation_date(self) -> Self {
        let date = self.evaluation_date();
        self.with_evaluation_date(date)
    }

    /// Date used for price validity: the pinned date, or today in local time.
    pub fn evaluation_date(&self) -> NaiveDate {
        self.evaluation_date.unwrap_or_else(|| Local::now().date_naive())
    }

    /// The rule engine over the same connection.
    pub fn rule_engine(&self) -> RejectionRuleEngine<'conn> {
        RejectionRuleEngine::new(self.conn)
    }

    /// Run every check without writing anything.
    pub fn validate(&self, request: &CoverageRequest) -> Result<()> {
        info_span!(
            "validate_coverage",
            contract_id = %request.contract_id,
            coverage_type_id = %request.coverage_type_id,
            amount = %request.amount,
        )
        .in_scope(|| self.run_checks(request))
    }

    /// Validate the request and, if every check passes, persist it.
    pub fn create_coverage(&self, request: CoverageRequest) -> Result<CoverageRecord> {
        info_span!(
            "create_coverage",
            contract_id = %request.contract_id,
            coverage_type_id = %request.coverage_type_id,
            amount = %request.amount,
        )
        .in_scope(|| {
            info!("creating coverage");
            self.run_checks(&request)?;
            insert_coverage(self.conn, &request)
        })
    }

    fn run_checks(&self, request: &CoverageRequest) -> Result<()> {
        // Steps 1-5: lookups
        checks::run_all(self.conn, request, self.evaluation_date())?;

        // Step 6: rejection rules
        self.rule_engine().check(request)
    }
}

/// Validate and persist one coverage using today's date for price validity.
pub fn create_coverage(
    conn: &Connection,
    contract_id: ContractId,
    coverage_type_id: CoverageTypeId,
    amount: Decimal,
) -> Result<CoverageRecord> {
    CoverageService::new(conn).create_coverage(CoverageRequest::new(
        contract_id,
        coverage_type_id,
        amount,
    ))
}
