//! Rejection rule engine.
//!
//! Loads the `Ablehnungsregel` rows of a coverage type together with the
//! contract start and the customer's birth date, then evaluates each row in
//! `LfdNr` order. The first violated row rejects the request.

use chrono::NaiveDate;
use coverage_model::{ContractId, CoverageRequest, CoverageTypeId, RejectionRule};
use coverage_rules::{RuleEvaluation, age_at, evaluate_rule};
use rusqlite::{Connection, Row};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{CoverageError, Result};
use crate::store::{REJECTION_RULES, data_access_failure};

const OPERATION: &str = "checking rejection rules";

/// One rule row with the dates needed to compute the customer's age.
#[derive(Debug, Clone)]
struct RuleRow {
    rule: RejectionRule,
    contract_start: NaiveDate,
    birth_date: NaiveDate,
}

impl RuleRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            rule: RejectionRule {
                sequence: row.get(0)?,
                age_rule: row.get(1)?,
                amount_rule: row.get(2)?,
            },
            contract_start: row.get(3)?,
            birth_date: row.get(4)?,
        })
    }

    fn customer_age(&self) -> i32 {
        age_at(self.birth_date, self.contract_start)
    }
}

/// Per-row evaluation of every rule for a request, without stopping early.
#[derive(Debug, Clone, Serialize)]
pub struct RuleReport {
    pub coverage_type_id: CoverageTypeId,
    /// Customer age at contract start; `None` when there are no rules.
    pub customer_age: Option<i32>,
    pub evaluations: Vec<RuleEvaluation>,
}

impl RuleReport {
    /// The row that [`RejectionRuleEngine::check`] would reject with.
    pub fn first_violation(&self) -> Option<&RuleEvaluation> {
        self.evaluations.iter().find(|eval| eval.is_violated())
    }
}

/// Evaluates stored rejection rules against a coverage request.
#[derive(Debug, Clone, Copy)]
pub struct RejectionRuleEngine<'conn> {
    conn: &'conn Connection,
}

impl<'conn> RejectionRuleEngine<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Fail with [`CoverageError::RuleViolation`] on the first violated rule.
    ///
    /// Rows are read from the cursor one at a time; rows after the violating
    /// one are never fetched.
    pub fn check(&self, request: &CoverageRequest) -> Result<()> {
        let CoverageRequest {
            contract_id,
            coverage_type_id,
            amount,
        } = *request;
        debug!(%contract_id, %coverage_type_id, %amount, "checking rejection rules");

        let mut stmt = self
            .conn
            .prepare(REJECTION_RULES)
            .map_err(|e| data_access_failure(OPERATION, e))?;
        let mut rows = stmt
            .query([coverage_type_id.get(), contract_id.get()])
            .map_err(|e| data_access_failure(OPERATION, e))?;

        while let Some(row) = rows.next().map_err(|e| data_access_failure(OPERATION, e))? {
            let row = RuleRow::from_row(row).map_err(|e| data_access_failure(OPERATION, e))?;
            let age = row.customer_age();
            let eval = evaluate_rule(&row.rule, age, amount)
                .map_err(|e| CoverageError::data_access(OPERATION, e))?;
            debug!(
                sequence = eval.sequence,
                age_rule = %row.rule.age_text(),
                amount_rule = %row.rule.amount_text(),
                customer_age = age,
                age_satisfied = eval.age_satisfied,
                amount_satisfied = eval.amount_satisfied,
                "evaluated rejection rule"
            );
            if eval.is_violated() {
                warn!(
                    %coverage_type_id,
                    sequence = eval.sequence,
                    age_rule = %row.rule.age_text(),
                    amount_rule = %row.rule.amount_text(),
                    customer_age = age,
                    %amount,
                    "rejection rule violated"
                );
                return Err(CoverageError::RuleViolation {
                    coverage_type_id,
                    rule_sequence: eval.sequence,
                });
            }
        }

        debug!(%coverage_type_id, "all rejection rules passed");
        Ok(())
    }

    /// Evaluate every rule for the request and report each outcome.
    pub fn explain(&self, request: &CoverageRequest) -> Result<RuleReport> {
        let rows = self.load(request.contract_id, request.coverage_type_id)?;
        let customer_age = rows.first().map(RuleRow::customer_age);
        let evaluations = rows
            .iter()
            .map(|row| {
                evaluate_rule(&row.rule, row.customer_age(), request.amount)
                    .map_err(|e| CoverageError::data_access(OPERATION, e))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RuleReport {
            coverage_type_id: request.coverage_type_id,
            customer_age,
            evaluations,
        })
    }

    fn load(
        &self,
        contract_id: ContractId,
        coverage_type_id: CoverageTypeId,
    ) -> Result<Vec<RuleRow>> {
        let mut stmt = self
            .conn
            .prepare(REJECTION_RULES)
            .map_err(|e| data_access_failure(OPERATION, e))?;
        stmt.query_map([coverage_type_id.get(), contract_id.get()], RuleRow::from_row)
            .and_then(Iterator::collect)
            .map_err(|e| data_access_failure(OPERATION, e))
    }
}
