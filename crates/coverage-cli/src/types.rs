use chrono::NaiveDate;
use coverage_model::{CoverageRecord, CoverageRequest};
use coverage_validate::CoverageError;

#[derive(Debug)]
pub struct AddResult {
    pub request: CoverageRequest,
    pub evaluation_date: NaiveDate,
    pub outcome: AddOutcome,
}

#[derive(Debug)]
pub enum AddOutcome {
    /// Persisted and committed.
    Added(CoverageRecord),
    /// Dry run; every check passed.
    Validated,
    /// A business rule refused the request. Nothing was written.
    Rejected(CoverageError),
}

impl AddResult {
    pub fn is_rejected(&self) -> bool {
        matches!(self.outcome, AddOutcome::Rejected(_))
    }
}
