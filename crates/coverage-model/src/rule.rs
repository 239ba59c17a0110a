use serde::{Deserialize, Serialize};

/// Placeholder stored in `R_Betrag` when a rule has no amount condition.
pub const NO_AMOUNT_RULE: &str = "- -";

/// One `Ablehnungsregel` row as stored: threshold texts are raw and unparsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionRule {
    /// `LfdNr`, the evaluation order within a coverage type.
    pub sequence: i64,
    /// `R_Alter`, e.g. `">=60"`.
    pub age_rule: Option<String>,
    /// `R_Betrag`, e.g. `">=500000"`.
    pub amount_rule: Option<String>,
}

impl RejectionRule {
    pub fn age_text(&self) -> &str {
        self.age_rule.as_deref().unwrap_or_default()
    }

    pub fn amount_text(&self) -> &str {
        self.amount_rule.as_deref().unwrap_or_default()
    }
}
