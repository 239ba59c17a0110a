//! Evaluation of a single `Ablehnungsregel` row.

use coverage_model::RejectionRule;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::RuleParseError;
use crate::grammar::{AgeRule, AmountRule, parse_age_rule, parse_amount_rule};

/// Result of checking one rejection rule against a customer age and amount.
#[derive(Debug, Clone, Serialize)]
pub struct RuleEvaluation {
    pub sequence: i64,
    /// `None` when the age text was malformed.
    pub age_rule: Option<AgeRule>,
    pub amount_rule: AmountRule,
    pub age_satisfied: bool,
    pub amount_satisfied: bool,
    /// Parse message for a malformed age text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_anomaly: Option<String>,
}

impl RuleEvaluation {
    /// A row rejects the coverage when either of its conditions holds.
    ///
    /// NOTE: rows are documented as "reject only if age and amount both
    /// match", but the rules in production have always been applied with OR.
    /// Changing this alters underwriting outcomes and needs sign-off from the
    /// product owner.
    pub fn is_violated(&self) -> bool {
        self.age_satisfied || self.amount_satisfied
    }
}

/// Evaluate `rule` for a customer of `age` asking for `amount`.
///
/// The age condition is evaluated first. A malformed age text is logged and
/// does not match; a malformed amount threshold is returned as an error.
pub fn evaluate_rule(
    rule: &RejectionRule,
    age: i32,
    amount: Decimal,
) -> Result<RuleEvaluation, RuleParseError> {
    let (age_rule, age_anomaly) = match parse_age_rule(rule.age_text()) {
        Ok(parsed) => (Some(parsed), None),
        Err(error) => {
            tracing::warn!(
                sequence = rule.sequence,
                rule = %error.text(),
                %error,
                "ignoring malformed age rule"
            );
            (None, Some(error.to_string()))
        }
    };
    let age_satisfied = age_rule.is_some_and(|parsed| parsed.is_satisfied_by(age));

    let amount_rule = parse_amount_rule(rule.amount_text())?;
    let amount_satisfied = amount_rule.is_satisfied_by(amount);

    Ok(RuleEvaluation {
        sequence: rule.sequence,
        age_rule,
        amount_rule,
        age_satisfied,
        amount_satisfied,
        age_anomaly,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rule(age: Option<&str>, amount: Option<&str>) -> RejectionRule {
        RejectionRule {
            sequence: 1,
            age_rule: age.map(str::to_string),
            amount_rule: amount.map(str::to_string),
        }
    }

    #[test]
    fn test_age_alone_rejects() {
        let eval = evaluate_rule(&rule(Some(">=40"), Some("")), 45, dec!(10000.00)).unwrap();
        assert!(eval.age_satisfied);
        assert!(!eval.amount_satisfied);
        assert!(eval.is_violated());
    }

    #[test]
    fn test_amount_alone_rejects() {
        let eval = evaluate_rule(&rule(Some(">=70"), Some(">=5000")), 45, dec!(5000)).unwrap();
        assert!(!eval.age_satisfied);
        assert!(eval.amount_satisfied);
        assert!(eval.is_violated());
    }

    #[test]
    fn test_null_columns_never_reject() {
        let eval = evaluate_rule(&rule(None, None), 45, dec!(1000000)).unwrap();
        assert!(!eval.is_violated());
        assert_eq!(eval.age_rule, Some(AgeRule::Unrestricted));
        assert_eq!(eval.amount_rule, AmountRule::Unrestricted);
    }

    #[test]
    fn test_malformed_age_is_recorded_not_raised() {
        let eval = evaluate_rule(&rule(Some("old"), Some("- -")), 90, dec!(1)).unwrap();
        assert!(!eval.is_violated());
        assert_eq!(eval.age_rule, None);
        assert!(eval.age_anomaly.is_some());
    }

    #[test]
    fn test_malformed_amount_is_raised() {
        let err = evaluate_rule(&rule(Some(">=99"), Some(">=1.2.3")), 45, dec!(1)).unwrap_err();
        assert_eq!(err.text(), ">=1.2.3");
    }
}
