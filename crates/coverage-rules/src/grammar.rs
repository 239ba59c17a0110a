//! Threshold grammars for `Ablehnungsregel` rows.
//!
//! `R_Alter` holds an age comparison such as `>=60`, `<18` or a bare `65`.
//! `R_Betrag` holds an amount floor such as `>=500000.00`, or the `- -`
//! placeholder when the rule has no amount condition.
//!
//! Both grammars are pure: parsing never touches the store and evaluation is a
//! plain comparison. They differ in how they treat bad input. A malformed age
//! rule is an anomaly that never matches, while a malformed amount threshold is
//! an error the caller must surface.

use std::fmt;
use std::str::FromStr;

use coverage_model::NO_AMOUNT_RULE;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::RuleParseError;

/// Parsed `R_Alter` condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "threshold", rename_all = "snake_case")]
pub enum AgeRule {
    /// Blank rule text.
    Unrestricted,
    AtLeast(i32),
    Above(i32),
    AtMost(i32),
    Below(i32),
    Exactly(i32),
}

impl AgeRule {
    /// Whether a customer of `age` satisfies this condition.
    pub fn is_satisfied_by(self, age: i32) -> bool {
        match self {
            Self::Unrestricted => false,
            Self::AtLeast(threshold) => age >= threshold,
            Self::Above(threshold) => age > threshold,
            Self::AtMost(threshold) => age <= threshold,
            Self::Below(threshold) => age < threshold,
            Self::Exactly(threshold) => age == threshold,
        }
    }
}

impl fmt::Display for AgeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrestricted => f.write_str("-"),
            Self::AtLeast(n) => write!(f, ">={n}"),
            Self::Above(n) => write!(f, ">{n}"),
            Self::AtMost(n) => write!(f, "<={n}"),
            Self::Below(n) => write!(f, "<{n}"),
            Self::Exactly(n) => write!(f, "{n}"),
        }
    }
}

/// Parse an `R_Alter` text.
///
/// Two-character operators are matched before their one-character prefixes,
/// so `>=30` is `AtLeast(30)` and not `Above` of `"=30"`.
pub fn parse_age_rule(text: &str) -> Result<AgeRule, RuleParseError> {
    let rule = text.trim();
    if rule.is_empty() {
        return Ok(AgeRule::Unrestricted);
    }

    let operators: [(&str, fn(i32) -> AgeRule); 4] = [
        (">=", AgeRule::AtLeast),
        (">", AgeRule::Above),
        ("<=", AgeRule::AtMost),
        ("<", AgeRule::Below),
    ];
    for (operator, build) in operators {
        if let Some(threshold) = rule.strip_prefix(operator) {
            return parse_age_threshold(rule, threshold).map(build);
        }
    }

    if rule.bytes().all(|b| b.is_ascii_digit()) {
        return parse_age_threshold(rule, rule).map(AgeRule::Exactly);
    }

    Err(RuleParseError::UnrecognizedAgeRule {
        text: rule.to_string(),
    })
}

fn parse_age_threshold(rule: &str, threshold: &str) -> Result<i32, RuleParseError> {
    threshold
        .trim()
        .parse::<i32>()
        .map_err(|_| RuleParseError::InvalidAgeThreshold {
            text: rule.to_string(),
        })
}

/// Evaluate an `R_Alter` text against `age`.
///
/// Malformed rules are logged and treated as not satisfied.
pub fn age_rule_violated(text: &str, age: i32) -> bool {
    match parse_age_rule(text) {
        Ok(rule) => rule.is_satisfied_by(age),
        Err(error) => {
            tracing::warn!(rule = %error.text(), %error, "ignoring malformed age rule");
            false
        }
    }
}

/// Parsed `R_Betrag` condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "threshold", rename_all = "snake_case")]
pub enum AmountRule {
    /// Blank text or the `- -` placeholder.
    Unrestricted,
    AtLeast(Decimal),
    /// Any other text. Kept so callers can report it; it never matches.
    Unrecognized(String),
}

impl AmountRule {
    /// Whether a proposed `amount` satisfies this condition.
    pub fn is_satisfied_by(&self, amount: Decimal) -> bool {
        match self {
            Self::AtLeast(threshold) => amount >= *threshold,
            Self::Unrestricted | Self::Unrecognized(_) => false,
        }
    }
}

impl fmt::Display for AmountRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrestricted => f.write_str("-"),
            Self::AtLeast(threshold) => write!(f, ">={threshold}"),
            Self::Unrecognized(text) => write!(f, "{text} (ignored)"),
        }
    }
}

/// Parse an `R_Betrag` text.
///
/// Only `>=` is part of the grammar. A `>=` with a threshold that is not a
/// plain decimal number (digits, sign, point, exponent) is an error, not an
/// unrestricted rule. Digit separators such as `_` are not accepted.
pub fn parse_amount_rule(text: &str) -> Result<AmountRule, RuleParseError> {
    let rule = text.trim();
    if rule.is_empty() || rule == NO_AMOUNT_RULE {
        return Ok(AmountRule::Unrestricted);
    }

    let Some(threshold) = rule.strip_prefix(">=") else {
        return Ok(AmountRule::Unrecognized(rule.to_string()));
    };

    let threshold = threshold.trim();
    if !threshold
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-' | b'e' | b'E'))
    {
        return Err(RuleParseError::MalformedAmountThreshold {
            text: rule.to_string(),
        });
    }

    Decimal::from_str(threshold)
        .map(AmountRule::AtLeast)
        .map_err(|source| RuleParseError::InvalidAmountThreshold {
            text: rule.to_string(),
            source,
        })
}

/// Evaluate an `R_Betrag` text against a proposed `amount`.
pub fn amount_rule_violated(text: &str, amount: Decimal) -> Result<bool, RuleParseError> {
    parse_amount_rule(text).map(|rule| rule.is_satisfied_by(amount))
}
