use thiserror::Error;

/// A rule text that does not match its grammar.
#[derive(Debug, Error)]
pub enum RuleParseError {
    /// Age rule is neither a comparison nor a plain number.
    #[error("unrecognized age rule {text:?}")]
    UnrecognizedAgeRule { text: String },

    /// Age rule comparison whose threshold is not an integer.
    #[error("age rule {text:?} has a non-integer threshold")]
    InvalidAgeThreshold { text: String },

    /// Amount rule `>=` whose threshold contains characters outside a plain
    /// decimal literal.
    #[error("amount rule {text:?} has a malformed decimal threshold")]
    MalformedAmountThreshold { text: String },

    /// Amount rule `>=` whose threshold is not a decimal number.
    #[error("amount rule {text:?} has a malformed decimal threshold: {source}")]
    InvalidAmountThreshold {
        text: String,
        #[source]
        source: rust_decimal::Error,
    },
}

impl RuleParseError {
    /// The offending rule text as stored.
    pub fn text(&self) -> &str {
        match self {
            Self::UnrecognizedAgeRule { text }
            | Self::InvalidAgeThreshold { text }
            | Self::MalformedAmountThreshold { text }
            | Self::InvalidAmountThreshold { text, .. } => text,
        }
    }
}
