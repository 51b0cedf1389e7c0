//! Parse errors for the shared primitive types.

use thiserror::Error;

/// Result type alias using `ParseError`.
pub type ParseResult<T> = Result<T, ParseError>;

/// Failure to decode an identifier or an amount from its text form.
///
/// Both variants carry the offending raw text so callers can wrap them with
/// the id of the entity that contained it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Text is not a 32-character hex identifier.
    #[error("Invalid GUID {text:?}: {reason}")]
    InvalidGuid {
        /// The raw text.
        text: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Text is not an integer or a `numerator/denominator` pair.
    #[error("Invalid amount {text:?}: {reason}")]
    InvalidAmount {
        /// The raw text.
        text: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl ParseError {
    /// Returns the raw text that failed to parse.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::InvalidGuid { text, .. } | Self::InvalidAmount { text, .. } => text,
        }
    }

    /// Returns why the text was rejected.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::InvalidGuid { reason, .. } | Self::InvalidAmount { reason, .. } => reason,
        }
    }

    /// Returns the error code for diagnostics.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidGuid { .. } => "INVALID_GUID",
            Self::InvalidAmount { .. } => "INVALID_AMOUNT",
        }
    }

    pub(crate) fn guid(text: &str, reason: impl Into<String>) -> Self {
        Self::InvalidGuid {
            text: text.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn amount(text: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
