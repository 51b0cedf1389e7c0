//! Import error types.
//!
//! Every failure aborts the whole import; the variants carry enough context
//! (account, transaction or split id) to find the offending XML element.

use gncledger_shared::ParseError;
use thiserror::Error;

/// Result type alias using `ImportError`.
pub type ImportResult<T> = Result<T, ImportError>;

/// Errors that can occur while importing an exchange document.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The document could not be read.
    #[error("Cannot read {path}: {source}")]
    Io {
        /// File path, or `<stream>` for readers.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed XML.
    #[error("Malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// A scalar (identifier, amount, timestamp, slot value) failed to parse.
    #[error("Invalid {field} {text:?} in {entity}: {reason}")]
    Format {
        /// Owning entity, e.g. `split 0123… of transaction 4567…`.
        entity: String,
        /// Element or slot key holding the text.
        field: String,
        /// The raw text.
        text: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Well-formed XML that does not match the exchange schema.
    #[error("Schema error in {entity}: {message}")]
    Schema {
        /// Owning entity.
        entity: String,
        /// What was wrong.
        message: String,
    },

    /// A well-known slot holds a value of the wrong type.
    #[error("{field} of {entity} is not a string")]
    Type {
        /// Owning entity.
        entity: String,
        /// Slot key.
        field: String,
    },

    /// A reference to an account that is not in the document.
    #[error("Account {account} does not exist (referenced by {referrer})")]
    Reference {
        /// The missing account id.
        account: String,
        /// Who referenced it.
        referrer: String,
    },

    /// A split's reconciled-state code is neither `y` nor `n`.
    #[error("Invalid reconciled state {state:?} in {split}")]
    State {
        /// The split.
        split: String,
        /// The offending code.
        state: String,
    },

    /// The account hierarchy is not a tree of unique paths.
    #[error("Account hierarchy error at account {account}: {message}")]
    Structural {
        /// Account where the problem was detected.
        account: String,
        /// What was wrong.
        message: String,
    },
}

impl ImportError {
    /// Wraps a shared parse error with the entity and field it came from.
    pub(crate) fn format(entity: &str, field: &str, err: &ParseError) -> Self {
        Self::Format {
            entity: entity.to_string(),
            field: field.to_string(),
            text: err.text().to_string(),
            reason: err.reason().to_string(),
        }
    }

    /// Returns the error code for diagnostics.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "IO_ERROR",
            Self::Xml(_) => "XML_ERROR",
            Self::Format { .. } => "FORMAT_ERROR",
            Self::Schema { .. } => "SCHEMA_ERROR",
            Self::Type { .. } => "TYPE_ERROR",
            Self::Reference { .. } => "REFERENCE_ERROR",
            Self::State { .. } => "STATE_ERROR",
            Self::Structural { .. } => "STRUCTURAL_ERROR",
        }
    }
}
