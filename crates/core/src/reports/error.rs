//! Report error types.

use gncledger_shared::types::Guid;
use thiserror::Error;

/// Result type alias using `ReportError`.
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Account not found by id.
    #[error("Account not found: {0}")]
    AccountNotFound(Guid),

    /// Account not found by path name.
    #[error("No account named {0:?}")]
    AccountNameNotFound(String),

    /// An account type name in the report settings is not recognised.
    #[error("Invalid account type in report settings: {0}")]
    InvalidAccountType(String),
}

impl ReportError {
    /// Returns the error code for diagnostics.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) | Self::AccountNameNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::InvalidAccountType(_) => "INVALID_ACCOUNT_TYPE",
        }
    }
}
