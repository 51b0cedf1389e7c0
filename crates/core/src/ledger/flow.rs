//! Flow (split) domain types.

use chrono::{DateTime, FixedOffset};
use gncledger_shared::types::{Amount, Guid};
use serde::{Deserialize, Serialize};

/// Which side of the books a flow lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Positive amount.
    Debit,
    /// Negative amount.
    Credit,
}

/// One leg of a transaction.
///
/// A flow is positive for debit actions and negative for credit actions.
/// `transaction` and `account` are lookups into the owning book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flow {
    /// Unique identifier for this flow.
    pub id: Guid,
    /// The transaction this flow belongs to.
    pub transaction: Guid,
    /// The account affected by this flow.
    pub account: Guid,
    /// Line item memo.
    pub memo: String,
    /// Signed value in the transaction currency.
    pub amount: Amount,
    /// Whether the flow was matched against a statement.
    pub reconciled: bool,
    /// When it was reconciled, if recorded.
    pub reconciled_at: Option<DateTime<FixedOffset>>,
}

impl Flow {
    /// Returns whether this flow is a debit or a credit.
    ///
    /// Zero amounts count as debits.
    #[must_use]
    pub fn entry_type(&self) -> EntryType {
        if self.amount.is_negative() {
            EntryType::Credit
        } else {
            EntryType::Debit
        }
    }
}
