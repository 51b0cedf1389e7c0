//! Transaction aggregate.

use chrono::{DateTime, FixedOffset};
use gncledger_shared::types::{Amount, Guid};
use serde::{Deserialize, Serialize};

use super::flow::Flow;

/// A financial transaction and the flows it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: Guid,
    /// Value date.
    pub date: DateTime<FixedOffset>,
    /// When the transaction was entered.
    pub stamp: DateTime<FixedOffset>,
    /// Currency the flow values are expressed in.
    pub currency: String,
    /// Transaction description.
    pub description: String,
    /// Additional notes.
    pub notes: Option<String>,
    /// Sequence number (cheque number and the like).
    pub number: String,
    /// Flows in input order.
    #[serde(default)]
    pub flows: Vec<Flow>,
}

impl Transaction {
    /// Returns the sum of all flow amounts.
    ///
    /// Zero for a balanced double-entry transaction.
    #[must_use]
    pub fn imbalance(&self) -> Amount {
        self.flows.iter().map(|flow| &flow.amount).sum()
    }

    /// Returns true if debits equal credits.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.imbalance().is_zero()
    }
}
