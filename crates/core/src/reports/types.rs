//! Report data types.

use chrono::{DateTime, FixedOffset, NaiveDate};
use gncledger_shared::types::{Amount, Guid};
use serde::Serialize;

use crate::ledger::AccountType;

/// Cumulative balance at the end of a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalancePoint {
    /// First day of the month.
    pub month: NaiveDate,
    /// Total of every selected flow dated in or before this month.
    pub value: Amount,
}

impl BalancePoint {
    /// Month label, e.g. `Jan 2021`.
    #[must_use]
    pub fn label(&self) -> String {
        self.month.format("%b %Y").to_string()
    }
}

/// Month-by-month cumulative balance over a set of accounts.
///
/// Only months in which at least one selected flow was posted appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BalanceReport {
    /// Points in chronological order.
    pub points: Vec<BalancePoint>,
}

impl std::fmt::Display for BalanceReport {
    /// One `Mon YYYY,amount` line per month.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for point in &self.points {
            writeln!(f, "{},{}", point.label(), point.value)?;
        }
        Ok(())
    }
}

/// One line of the account list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    /// Account ID.
    pub id: Guid,
    /// Full path name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Commodity symbol.
    pub unit: String,
    /// Current balance.
    pub balance: Amount,
    /// Description, if any.
    pub description: Option<String>,
}

/// One line of an account register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterLine {
    /// Value date of the owning transaction.
    pub date: DateTime<FixedOffset>,
    /// Transaction number.
    pub number: String,
    /// Transaction description.
    pub description: String,
    /// Flow memo.
    pub memo: String,
    /// Signed flow amount.
    pub amount: Amount,
    /// Account balance after this flow.
    pub balance: Amount,
    /// Whether the flow is reconciled.
    pub reconciled: bool,
}
