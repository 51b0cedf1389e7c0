//! Report generation over an imported book.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use gncledger_shared::types::{Amount, Guid};

use super::error::{ReportError, ReportResult};
use super::types::{AccountSummary, BalancePoint, BalanceReport, RegisterLine};
use crate::ledger::{AccountType, Book};

impl BalanceReport {
    /// Builds the cumulative monthly balance of `accounts`.
    ///
    /// Flows are bucketed by the calendar month of their transaction's
    /// value date, in the offset it was recorded with. Unknown ids
    /// contribute nothing.
    pub fn monthly<'a, I>(book: &Book, accounts: I) -> Self
    where
        I: IntoIterator<Item = &'a Guid>,
    {
        let mut per_month: BTreeMap<NaiveDate, Amount> = BTreeMap::new();
        for id in accounts {
            for flow in book.flows(id) {
                let Some(transaction) = book.parent_of(flow) else {
                    continue;
                };
                let Some(month) = transaction.date.date_naive().with_day(1) else {
                    continue;
                };
                *per_month.entry(month).or_default() += &flow.amount;
            }
        }

        let totals = Amount::running_totals(per_month.values());
        let points = per_month
            .into_keys()
            .zip(totals)
            .map(|(month, value)| BalancePoint { month, value })
            .collect();
        Self { points }
    }
}

/// Parses account type names such as `BANK`.
///
/// # Errors
///
/// Returns `InvalidAccountType` for the first unknown name.
pub fn parse_account_types<S: AsRef<str>>(names: &[S]) -> ReportResult<Vec<AccountType>> {
    names
        .iter()
        .map(|name| {
            name.as_ref()
                .trim()
                .parse()
                .map_err(|_| ReportError::InvalidAccountType(name.as_ref().to_string()))
        })
        .collect()
}

/// Monthly balance over every account whose type is in `types`.
#[must_use]
pub fn total_assets(book: &Book, types: &[AccountType]) -> BalanceReport {
    let ids: Vec<&Guid> = book
        .accounts()
        .filter(|account| types.contains(&account.account_type))
        .map(|account| &account.id)
        .collect();
    BalanceReport::monthly(book, ids)
}

/// Lists every account with its balance, sorted by type tag then path.
#[must_use]
pub fn account_summaries(book: &Book) -> Vec<AccountSummary> {
    let mut summaries: Vec<AccountSummary> = book
        .accounts()
        .map(|account| AccountSummary {
            id: account.id.clone(),
            name: account.name.clone(),
            account_type: account.account_type.clone(),
            unit: account.unit.clone(),
            balance: book.balance(&account.id).cloned().unwrap_or_default(),
            description: account.description.clone(),
        })
        .collect();
    summaries.sort_by(|a, b| {
        a.account_type
            .as_str()
            .cmp(b.account_type.as_str())
            .then_with(|| a.name.cmp(&b.name))
    });
    summaries
}

/// The register of one account: its flows by date with a running balance.
///
/// # Errors
///
/// Returns `AccountNotFound` if the book has no such account.
pub fn register(book: &Book, id: &Guid) -> ReportResult<Vec<RegisterLine>> {
    if book.account(id).is_none() {
        return Err(ReportError::AccountNotFound(id.clone()));
    }

    let flows = book.flows(id);
    let balances = Amount::running_totals(flows.iter().map(|flow| &flow.amount));

    let lines = flows
        .into_iter()
        .zip(balances)
        .filter_map(|(flow, balance)| {
            let transaction = book.parent_of(flow)?;
            Some(RegisterLine {
                date: transaction.date,
                number: transaction.number.clone(),
                description: transaction.description.clone(),
                memo: flow.memo.clone(),
                amount: flow.amount.clone(),
                balance,
                reconciled: flow.reconciled,
            })
        })
        .collect();
    Ok(lines)
}

/// Same as [`register`], looking the account up by path name.
///
/// # Errors
///
/// Returns `AccountNameNotFound` if no account has that path.
pub fn register_by_name(book: &Book, name: &str) -> ReportResult<Vec<RegisterLine>> {
    let account = book
        .account_by_name(name)
        .ok_or_else(|| ReportError::AccountNameNotFound(name.to_string()))?;
    register(book, &account.id)
}
