//! The accounting book.

use gncledger_shared::types::{Amount, Guid};
use indexmap::IndexMap;
use serde::Serialize;

use super::account::Account;
use super::balance::DerivedState;
use super::flow::Flow;
use super::transaction::Transaction;

/// A commodity declared by the exchange file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commodity {
    /// Namespace, e.g. `ISO4217` or `CURRENCY`.
    pub space: String,
    /// Symbol, e.g. `EUR`.
    pub id: String,
}

/// An in-memory accounting book.
///
/// The book owns every account and transaction, keyed by id and kept in
/// input order. Balances and flow histories are derived state: they are
/// empty until [`Book::recompute`] runs. The importers return books that
/// are already recomputed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Book {
    commodities: Vec<Commodity>,
    accounts: IndexMap<Guid, Account>,
    transactions: IndexMap<Guid, Transaction>,
    #[serde(skip)]
    pub(super) derived: DerivedState,
}

impl Book {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_commodity(&mut self, commodity: Commodity) {
        self.commodities.push(commodity);
    }

    /// Adds an account, returning the one it replaced if the id was taken.
    pub(crate) fn insert_account(&mut self, account: Account) -> Option<Account> {
        self.accounts.insert(account.id.clone(), account)
    }

    /// Adds a transaction, returning the one it replaced if the id was taken.
    pub(crate) fn insert_transaction(&mut self, transaction: Transaction) -> Option<Transaction> {
        self.transactions.insert(transaction.id.clone(), transaction)
    }

    /// Recomputes balances and per-account flow histories.
    ///
    /// Running it again on an unchanged book yields the same state.
    pub fn recompute(&mut self) {
        self.derived = DerivedState::compute(&self.accounts, &self.transactions);
    }

    /// Commodities declared by the source document.
    #[must_use]
    pub fn commodities(&self) -> &[Commodity] {
        &self.commodities
    }

    /// Accounts in input order.
    pub fn accounts(&self) -> impl ExactSizeIterator<Item = &Account> {
        self.accounts.values()
    }

    /// Looks an account up by id.
    #[must_use]
    pub fn account(&self, id: &Guid) -> Option<&Account> {
        self.accounts.get(id)
    }

    /// Looks an account up by its full path name.
    #[must_use]
    pub fn account_by_name(&self, name: &str) -> Option<&Account> {
        self.accounts.values().find(|account| account.name == name)
    }

    /// Direct children of an account.
    #[must_use]
    pub fn children(&self, id: &Guid) -> Vec<&Account> {
        self.accounts
            .get(id)
            .map(|account| {
                account
                    .children
                    .iter()
                    .filter_map(|child| self.accounts.get(child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Transactions in input order.
    pub fn transactions(&self) -> impl ExactSizeIterator<Item = &Transaction> {
        self.transactions.values()
    }

    /// Looks a transaction up by id.
    #[must_use]
    pub fn transaction(&self, id: &Guid) -> Option<&Transaction> {
        self.transactions.get(id)
    }

    /// The transaction owning `flow`.
    #[must_use]
    pub fn parent_of(&self, flow: &Flow) -> Option<&Transaction> {
        self.transactions.get(&flow.transaction)
    }

    /// Balance of an account as of the last recompute.
    #[must_use]
    pub fn balance(&self, id: &Guid) -> Option<&Amount> {
        self.derived.balances.get(id)
    }

    /// Flows of an account ordered by transaction value date.
    #[must_use]
    pub fn flows(&self, id: &Guid) -> Vec<&Flow> {
        self.derived
            .flows
            .get(id)
            .map(|refs| {
                refs.iter()
                    .map(|r| r.resolve(&self.transactions))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Sum of every account balance. Zero for a consistent double-entry book.
    #[must_use]
    pub fn total_balance(&self) -> Amount {
        self.derived.balances.values().sum()
    }
}
