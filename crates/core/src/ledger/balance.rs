//! Account balance calculations.
//!
//! Balances and per-account flow histories are derived from the book's
//! transactions and never stored in the exchange file.

use std::collections::HashMap;

use gncledger_shared::types::{Amount, Guid};
use indexmap::IndexMap;

use super::account::Account;
use super::flow::Flow;
use super::transaction::Transaction;

/// Position of a flow inside the book: the index of its transaction in
/// input order and the index of the split inside that transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct FlowRef {
    /// Transaction index.
    pub(crate) transaction: usize,
    /// Split index.
    pub(crate) split: usize,
}

impl FlowRef {
    /// Looks the flow up in `transactions`.
    pub(crate) fn resolve(self, transactions: &IndexMap<Guid, Transaction>) -> &Flow {
        &transactions[self.transaction].flows[self.split]
    }
}

/// State derived by [`Book::recompute`](super::Book::recompute).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DerivedState {
    /// Balance of every account, zero when it has no flows.
    pub(crate) balances: HashMap<Guid, Amount>,
    /// Flows of every account that has any, ordered by value date.
    pub(crate) flows: HashMap<Guid, Vec<FlowRef>>,
}

impl DerivedState {
    pub(crate) fn compute(
        accounts: &IndexMap<Guid, Account>,
        transactions: &IndexMap<Guid, Transaction>,
    ) -> Self {
        let flows = index_flows(accounts.len(), transactions);
        let balances = accounts
            .keys()
            .map(|id| {
                let balance = flows
                    .get(id)
                    .map_or_else(Amount::zero, |refs| sum_flows(refs, transactions));
                (id.clone(), balance)
            })
            .collect();

        Self { balances, flows }
    }
}

/// Groups flows by account, then orders each group by transaction date.
///
/// Transactions are scanned once in input order and the sort is stable, so
/// flows sharing a date keep their input order.
fn index_flows(
    capacity: usize,
    transactions: &IndexMap<Guid, Transaction>,
) -> HashMap<Guid, Vec<FlowRef>> {
    let mut flows: HashMap<Guid, Vec<FlowRef>> = HashMap::with_capacity(capacity);
    for (t, transaction) in transactions.values().enumerate() {
        for (s, flow) in transaction.flows.iter().enumerate() {
            flows.entry(flow.account.clone()).or_default().push(FlowRef {
                transaction: t,
                split: s,
            });
        }
    }

    for refs in flows.values_mut() {
        refs.sort_by_key(|r| transactions[r.transaction].date);
    }
    flows
}

fn sum_flows(refs: &[FlowRef], transactions: &IndexMap<Guid, Transaction>) -> Amount {
    let mut total = Amount::zero();
    for r in refs {
        total += &r.resolve(transactions).amount;
    }
    total
}
