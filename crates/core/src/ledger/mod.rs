//! Double-entry bookkeeping model.
//!
//! This module implements the in-memory ledger:
//! - Accounts arranged in a tree of `/`-separated paths
//! - Transactions owning their flows (splits)
//! - The book owning both, with derived balances and flow histories

pub mod account;
pub mod balance;
pub mod book;
pub mod flow;
pub mod transaction;


pub use account::{Account, AccountType};
pub use book::{Book, Commodity};
pub use flow::{EntryType, Flow};
pub use transaction::Transaction;
