//! Reports over an imported book.
//!
//! This module provides pure functions deriving views from a recomputed
//! [`Book`](crate::ledger::Book):
//! - Monthly cumulative balance over a set of accounts
//! - Total assets over configured account types
//! - Account list with balances
//! - Account register with running balance

pub mod error;
pub mod service;
pub mod types;


pub use error::{ReportError, ReportResult};
pub use service::{account_summaries, parse_account_types, register, register_by_name, total_assets};
pub use types::*;
