//! Core logic for gncledger.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! It reads GnuCash XML exports into an in-memory book and derives balances,
//! flow histories and reports from it.
//!
//! # Modules
//!
//! - `ledger` - Accounts, transactions, flows and derived balances
//! - `xmlimport` - GnuCash 2 XML decoding and import
//! - `reports` - Monthly balances, account lists and registers

pub mod ledger;
pub mod reports;
pub mod xmlimport;

pub use ledger::Book;
pub use xmlimport::{ImportError, ImportResult, import_from_path, import_from_reader, import_from_str};
