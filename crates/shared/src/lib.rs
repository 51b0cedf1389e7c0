//! Shared types, errors, and configuration for gncledger.
//!
//! This crate provides common types used across all other crates:
//! - Exact rational amounts
//! - GnuCash identifiers and an identifier generator
//! - Parse errors for both
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{ParseError, ParseResult};
pub use types::{Amount, Guid, GuidGenerator};
