//! Primitive types shared by the importer and the ledger.

pub mod amount;
pub mod id;

pub use amount::Amount;
pub use id::{Guid, GuidGenerator, GUID_BYTES};

#[cfg(test)]
mod amount_tests;
