//! GnuCash 2 XML import.
//!
//! Importing runs in two steps. [`schema`] decodes the XML into raw
//! records that mirror the exchange format; [`importer`] resolves ids,
//! amounts, timestamps, slots and the account hierarchy into a [`Book`].
//!
//! ```ignore
//! let book = gncledger_core::xmlimport::import_from_path("accounts.gnucash")?;
//! for account in book.accounts() {
//!     println!("{} {}", account.name, book.balance(&account.id).unwrap());
//! }
//! ```

pub mod error;
pub mod importer;
pub mod schema;
pub mod slot;
pub mod timestamp;

#[cfg(test)]
mod tests;

use std::io::Read;
use std::path::Path;

pub use error::{ImportError, ImportResult};
pub use schema::Document;
pub use slot::{SlotMap, SlotValue};

use crate::ledger::Book;

/// Imports a book from XML text.
pub fn import_from_str(text: &str) -> ImportResult<Book> {
    importer::import(&Document::parse(text)?)
}

/// Imports a book from an uncompressed XML stream.
pub fn import_from_reader<R: Read>(reader: R) -> ImportResult<Book> {
    importer::import(&Document::read(reader)?)
}

/// Imports a book from an uncompressed XML file.
pub fn import_from_path(path: impl AsRef<Path>) -> ImportResult<Book> {
    importer::import(&Document::read_path(path)?)
}
