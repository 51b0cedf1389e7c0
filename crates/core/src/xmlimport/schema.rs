//! Intermediate tree mirroring the GnuCash 2 XML schema.
//!
//! The reader only checks XML well-formedness and locates elements by
//! namespace and local name. Every scalar stays as raw text; parsing ids,
//! amounts and timestamps is left to the importer, which knows which entity
//! to blame when one is malformed. Missing elements read as empty text.

use std::io::Read;
use std::path::Path;

use roxmltree::Node;
use tracing::debug;

use super::error::{ImportError, ImportResult};

/// XML namespaces used by the exchange format.
pub mod ns {
    /// Top-level book elements.
    pub const GNC: &str = "http://www.gnucash.org/XML/gnc";
    /// Book fields.
    pub const BOOK: &str = "http://www.gnucash.org/XML/book";
    /// Account fields.
    pub const ACT: &str = "http://www.gnucash.org/XML/act";
    /// Transaction fields.
    pub const TRN: &str = "http://www.gnucash.org/XML/trn";
    /// Split fields.
    pub const SPLIT: &str = "http://www.gnucash.org/XML/split";
    /// Slot fields.
    pub const SLOT: &str = "http://www.gnucash.org/XML/slot";
    /// Commodity fields.
    pub const CMDTY: &str = "http://www.gnucash.org/XML/cmdty";
    /// Timestamp fields.
    pub const TS: &str = "http://www.gnucash.org/XML/ts";
}

/// A decoded exchange document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// The single book it contains.
    pub book: RawBook,
}

/// `gnc:book`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBook {
    /// `book:id`.
    pub id: String,
    /// `gnc:commodity` children.
    pub commodities: Vec<RawCommodity>,
    /// `gnc:account` children.
    pub accounts: Vec<RawAccount>,
    /// `gnc:transaction` children.
    pub transactions: Vec<RawTransaction>,
}

/// A commodity reference or declaration (`cmdty:space` + `cmdty:id`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCommodity {
    /// `cmdty:space`.
    pub space: String,
    /// `cmdty:id`.
    pub id: String,
}

/// `gnc:account`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAccount {
    /// `act:id`.
    pub id: String,
    /// `act:name`, the leaf name.
    pub name: String,
    /// `act:type`.
    pub account_type: String,
    /// `act:commodity`.
    pub commodity: Option<RawCommodity>,
    /// `act:commodity-scu`.
    pub commodity_scu: Option<String>,
    /// `act:description`.
    pub description: Option<String>,
    /// `act:slots`.
    pub slots: Vec<Slot>,
    /// `act:parent`.
    pub parent: Option<String>,
}

/// `gnc:transaction`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTransaction {
    /// `trn:id`.
    pub id: String,
    /// `trn:currency`.
    pub currency: Option<RawCommodity>,
    /// `trn:num`.
    pub number: String,
    /// `trn:description`.
    pub description: String,
    /// `trn:slots`.
    pub slots: Vec<Slot>,
    /// `trn:splits`.
    pub splits: Vec<RawSplit>,
    /// `trn:date-posted`.
    pub date_posted: TimeStamp,
    /// `trn:date-entered`.
    pub date_entered: TimeStamp,
}

/// `trn:split`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSplit {
    /// `split:id`.
    pub id: String,
    /// `split:account`.
    pub account: String,
    /// `split:memo`.
    pub memo: String,
    /// `split:reconciled-state`.
    pub reconciled_state: String,
    /// `split:reconcile-date`.
    pub reconcile_date: Option<TimeStamp>,
    /// `split:value`, in the transaction currency.
    pub value: String,
    /// `split:quantity`, in the account commodity.
    pub quantity: String,
}

/// A `(ts:date, ts:ns)` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeStamp {
    /// `ts:date`, `YYYY-MM-DD HH:MM:SS ±ZZZZ`.
    pub date: String,
    /// `ts:ns`, nanoseconds added to `date`.
    pub ns: Option<String>,
}

/// A `slot` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slot {
    /// `slot:key`.
    pub key: String,
    /// `slot:value`.
    pub value: RawSlotValue,
}

/// A `slot:value` element with its `type` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSlotValue {
    /// The `type` attribute.
    pub kind: String,
    /// Character data, for scalar kinds.
    pub text: String,
    /// Nested `gdate` element, for `gdate`.
    pub gdate: Option<String>,
    /// Nested timestamp, for `timespec`.
    pub timestamp: Option<TimeStamp>,
    /// Nested slots, for `frame`.
    pub frame: Vec<Slot>,
}

impl Document {
    /// Parses a document from XML text.
    pub fn parse(text: &str) -> ImportResult<Self> {
        let xml = roxmltree::Document::parse(text)?;
        let root = xml.root_element();
        let book = if is(root, ns::GNC, "book") {
            root
        } else {
            child(root, ns::GNC, "book").ok_or_else(|| ImportError::Schema {
                entity: format!("document <{}>", root.tag_name().name()),
                message: "missing gnc:book element".to_string(),
            })?
        };

        let book = read_book(book);
        debug!(
            commodities = book.commodities.len(),
            accounts = book.accounts.len(),
            transactions = book.transactions.len(),
            "decoded exchange document"
        );
        Ok(Self { book })
    }

    /// Reads a whole document from `reader`.
    pub fn read<R: Read>(mut reader: R) -> ImportResult<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| ImportError::Io {
                path: "<stream>".to_string(),
                source,
            })?;
        Self::parse(&text)
    }

    /// Reads the named file.
    pub fn read_path(path: impl AsRef<Path>) -> ImportResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }
}

fn is(node: Node<'_, '_>, namespace: &str, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(namespace)
}

/// Matches on local name only; `slot` and `gdate` are written unprefixed.
fn is_local(node: Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

fn child<'a, 'i>(node: Node<'a, 'i>, namespace: &str, name: &str) -> Option<Node<'a, 'i>> {
    node.children().find(|c| is(*c, namespace, name))
}

fn children<'a, 'i>(
    node: Node<'a, 'i>,
    namespace: &'a str,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'i>> {
    node.children().filter(move |c| is(*c, namespace, name))
}

/// Free text, kept verbatim.
fn text(node: Node<'_, '_>) -> String {
    node.text().unwrap_or_default().to_string()
}

/// Scalar text (ids, codes, numbers, dates), trimmed.
fn scalar(node: Node<'_, '_>) -> String {
    node.text().unwrap_or_default().trim().to_string()
}

fn text_of(node: Node<'_, '_>, namespace: &str, name: &str) -> String {
    child(node, namespace, name).map(text).unwrap_or_default()
}

fn scalar_of(node: Node<'_, '_>, namespace: &str, name: &str) -> String {
    child(node, namespace, name).map(scalar).unwrap_or_default()
}

fn read_book(node: Node<'_, '_>) -> RawBook {
    RawBook {
        id: scalar_of(node, ns::BOOK, "id"),
        commodities: children(node, ns::GNC, "commodity")
            .map(read_commodity)
            .collect(),
        accounts: children(node, ns::GNC, "account").map(read_account).collect(),
        transactions: children(node, ns::GNC, "transaction")
            .map(read_transaction)
            .collect(),
    }
}

fn read_commodity(node: Node<'_, '_>) -> RawCommodity {
    RawCommodity {
        space: scalar_of(node, ns::CMDTY, "space"),
        id: scalar_of(node, ns::CMDTY, "id"),
    }
}

fn read_account(node: Node<'_, '_>) -> RawAccount {
    RawAccount {
        id: scalar_of(node, ns::ACT, "id"),
        name: text_of(node, ns::ACT, "name"),
        account_type: scalar_of(node, ns::ACT, "type"),
        commodity: child(node, ns::ACT, "commodity").map(read_commodity),
        commodity_scu: child(node, ns::ACT, "commodity-scu").map(scalar),
        description: child(node, ns::ACT, "description").map(text),
        slots: child(node, ns::ACT, "slots").map(read_slots).unwrap_or_default(),
        parent: child(node, ns::ACT, "parent").map(scalar),
    }
}

fn read_transaction(node: Node<'_, '_>) -> RawTransaction {
    RawTransaction {
        id: scalar_of(node, ns::TRN, "id"),
        currency: child(node, ns::TRN, "currency").map(read_commodity),
        number: text_of(node, ns::TRN, "num"),
        description: text_of(node, ns::TRN, "description"),
        slots: child(node, ns::TRN, "slots").map(read_slots).unwrap_or_default(),
        splits: child(node, ns::TRN, "splits")
            .map(|splits| children(splits, ns::TRN, "split").map(read_split).collect())
            .unwrap_or_default(),
        date_posted: child(node, ns::TRN, "date-posted")
            .map(read_timestamp)
            .unwrap_or_default(),
        date_entered: child(node, ns::TRN, "date-entered")
            .map(read_timestamp)
            .unwrap_or_default(),
    }
}

fn read_split(node: Node<'_, '_>) -> RawSplit {
    RawSplit {
        id: scalar_of(node, ns::SPLIT, "id"),
        account: scalar_of(node, ns::SPLIT, "account"),
        memo: text_of(node, ns::SPLIT, "memo"),
        reconciled_state: scalar_of(node, ns::SPLIT, "reconciled-state"),
        reconcile_date: child(node, ns::SPLIT, "reconcile-date").map(read_timestamp),
        value: scalar_of(node, ns::SPLIT, "value"),
        quantity: scalar_of(node, ns::SPLIT, "quantity"),
    }
}

fn read_timestamp(node: Node<'_, '_>) -> TimeStamp {
    TimeStamp {
        date: scalar_of(node, ns::TS, "date"),
        ns: child(node, ns::TS, "ns").map(scalar),
    }
}

fn read_slots(node: Node<'_, '_>) -> Vec<Slot> {
    node.children()
        .filter(|c| is_local(*c, "slot"))
        .map(read_slot)
        .collect()
}

fn read_slot(node: Node<'_, '_>) -> Slot {
    let value = child(node, ns::SLOT, "value").map_or_else(RawSlotValue::default, |value| {
        RawSlotValue {
            kind: value.attribute("type").unwrap_or_default().to_string(),
            text: text(value),
            gdate: value
                .children()
                .find(|c| is_local(*c, "gdate"))
                .map(scalar),
            timestamp: child(value, ns::TS, "date").map(|_| read_timestamp(value)),
            frame: read_slots(value),
        }
    });

    Slot {
        key: text_of(node, ns::SLOT, "key"),
        value,
    }
}
