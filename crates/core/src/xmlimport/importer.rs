//! Conversion of the decoded document into a [`Book`].
//!
//! The import runs in phases: accounts, parent links, path resolution,
//! child lists, then transactions. Any failure aborts the whole import and
//! no partial book escapes.

use std::collections::{HashMap, HashSet};

use gncledger_shared::types::{Amount, Guid};
use indexmap::IndexMap;
use tracing::{debug, info, warn};

use super::error::{ImportError, ImportResult};
use super::schema::{Document, RawAccount, RawSplit, RawTransaction};
use super::slot::{self, SlotMap, SlotValue};
use crate::ledger::{Account, AccountType, Book, Commodity, Flow, Transaction};

const NOTES: &str = "notes";

/// Builds a recomputed book from a decoded document.
///
/// # Errors
///
/// Returns the first format, schema, reference, state or structural error
/// met while resolving the document.
pub fn import(document: &Document) -> ImportResult<Book> {
    let raw = &document.book;

    let mut accounts = build_accounts(&raw.accounts)?;
    debug!(count = accounts.len(), "built accounts");

    check_parents(&accounts)?;
    let paths = resolve_paths(&accounts)?;
    for (id, path) in paths {
        if let Some(account) = accounts.get_mut(&id) {
            account.name = path;
        }
    }
    debug!("resolved account paths");

    link_children(&mut accounts);

    let mut book = Book::new();
    for commodity in &raw.commodities {
        book.push_commodity(Commodity {
            space: commodity.space.clone(),
            id: commodity.id.clone(),
        });
    }
    for account in accounts.values() {
        book.insert_account(account.clone());
    }

    for raw_transaction in &raw.transactions {
        let transaction = build_transaction(raw_transaction, &accounts)?;
        let id = transaction.id.clone();
        if book.insert_transaction(transaction).is_some() {
            return Err(ImportError::Schema {
                entity: format!("transaction {id}"),
                message: "duplicate transaction id".to_string(),
            });
        }
    }
    debug!(count = raw.transactions.len(), "built transactions");

    book.recompute();
    info!(
        book = %raw.id,
        accounts = book.accounts().len(),
        transactions = book.transactions().len(),
        "imported book"
    );
    Ok(book)
}

fn parse_guid(text: &str, entity: &str, field: &str) -> ImportResult<Guid> {
    Guid::parse(text).map_err(|e| ImportError::format(entity, field, &e))
}

/// Returns the `notes` slot, which must hold a string.
fn notes(slots: &SlotMap, entity: &str) -> ImportResult<Option<String>> {
    match slots.get(NOTES) {
        None => Ok(None),
        Some(SlotValue::String(notes)) => Ok(Some(notes.clone())),
        Some(_) => Err(ImportError::Type {
            entity: entity.to_string(),
            field: NOTES.to_string(),
        }),
    }
}

fn build_accounts(raw: &[RawAccount]) -> ImportResult<IndexMap<Guid, Account>> {
    let mut accounts = IndexMap::with_capacity(raw.len());
    for raw_account in raw {
        let account = build_account(raw_account)?;
        let id = account.id.clone();
        if accounts.insert(id.clone(), account).is_some() {
            return Err(ImportError::Schema {
                entity: format!("account {id}"),
                message: "duplicate account id".to_string(),
            });
        }
    }
    Ok(accounts)
}

fn build_account(raw: &RawAccount) -> ImportResult<Account> {
    let entity = format!("account {}", raw.id);
    let id = parse_guid(&raw.id, &entity, "id")?;

    let account_type = AccountType::from_tag(&raw.account_type);
    if let AccountType::Other(tag) = &account_type {
        warn!(account = %id, tag = %tag, "unknown account type kept as is");
    }

    let parent = raw
        .parent
        .as_deref()
        .filter(|text| !text.is_empty())
        .map(|text| parse_guid(text, &entity, "parent"))
        .transpose()?;

    let denom = raw
        .commodity_scu
        .as_deref()
        .map(|text| {
            text.parse::<u32>().map_err(|e| ImportError::Format {
                entity: entity.clone(),
                field: "commodity-scu".to_string(),
                text: text.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()?;

    let slots = slot::decode(&raw.slots, &entity)?;
    let description = notes(&slots, &entity)?.or_else(|| raw.description.clone());

    Ok(Account {
        id,
        name: raw.name.clone(),
        account_type,
        unit: raw
            .commodity
            .as_ref()
            .map(|c| c.id.clone())
            .unwrap_or_default(),
        denom,
        description,
        parent,
        children: Vec::new(),
    })
}

fn check_parents(accounts: &IndexMap<Guid, Account>) -> ImportResult<()> {
    for account in accounts.values() {
        if let Some(parent) = &account.parent
            && !accounts.contains_key(parent)
        {
            return Err(ImportError::Reference {
                account: parent.to_string(),
                referrer: format!("account {}", account.id),
            });
        }
    }
    Ok(())
}

/// Path of an account that does not depend on its ancestors' paths.
fn anchored_path(account: &Account, accounts: &IndexMap<Guid, Account>) -> Option<String> {
    if account.is_root() {
        return Some("/".to_string());
    }
    match &account.parent {
        None => Some(format!("/{}", account.name)),
        Some(parent) if accounts.get(parent).is_some_and(Account::is_root) => {
            Some(format!("/{}", account.name))
        }
        Some(_) => None,
    }
}

/// Computes the full path of every account.
///
/// Fails on parent cycles and on two non-root accounts sharing a path.
fn resolve_paths(accounts: &IndexMap<Guid, Account>) -> ImportResult<IndexMap<Guid, String>> {
    let mut paths: IndexMap<Guid, String> = IndexMap::with_capacity(accounts.len());

    for id in accounts.keys() {
        let mut chain: Vec<&Account> = Vec::new();
        let mut seen: HashSet<&Guid> = HashSet::new();
        let mut cursor = id;

        let mut prefix = loop {
            if let Some(path) = paths.get(cursor) {
                break path.clone();
            }
            if !seen.insert(cursor) {
                return Err(ImportError::Structural {
                    account: cursor.to_string(),
                    message: "account is its own ancestor".to_string(),
                });
            }
            let account = accounts.get(cursor).ok_or_else(|| ImportError::Reference {
                account: cursor.to_string(),
                referrer: format!("account {id}"),
            })?;
            if let Some(path) = anchored_path(account, accounts) {
                paths.insert(cursor.clone(), path.clone());
                break path;
            }
            chain.push(account);
            // Accounts without a parent are anchored above.
            let Some(parent) = &account.parent else {
                break String::new();
            };
            cursor = parent;
        };

        for account in chain.into_iter().rev() {
            let path = format!("{prefix}/{}", account.name);
            paths.insert(account.id.clone(), path.clone());
            prefix = path;
        }
    }

    // Roots share "/" with each other and with nobody else.
    let is_root = |id: &Guid| accounts.get(id).is_some_and(Account::is_root);
    let mut owners: HashMap<&str, &Guid> = HashMap::with_capacity(paths.len());
    for (id, path) in &paths {
        match owners.get(path.as_str()) {
            Some(other) if is_root(id) && is_root(*other) => {}
            Some(other) => {
                return Err(ImportError::Structural {
                    account: id.to_string(),
                    message: format!("path {path:?} is already used by account {other}"),
                });
            }
            None => {
                owners.insert(path.as_str(), id);
            }
        }
    }
    Ok(paths)
}

fn link_children(accounts: &mut IndexMap<Guid, Account>) {
    let links: Vec<(Guid, Guid)> = accounts
        .values()
        .filter_map(|account| {
            account
                .parent
                .clone()
                .map(|parent| (parent, account.id.clone()))
        })
        .collect();
    for (parent, child) in links {
        if let Some(account) = accounts.get_mut(&parent) {
            account.children.push(child);
        }
    }
}

fn build_transaction(
    raw: &RawTransaction,
    accounts: &IndexMap<Guid, Account>,
) -> ImportResult<Transaction> {
    let entity = format!("transaction {}", raw.id);
    let id = parse_guid(&raw.id, &entity, "id")?;

    let slots = slot::decode(&raw.slots, &entity)?;
    let notes = notes(&slots, &entity)?;
    let date = raw.date_posted.resolve(&entity, "date-posted")?;
    let stamp = raw.date_entered.resolve(&entity, "date-entered")?;

    let flows = raw
        .splits
        .iter()
        .map(|split| build_flow(split, &id, accounts))
        .collect::<ImportResult<Vec<_>>>()?;

    Ok(Transaction {
        id,
        date,
        stamp,
        currency: raw
            .currency
            .as_ref()
            .map(|c| c.id.clone())
            .unwrap_or_default(),
        description: raw.description.clone(),
        notes,
        number: raw.number.clone(),
        flows,
    })
}

fn build_flow(
    raw: &RawSplit,
    transaction: &Guid,
    accounts: &IndexMap<Guid, Account>,
) -> ImportResult<Flow> {
    let entity = format!("split {} of transaction {transaction}", raw.id);
    let id = parse_guid(&raw.id, &entity, "id")?;

    let account = parse_guid(&raw.account, &entity, "account")?;
    if !accounts.contains_key(&account) {
        return Err(ImportError::Reference {
            account: account.to_string(),
            referrer: entity,
        });
    }

    let amount = Amount::parse(&raw.value).map_err(|e| ImportError::format(&entity, "value", &e))?;
    if let Ok(quantity) = Amount::parse(&raw.quantity)
        && quantity != amount
    {
        warn!(
            split = %id,
            value = %amount.to_ratio_string(),
            quantity = %quantity.to_ratio_string(),
            "split quantity differs from value; using value"
        );
    }

    let (reconciled, reconciled_at) = match raw.reconciled_state.as_str() {
        "y" => {
            let at = raw
                .reconcile_date
                .as_ref()
                .map(|stamp| stamp.resolve(&entity, "reconcile-date"))
                .transpose()?;
            (true, at)
        }
        "n" => (false, None),
        other => {
            return Err(ImportError::State {
                split: entity,
                state: other.to_string(),
            });
        }
    };

    Ok(Flow {
        id,
        transaction: transaction.clone(),
        account,
        memo: raw.memo.clone(),
        amount,
        reconciled,
        reconciled_at,
    })
}
