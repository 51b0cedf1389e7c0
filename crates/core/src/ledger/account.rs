//! Account domain types.

use gncledger_shared::types::Guid;
use serde::{Deserialize, Serialize};

/// The GnuCash account type vocabulary.
///
/// Tags outside the known set are kept verbatim in [`AccountType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountType {
    /// Top of an account tree.
    Root,
    /// Bank account.
    Bank,
    /// Cash in wallet.
    Cash,
    /// Credit card.
    Credit,
    /// Generic asset.
    Asset,
    /// Generic liability.
    Liability,
    /// Stock holding.
    Stock,
    /// Mutual fund holding.
    Mutual,
    /// Foreign currency holding.
    Currency,
    /// Income category.
    Income,
    /// Expense category.
    Expense,
    /// Opening balances and retained earnings.
    Equity,
    /// Accounts receivable.
    Receivable,
    /// Accounts payable.
    Payable,
    /// Trading account for multi-commodity transactions.
    Trading,
    /// Legacy checking account.
    Checking,
    /// Legacy savings account.
    Savings,
    /// Legacy money market account.
    MoneyMrkt,
    /// Legacy line of credit.
    CreditLine,
    /// Any other tag.
    Other(String),
}

impl AccountType {
    /// Returns the tag as written in the exchange format.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Root => "ROOT",
            Self::Bank => "BANK",
            Self::Cash => "CASH",
            Self::Credit => "CREDIT",
            Self::Asset => "ASSET",
            Self::Liability => "LIABILITY",
            Self::Stock => "STOCK",
            Self::Mutual => "MUTUAL",
            Self::Currency => "CURRENCY",
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
            Self::Equity => "EQUITY",
            Self::Receivable => "RECEIVABLE",
            Self::Payable => "PAYABLE",
            Self::Trading => "TRADING",
            Self::Checking => "CHECKING",
            Self::Savings => "SAVINGS",
            Self::MoneyMrkt => "MONEYMRKT",
            Self::CreditLine => "CREDITLINE",
            Self::Other(tag) => tag,
        }
    }

    /// Reads a tag from an exchange file, keeping unknown tags.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or_else(|_| Self::Other(tag.to_string()))
    }
}

impl From<String> for AccountType {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<AccountType> for String {
    fn from(account_type: AccountType) -> Self {
        account_type.as_str().to_string()
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROOT" => Ok(Self::Root),
            "BANK" => Ok(Self::Bank),
            "CASH" => Ok(Self::Cash),
            "CREDIT" => Ok(Self::Credit),
            "ASSET" => Ok(Self::Asset),
            "LIABILITY" => Ok(Self::Liability),
            "STOCK" => Ok(Self::Stock),
            "MUTUAL" => Ok(Self::Mutual),
            "CURRENCY" => Ok(Self::Currency),
            "INCOME" => Ok(Self::Income),
            "EXPENSE" => Ok(Self::Expense),
            "EQUITY" => Ok(Self::Equity),
            "RECEIVABLE" => Ok(Self::Receivable),
            "PAYABLE" => Ok(Self::Payable),
            "TRADING" => Ok(Self::Trading),
            "CHECKING" => Ok(Self::Checking),
            "SAVINGS" => Ok(Self::Savings),
            "MONEYMRKT" => Ok(Self::MoneyMrkt),
            "CREDITLINE" => Ok(Self::CreditLine),
            _ => Err(format!("Unknown account type: {s}")),
        }
    }
}

/// An account of the book.
///
/// After import `name` is the full `/`-separated path from the root, e.g.
/// `/Assets/Current Assets/Checking`. `parent` and `children` are lookups
/// into the owning [`Book`](super::Book), never owned accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: Guid,
    /// Full path name.
    pub name: String,
    /// Account type tag.
    pub account_type: AccountType,
    /// Commodity the account is denominated in (e.g. `EUR`).
    pub unit: String,
    /// Smallest fraction of the unit the account tracks (usually 100).
    pub denom: Option<u32>,
    /// Free-text description.
    pub description: Option<String>,
    /// Parent account, if any.
    pub parent: Option<Guid>,
    /// Direct child accounts, in input order.
    #[serde(default)]
    pub children: Vec<Guid>,
}

impl Account {
    /// Returns true for the top of an account tree.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.account_type == AccountType::Root
    }

    /// Returns the last path component.
    #[must_use]
    pub fn leaf_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}
