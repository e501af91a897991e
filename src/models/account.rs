//! Account classification
//!
//! Ledger accounts are colon-delimited paths such as
//! `expenses:Groceries:Costco`. The first segment names the account type and
//! the second the category. Paths are classified once, when a posting is
//! built, and every report dispatches on the parsed [`AccountKind`].

use serde::{Serialize, Serializer};
use std::fmt;

/// Top-level account type
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccountKind {
    Assets,
    Liabilities,
    Income,
    Expenses,
    /// Any other top-level segment (equity, revenue aliases, ...), lower-cased
    Other(String),
}

impl AccountKind {
    /// Parse the first path segment. Matching is case-insensitive.
    pub fn parse(segment: &str) -> Self {
        match segment.to_lowercase().as_str() {
            "assets" => Self::Assets,
            "liabilities" => Self::Liabilities,
            "income" => Self::Income,
            "expenses" => Self::Expenses,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Assets => "assets",
            Self::Liabilities => "liabilities",
            Self::Income => "income",
            Self::Expenses => "expenses",
            Self::Other(name) => name,
        }
    }

    /// Assets and liabilities make up net worth
    pub fn is_balance_sheet(&self) -> bool {
        matches!(self, Self::Assets | Self::Liabilities)
    }

    /// Convert a raw ledger amount into the magnitude shown to users.
    ///
    /// hledger reports income and liabilities as negative; those are negated.
    /// Expenses and assets keep their raw sign.
    pub fn presentation_amount(&self, raw: f64) -> f64 {
        match self {
            Self::Income | Self::Liabilities => -raw,
            _ => raw,
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AccountKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A classified account path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountPath {
    pub kind: AccountKind,
    /// Second segment, or the whole path when there is only one segment
    pub category: String,
}

impl AccountPath {
    pub fn is(&self, kind: &AccountKind) -> bool {
        &self.kind == kind
    }
}

/// Classify a colon-delimited account path
pub fn classify(path: &str) -> AccountPath {
    let mut segments = path.split(':');
    let kind = AccountKind::parse(segments.next().unwrap_or_default());
    let category = segments
        .next()
        .map(str::to_string)
        .unwrap_or_else(|| path.to_string());

    AccountPath { kind, category }
}

/// Name used when breaking a category down `depth` levels below itself.
///
/// `account` is the raw path that `path` was classified from. Expense paths
/// drop the `expenses` prefix and keep the category plus `depth` further
/// segments. Other paths keep the type segment as well. A depth past the end
/// of the path clamps to the full path.
pub fn extract_subcategory(path: &AccountPath, account: &str, depth: usize) -> String {
    let segments: Vec<&str> = account.split(':').collect();
    if segments.len() < 2 {
        return account.to_string();
    }

    let start = match path.kind {
        AccountKind::Expenses => 1,
        _ => 0,
    };
    let end = (2 + depth).min(segments.len());

    segments[start..end].join(":")
}

/// Current balance of one ledger account
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    pub name: String,
    pub balance: f64,
    pub currency: String,
    #[serde(skip)]
    pub path: AccountPath,
}

impl AccountBalance {
    pub fn new(name: impl Into<String>, balance: f64, currency: impl Into<String>) -> Self {
        let name = name.into();
        let path = classify(&name);
        Self {
            name,
            balance,
            currency: currency.into(),
            path,
        }
    }

    pub fn kind(&self) -> &AccountKind {
        &self.path.kind
    }
}
