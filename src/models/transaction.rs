//! Transaction models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{EntryKind, TransactionId, TransactionKind, UNCATEGORIZED};

/// A stored transaction as returned by the backend.
///
/// Transactions are immutable once returned; the client only ever replaces
/// its whole cached collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Backend row id.
    pub id: TransactionId,
    /// Direction (`CREDIT` / `DEBIT`).
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Positive amount.
    pub amount: f64,
    /// Category; `None` until the backend has categorized the row.
    #[serde(default)]
    pub category: Option<String>,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
    /// Calendar date (yyyy-MM-dd).
    pub date: NaiveDate,
    /// Original text the transaction was parsed or entered from.
    #[serde(default)]
    pub raw_text: String,
}

impl Transaction {
    /// Returns `true` for expenses.
    #[inline]
    #[must_use]
    pub const fn is_expense(&self) -> bool {
        self.kind.is_debit()
    }

    /// Returns the category, or `Uncategorized` when the backend has not
    /// assigned one.
    #[inline]
    #[must_use]
    pub fn category_or_default(&self) -> &str {
        self.category
            .as_deref()
            .filter(|category| !category.is_empty())
            .unwrap_or(UNCATEGORIZED)
    }

    /// Returns the text to show in lists: the description, falling back to
    /// the raw text.
    #[inline]
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.description
            .as_deref()
            .filter(|text| !text.is_empty())
            .unwrap_or(&self.raw_text)
    }

    /// Returns the `YYYY-MM` key used to group spending by month.
    #[inline]
    #[must_use]
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

/// Request body for `POST /transactions` (manual entry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// Form direction; the backend maps `expense` to `DEBIT`.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Amount as entered.
    pub amount: f64,
    /// Free-text description.
    pub description: String,
    /// Chosen category (sent as-is, even when empty).
    pub category: String,
    /// Transaction date.
    pub date: NaiveDate,
    /// Raw text; manual entries reuse the description.
    pub raw_text: String,
}

/// Request body for `POST /predict_and_save`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTextRequest {
    /// Pasted SMS or e-mail content.
    pub raw_text: String,
}
