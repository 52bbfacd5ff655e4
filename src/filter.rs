//! Client-side transaction filtering over the cached list.

use crate::models::{NaiveDate, Transaction, TransactionKind};

/// Filter criteria for cached transactions.
///
/// All criteria are combined with AND logic. An empty filter matches every
/// transaction, and filtering never reorders the list.
///
/// # Examples
///
/// ```
/// use finsmart_rs::filter::TransactionFilter;
/// use finsmart_rs::models::{NaiveDate, TransactionKind};
///
/// let filter = TransactionFilter::new()
///     .kind(TransactionKind::Debit)
///     .date_range(
///         NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
///     )
///     .category("Transport");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Credit or debit only.
    pub kind: Option<TransactionKind>,
    /// Start date (inclusive).
    pub date_from: Option<NaiveDate>,
    /// End date (inclusive).
    pub date_to: Option<NaiveDate>,
    /// Exact category name (case-insensitive).
    pub category: Option<String>,
}

impl TransactionFilter {
    /// Creates an empty filter that matches all transactions.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one transaction kind.
    #[inline]
    #[must_use]
    pub const fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Restricts to transactions within the given date range (inclusive).
    #[inline]
    #[must_use]
    pub const fn date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    /// Restricts to transactions on or after `from`.
    #[inline]
    #[must_use]
    pub const fn date_from(mut self, from: NaiveDate) -> Self {
        self.date_from = Some(from);
        self
    }

    /// Restricts to transactions on or before `to`.
    #[inline]
    #[must_use]
    pub const fn date_to(mut self, to: NaiveDate) -> Self {
        self.date_to = Some(to);
        self
    }

    /// Restricts to one category. Uncategorized transactions match
    /// [`crate::models::UNCATEGORIZED`].
    #[inline]
    #[must_use]
    pub fn category<T: Into<String>>(mut self, name: T) -> Self {
        self.category = Some(name.into());
        self
    }

    /// Returns `true` if the transaction matches all criteria.
    #[inline]
    #[must_use]
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.matches_kind(tx) && self.matches_date(tx) && self.matches_category(tx)
    }

    /// Returns the matching transactions in their original order.
    #[inline]
    #[must_use]
    pub fn apply<'tx>(&self, transactions: &'tx [Transaction]) -> Vec<&'tx Transaction> {
        transactions.iter().filter(|tx| self.matches(tx)).collect()
    }

    /// Checks kind criteria.
    fn matches_kind(&self, tx: &Transaction) -> bool {
        self.kind.is_none_or(|kind| tx.kind == kind)
    }

    /// Checks date range criteria.
    fn matches_date(&self, tx: &Transaction) -> bool {
        self.date_from.is_none_or(|from| tx.date >= from)
            && self.date_to.is_none_or(|to| tx.date <= to)
    }

    /// Checks category criteria.
    fn matches_category(&self, tx: &Transaction) -> bool {
        self.category
            .as_ref()
            .is_none_or(|name| tx.category_or_default().eq_ignore_ascii_case(name))
    }
}
