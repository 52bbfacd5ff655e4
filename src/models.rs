//! Data models for FinSmart API payloads and local settings.
//!
//! This module contains strongly-typed representations of the JSON the
//! backend exchanges with the dashboard, the newtype transaction
//! identifier, and enumeration types for constrained values.

mod budget;
mod enums;
mod ids;
mod ordered;
mod settings;
mod summary;
mod transaction;

pub use budget::{BudgetAck, BudgetEntry, Budgets, NewBudget};
pub use chrono::NaiveDate;
pub use enums::{Currency, EntryKind, Language, ParseEnumError, TransactionKind};
pub use ids::TransactionId;
pub use ordered::OrderedMap;
pub use settings::{DisplaySettings, SettingsPatch};
pub use summary::{Breakdown, Summary};
pub use transaction::{NewTransaction, RawTextRequest, Transaction};

/// Expense categories offered by the entry form, in display order.
pub const EXPENSE_CATEGORIES: [&str; 8] = [
    "Rent/Housing",
    "Food/Groceries",
    "Transport",
    "Entertainment",
    "Bills/Utilities",
    "Shopping",
    "Other",
    "Uncategorized",
];

/// Income categories offered by the entry form, in display order.
pub const INCOME_CATEGORIES: [&str; 3] = ["Income", "Salary", "Investment"];

/// Category shown for transactions the backend has not categorized yet.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Returns the categories a budget can be set for: every expense category
/// except [`UNCATEGORIZED`].
#[inline]
pub fn budget_categories() -> impl Iterator<Item = &'static str> {
    EXPENSE_CATEGORIES
        .into_iter()
        .filter(|category| *category != UNCATEGORIZED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_categories_exclude_uncategorized() {
        let categories: Vec<&str> = budget_categories().collect();
        assert_eq!(categories.len(), EXPENSE_CATEGORIES.len() - 1);
        assert!(!categories.contains(&UNCATEGORIZED));
        assert_eq!(categories.first(), Some(&"Rent/Housing"));
    }
}
