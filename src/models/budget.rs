//! Monthly budget models.

use serde::{Deserialize, Serialize};

use super::OrderedMap;

/// Limit and current-period spending for one category.
///
/// `spent` is derived by the backend from the current month's
/// transactions; the client treats it as read-only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetEntry {
    /// Monthly limit (positive).
    pub limit: f64,
    /// Spent so far this month (non-negative).
    #[serde(default)]
    pub spent: f64,
}

/// Budgets keyed by category name, in backend order.
///
/// A category absent from the map has no budget; it is not an implicit
/// zero limit.
pub type Budgets = OrderedMap<BudgetEntry>;

/// Request body for `POST /budgets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBudget {
    /// Expense category the limit applies to.
    pub category: String,
    /// Monthly limit.
    pub monthly_limit: f64,
}

/// Acknowledgement returned by `POST /budgets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetAck {
    /// `"success"` when the limit was stored.
    pub status: String,
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
}

impl BudgetAck {
    /// Returns `true` when the backend reports the budget as stored.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}
