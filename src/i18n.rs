//! Localized message catalog.
//!
//! Only the texts the library itself produces (notifications, insight
//! titles, empty-state labels) live here; front-ends own the rest of their
//! string tables.

use crate::models::Language;

/// Messages for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    /// Refresh succeeded.
    pub data_loaded: &'static str,
    /// Refresh failed; followed by the error.
    pub failed_to_connect: &'static str,
    /// A create call failed; followed by `: ` and the error.
    pub failed_to_save: &'static str,
    /// Manual transaction stored.
    pub transaction_added: &'static str,
    /// Budget limit stored.
    pub budget_set: &'static str,
    /// Settings saved.
    pub settings_saved: &'static str,
    /// Budget above the warning threshold; followed by the category.
    pub low_budget_alert: &'static str,
    /// Budget above the danger threshold; followed by the category.
    pub exceeded_budget: &'static str,
    /// Empty budget list.
    pub no_budgets: &'static str,
    /// Empty transaction list.
    pub no_transactions: &'static str,
    /// Default insight card title.
    pub financial_tip: &'static str,
    /// Chart title.
    pub expense_distribution: &'static str,
}

/// English catalog.
const EN: Messages = Messages {
    data_loaded: "Data loaded from server.",
    failed_to_connect: "Failed to connect to backend server.",
    failed_to_save: "Failed to save transaction to server.",
    transaction_added: "Transaction added successfully!",
    budget_set: "Budget limit set successfully!",
    settings_saved: "Settings saved successfully!",
    low_budget_alert: "Budget Warning: Approaching limit for ",
    exceeded_budget: "Budget Exceeded for ",
    no_budgets: "No budgets set yet.",
    no_transactions: "No transactions yet.",
    financial_tip: "Financial Tip",
    expense_distribution: "Expense Distribution",
};

/// Hindi catalog.
const HI: Messages = Messages {
    data_loaded: "\u{921}\u{947}\u{91f}\u{93e} \u{938}\u{930}\u{94d}\u{935}\u{930} \u{938}\u{947} \u{932}\u{94b}\u{921} \u{939}\u{941}\u{906}\u{964}",
    failed_to_connect: "\u{92c}\u{948}\u{915}\u{90f}\u{902}\u{921} \u{938}\u{930}\u{94d}\u{935}\u{930} \u{938}\u{947} \u{915}\u{928}\u{947}\u{915}\u{94d}\u{91f} \u{915}\u{930}\u{928}\u{947} \u{92e}\u{947}\u{902} \u{935}\u{93f}\u{92b}\u{932}\u{964}",
    failed_to_save: "\u{932}\u{947}\u{928}\u{926}\u{947}\u{928} \u{938}\u{930}\u{94d}\u{935}\u{930} \u{92a}\u{930} \u{938}\u{939}\u{947}\u{91c}\u{928}\u{947} \u{92e}\u{947}\u{902} \u{935}\u{93f}\u{92b}\u{932}\u{964}",
    transaction_added: "\u{932}\u{947}\u{928}\u{926}\u{947}\u{928} \u{938}\u{92b}\u{932}\u{924}\u{93e}\u{92a}\u{942}\u{930}\u{94d}\u{935}\u{915} \u{91c}\u{94b}\u{921}\u{93c}\u{93e} \u{917}\u{92f}\u{93e}!",
    budget_set: "\u{92c}\u{91c}\u{91f} \u{938}\u{940}\u{92e}\u{93e} \u{938}\u{92b}\u{932}\u{924}\u{93e}\u{92a}\u{942}\u{930}\u{94d}\u{935}\u{915} \u{938}\u{947}\u{91f} \u{915}\u{940} \u{917}\u{908}!",
    settings_saved: "\u{938}\u{947}\u{91f}\u{93f}\u{902}\u{917}\u{94d}\u{938} \u{938}\u{92b}\u{932}\u{924}\u{93e}\u{92a}\u{942}\u{930}\u{94d}\u{935}\u{915} \u{938}\u{939}\u{947}\u{91c}\u{940} \u{917}\u{908}\u{902}!",
    low_budget_alert: "\u{92c}\u{91c}\u{91f} \u{91a}\u{947}\u{924}\u{93e}\u{935}\u{928}\u{940}: \u{938}\u{940}\u{92e}\u{93e} \u{915}\u{947} \u{915}\u{930}\u{940}\u{92c} ",
    exceeded_budget: "\u{92c}\u{91c}\u{91f} \u{92a}\u{93e}\u{930} \u{939}\u{94b} \u{917}\u{92f}\u{93e} ",
    no_budgets: "\u{905}\u{92d}\u{940} \u{924}\u{915} \u{915}\u{94b}\u{908} \u{92c}\u{91c}\u{91f} \u{938}\u{947}\u{91f} \u{928}\u{939}\u{940}\u{902} \u{915}\u{93f}\u{92f}\u{93e} \u{917}\u{92f}\u{93e} \u{939}\u{948}\u{964}",
    no_transactions: "\u{905}\u{92d}\u{940} \u{924}\u{915} \u{915}\u{94b}\u{908} \u{932}\u{947}\u{928}\u{926}\u{947}\u{928} \u{928}\u{939}\u{940}\u{902}\u{964}",
    financial_tip: "\u{935}\u{93f}\u{924}\u{94d}\u{924}\u{940}\u{92f} \u{938}\u{941}\u{91d}\u{93e}\u{935}",
    expense_distribution: "\u{935}\u{94d}\u{92f}\u{92f} \u{935}\u{93f}\u{924}\u{930}\u{923}",
};

/// Returns the catalog for `language`.
#[inline]
#[must_use]
pub const fn messages(language: Language) -> &'static Messages {
    match language {
        Language::En => &EN,
        Language::Hi => &HI,
    }
}
