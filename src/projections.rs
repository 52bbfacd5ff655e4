//! View-ready projections of cached state.
//!
//! Every function here is pure: it reads [`crate::state::ClientState`]
//! sections or fetched payloads and returns a fresh value. Projections are
//! never stored as a source of truth and can be recomputed at any time.

use std::collections::HashMap;

use crate::i18n::Messages;
use crate::models::{Breakdown, Budgets, Currency, Summary, Transaction};

/// Number of transactions shown in the dashboard's recent list.
pub const RECENT_LIMIT: usize = 5;

/// Budget usage above this percentage is classified as danger.
const DANGER_THRESHOLD: f64 = 95.0;

/// Budget usage above this percentage is classified as warning.
const WARNING_THRESHOLD: f64 = 80.0;

/// Returns the first `n` transactions in their existing order.
#[inline]
#[must_use]
pub fn recent_list(transactions: &[Transaction], n: usize) -> &[Transaction] {
    transactions.get(..n).unwrap_or(transactions)
}

/// Chart series: labels and amounts aligned by index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryTotals {
    /// Category names in backend order.
    pub labels: Vec<String>,
    /// Spent amount per label.
    pub amounts: Vec<f64>,
}

impl CategoryTotals {
    /// Returns `true` when there is nothing to chart.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Splits a breakdown into index-aligned label and amount series.
#[inline]
#[must_use]
pub fn category_totals(breakdown: &Breakdown) -> CategoryTotals {
    let (labels, amounts) = breakdown
        .iter()
        .map(|(label, amount)| (label.to_owned(), *amount))
        .unzip();
    CategoryTotals { labels, amounts }
}

/// Aggregates shown on the profile page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProfileStats {
    /// Number of cached transactions of either kind.
    pub total_count: usize,
    /// Largest single expense, or 0 without expenses.
    pub highest_expense: f64,
    /// Total expense divided by the number of distinct expense months.
    pub average_monthly_spend: f64,
}

/// Computes profile aggregates over the cached transactions.
///
/// Expenses are grouped by their `YYYY-MM` month; the average divides the
/// total by the number of distinct months, or by 1 when there are none.
#[must_use]
pub fn profile_aggregates(transactions: &[Transaction]) -> ProfileStats {
    let expenses = || transactions.iter().filter(|tx| tx.is_expense());

    let highest_expense = expenses().fold(0.0_f64, |max, tx| max.max(tx.amount));

    let mut by_month: HashMap<String, f64> = HashMap::new();
    for tx in expenses() {
        *by_month.entry(tx.month_key()).or_insert(0.0) += tx.amount;
    }
    let total: f64 = by_month.values().sum();
    #[allow(
        clippy::cast_precision_loss,
        reason = "month counts are far below 2^52"
    )]
    let months = by_month.len().max(1) as f64;

    ProfileStats {
        total_count: transactions.len(),
        highest_expense,
        average_monthly_spend: total / months,
    }
}

/// Savings rate in percent, computed client-side from the totals.
///
/// Returns 0 when there is no income, whatever the expense.
#[inline]
#[must_use]
pub fn savings_rate(summary: &Summary) -> f64 {
    if summary.total_income > 0.0 {
        (summary.total_income - summary.total_expense) / summary.total_income * 100.0
    } else {
        0.0
    }
}

/// Values for the four dashboard stat cards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatCards {
    /// Net balance as reported by the backend.
    pub net_balance: f64,
    /// Total income.
    pub total_income: f64,
    /// Total expense.
    pub total_expense: f64,
    /// Savings rate in percent (see [`savings_rate`]).
    pub savings_rate: f64,
}

/// Builds the stat cards from a summary payload.
#[inline]
#[must_use]
pub fn stat_cards(summary: &Summary) -> StatCards {
    StatCards {
        net_balance: summary.net_savings,
        total_income: summary.total_income,
        total_expense: summary.total_expense,
        savings_rate: savings_rate(summary),
    }
}

/// Budget usage class, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BudgetStatus {
    /// At most 80% used.
    Success,
    /// Above 80% used.
    Warning,
    /// Above 95% used.
    Danger,
}

impl BudgetStatus {
    /// Classifies a usage percentage.
    #[inline]
    #[must_use]
    pub fn classify(percentage: f64) -> Self {
        if percentage > DANGER_THRESHOLD {
            Self::Danger
        } else if percentage > WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Success
        }
    }

    /// Returns `true` for statuses that raise an alert.
    #[inline]
    #[must_use]
    pub const fn is_alert(self) -> bool {
        !matches!(self, Self::Success)
    }
}

/// One row of the budget list.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetProgress {
    /// Category name.
    pub category: String,
    /// Monthly limit.
    pub limit: f64,
    /// Spent this month.
    pub spent: f64,
    /// Usage in percent, clamped to 100.
    pub percentage: f64,
    /// Usage class.
    pub status: BudgetStatus,
}

/// Usage percentage of `spent` against `limit`, clamped to `[0, 100]`.
///
/// A non-positive limit counts as fully used once anything is spent.
#[inline]
#[must_use]
pub fn budget_percentage(spent: f64, limit: f64) -> f64 {
    if limit > 0.0 {
        (spent / limit * 100.0).clamp(0.0, 100.0)
    } else if spent > 0.0 {
        100.0
    } else {
        0.0
    }
}

/// Computes progress rows for every budget, in backend order.
#[must_use]
pub fn budget_progress(budgets: &Budgets) -> Vec<BudgetProgress> {
    budgets
        .iter()
        .map(|(category, entry)| {
            let percentage = budget_percentage(entry.spent, entry.limit);
            BudgetProgress {
                category: category.to_owned(),
                limit: entry.limit,
                spent: entry.spent,
                percentage,
                status: BudgetStatus::classify(percentage),
            }
        })
        .collect()
}

/// Tone of an insight card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsightKind {
    /// Neutral tip.
    Info,
    /// Spending alert.
    Warning,
    /// Positive feedback.
    Success,
}

/// One insight card derived from a backend recommendation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    /// Card tone.
    pub kind: InsightKind,
    /// Card title.
    pub title: String,
    /// Recommendation text as sent by the backend.
    pub message: String,
}

/// Turns recommendations into insight cards, preserving their order.
#[must_use]
pub fn insights(summary: &Summary, messages: &Messages) -> Vec<Insight> {
    summary
        .recommendations
        .iter()
        .map(|message| {
            let (kind, title) = if message.contains("High Food Spending") {
                (InsightKind::Warning, "High Spending Alert")
            } else if message.contains("Excellent") {
                (InsightKind::Success, "Great Performance")
            } else {
                (InsightKind::Info, messages.financial_tip)
            };
            Insight {
                kind,
                title: title.to_owned(),
                message: message.clone(),
            }
        })
        .collect()
}

/// Formats an amount with the currency symbol, thousands separators and
/// two decimals, e.g. `₹1,234.50`.
#[must_use]
pub fn format_money(amount: f64, currency: Currency) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((&fixed, "00"));

    let mut reversed = String::with_capacity(whole.len() * 2);
    for (idx, digit) in whole.chars().rev().enumerate() {
        if idx > 0 && idx % 3 == 0 {
            reversed.push(',');
        }
        reversed.push(digit);
    }
    let grouped: String = reversed.chars().rev().collect();

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{}{grouped}.{cents}", currency.symbol())
}
