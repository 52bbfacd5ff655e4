//! In-memory cache of the latest server snapshot and display settings.
//!
//! [`ClientState`] is the single source of truth for rendering. Reading it
//! never triggers a fetch, and every mutation replaces a whole section:
//! collections are swapped wholesale, never patched element by element.

use crate::models::{Budgets, DisplaySettings, SettingsPatch, Summary, Transaction};

/// Results of one refresh cycle, committed together.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    /// Headline totals and recommendations.
    pub summary: Summary,
    /// Transactions, newest first.
    pub transactions: Vec<Transaction>,
    /// Budgets by category.
    pub budgets: Budgets,
}

/// Latest known transactions, budgets, summary and settings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClientState {
    /// Summary from the last committed refresh, if any.
    summary: Option<Summary>,
    /// Cached transactions in server order.
    transactions: Vec<Transaction>,
    /// Cached budgets in server order.
    budgets: Budgets,
    /// Current display settings.
    settings: DisplaySettings,
}

impl ClientState {
    /// Creates an empty cache with the given settings.
    #[inline]
    #[must_use]
    pub fn new(settings: DisplaySettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Returns the cached summary, if a refresh has committed.
    #[inline]
    #[must_use]
    pub const fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    /// Returns the cached transactions in server order.
    #[inline]
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Returns the cached budgets.
    #[inline]
    #[must_use]
    pub const fn budgets(&self) -> &Budgets {
        &self.budgets
    }

    /// Returns the current display settings.
    #[inline]
    #[must_use]
    pub const fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    /// Replaces the whole transaction list.
    #[inline]
    pub fn replace_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    /// Replaces the whole budget mapping.
    #[inline]
    pub fn replace_budgets(&mut self, budgets: Budgets) {
        self.budgets = budgets;
    }

    /// Replaces the cached summary.
    #[inline]
    pub fn replace_summary(&mut self, summary: Summary) {
        self.summary = Some(summary);
    }

    /// Applies the recognized fields of `patch` to the settings.
    #[inline]
    pub fn update_settings(&mut self, patch: SettingsPatch) {
        self.settings = self.settings.merged(patch);
    }

    /// Replaces summary, transactions and budgets in one step so readers
    /// never see sections from different refresh cycles.
    #[inline]
    pub fn commit(&mut self, snapshot: Snapshot) {
        let Snapshot {
            summary,
            transactions,
            budgets,
        } = snapshot;
        self.summary = Some(summary);
        self.transactions = transactions;
        self.budgets = budgets;
    }

    /// Drops every cached section and resets settings to `settings`.
    #[inline]
    pub fn reset(&mut self, settings: DisplaySettings) {
        *self = Self::new(settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetEntry, Currency, Language, NaiveDate, TransactionId, TransactionKind};

    fn tx(id: i64) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            kind: TransactionKind::Debit,
            amount: 10.0,
            category: Some("Transport".to_owned()),
            description: Some("Bus".to_owned()),
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            raw_text: "Bus".to_owned(),
        }
    }

    #[test]
    fn new_state_is_empty() {
        let state = ClientState::new(DisplaySettings::default());
        assert!(state.summary().is_none());
        assert!(state.transactions().is_empty());
        assert!(state.budgets().is_empty());
    }

    #[test]
    fn replace_transactions_swaps_whole_list() {
        let mut state = ClientState::default();
        state.replace_transactions(vec![tx(1), tx(2)]);
        state.replace_transactions(vec![tx(3)]);
        let ids: Vec<i64> = state.transactions().iter().map(|t| t.id.into_inner()).collect();
        assert_eq!(ids, [3]);
    }

    #[test]
    fn commit_replaces_all_sections() {
        let mut state = ClientState::default();
        let mut budgets = Budgets::new();
        let _previous = budgets.insert(
            "Transport",
            BudgetEntry {
                limit: 100.0,
                spent: 10.0,
            },
        );
        state.commit(Snapshot {
            summary: Summary {
                total_income: 5.0,
                ..Summary::default()
            },
            transactions: vec![tx(1)],
            budgets,
        });
        assert_eq!(state.transactions().len(), 1);
        assert_eq!(state.budgets().len(), 1);
        assert!(state.summary().is_some());
    }

    #[test]
    fn update_settings_merges_fields() {
        let mut state = ClientState::default();
        state.update_settings(SettingsPatch {
            currency: Some(Currency::Eur),
            ..SettingsPatch::default()
        });
        assert_eq!(state.settings().currency, Currency::Eur);
        assert_eq!(state.settings().language, Language::En);
    }

    #[test]
    fn reset_drops_cache() {
        let mut state = ClientState::default();
        state.replace_transactions(vec![tx(1)]);
        state.reset(DisplaySettings::default());
        assert_eq!(state, ClientState::default());
    }
}
