//! Dashboard orchestration: refresh, render and the create flows.
//!
//! A dashboard owns the [`ClientState`] cache, a gateway to the backend and
//! a settings store. It provides both async ([`Dashboard`]) and blocking
//! ([`BlockingDashboard`]) variants, generated from one macro like the HTTP
//! clients in [`crate::client`].
//!
//! # Refresh
//!
//! [`Dashboard::refresh_all`] fetches summary, transactions and budgets
//! concurrently. Either all three succeed and are committed in one step,
//! or the cache is left untouched and a single error notification is shown.
//! Each refresh takes a sequence number; a refresh whose batch resolves
//! after a newer one has committed is discarded as superseded.
//!
//! After a commit the views render in a fixed order: stat cards, recent
//! list, full list, chart, insights, budgets, profile. The chart has its
//! own request, and its failure only degrades the chart.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::FinSmartError;
use crate::i18n::messages;
use crate::models::{Breakdown, Currency, DisplaySettings, Language, Transaction};
use crate::notify::NotificationChannel;
use crate::projections::{
    self, BudgetProgress, BudgetStatus, CategoryTotals, Insight, ProfileStats, RECENT_LIMIT,
    StatCards,
};
use crate::state::ClientState;
use crate::storage::SettingsStore;

/// Shown when the raw-text form is submitted empty.
const EMPTY_RAW_TEXT: &str = "Please paste transaction text to parse.";

/// Shown after the local settings record is erased.
const CACHE_CLEARED: &str = "Local cache cleared. Settings reset to default.";

/// Shown when exporting an empty cache.
const NOTHING_TO_EXPORT: &str = "No data to export.";

/// Shown after a successful export.
const EXPORT_DONE: &str = "Data exported successfully!";

/// When budget threshold alerts fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertPolicy {
    /// Alert only when a category moves up into warning or danger since
    /// the last render.
    #[default]
    OnUpwardCrossing,
    /// Alert for every category above a threshold on every budget render.
    EveryRender,
}

/// Navigable sections of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Stat cards, recent list, chart and insights.
    Dashboard,
    /// Full transaction list.
    Transactions,
    /// Detailed insights.
    Insights,
    /// Budget list.
    Budgets,
    /// Profile aggregates.
    Profile,
    /// Settings form.
    Settings,
}

/// Chart region state.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    /// Totals ready to draw.
    Ready(CategoryTotals),
    /// The backend reported no expenses.
    Empty,
    /// The breakdown request failed.
    Unavailable,
}

impl ChartView {
    /// Builds the chart state from a fetched breakdown.
    #[inline]
    #[must_use]
    pub fn from_breakdown(breakdown: &Breakdown) -> Self {
        let totals = projections::category_totals(breakdown);
        if totals.is_empty() {
            Self::Empty
        } else {
            Self::Ready(totals)
        }
    }
}

/// Everything one committed refresh renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Refresh cycle that produced the view.
    pub sequence: u64,
    /// Display currency.
    pub currency: Currency,
    /// Display language.
    pub language: Language,
    /// Stat cards.
    pub stats: StatCards,
    /// First [`RECENT_LIMIT`] transactions.
    pub recent: Vec<Transaction>,
    /// Full transaction list in server order.
    pub transactions: Vec<Transaction>,
    /// Expense chart.
    pub chart: ChartView,
    /// Insight cards.
    pub insights: Vec<Insight>,
    /// Budget rows.
    pub budgets: Vec<BudgetProgress>,
    /// Profile aggregates.
    pub profile: ProfileStats,
}

/// Result of [`Dashboard::refresh_all`].
#[derive(Debug)]
pub enum RefreshOutcome {
    /// The batch was committed and rendered.
    Rendered(Box<DashboardView>),
    /// A fetch failed; the cache is unchanged.
    Failed(FinSmartError),
    /// A newer refresh committed first; this one was discarded.
    Superseded {
        /// Sequence number of the discarded refresh.
        sequence: u64,
    },
}

impl RefreshOutcome {
    /// Returns the rendered view, if the refresh committed.
    #[inline]
    #[must_use]
    #[allow(clippy::ref_patterns, reason = "borrowing the boxed view out of &self")]
    pub fn view(&self) -> Option<&DashboardView> {
        match *self {
            Self::Rendered(ref view) => Some(view),
            Self::Failed(_) | Self::Superseded { .. } => None,
        }
    }

    /// Returns `true` if the refresh committed.
    #[inline]
    #[must_use]
    pub const fn is_rendered(&self) -> bool {
        matches!(*self, Self::Rendered(_))
    }
}

/// Result of [`Dashboard::navigate`].
#[derive(Debug)]
pub enum Navigation {
    /// The dashboard was refreshed.
    Dashboard(RefreshOutcome),
    /// Full transaction list from the cache.
    Transactions(Vec<Transaction>),
    /// Budget rows from the cache.
    Budgets(Vec<BudgetProgress>),
    /// Profile aggregates from the cache.
    Profile(ProfileStats),
    /// A section with nothing to recompute.
    Static(View),
}

/// Mutable dashboard state behind one lock.
#[derive(Debug, Default)]
struct Inner {
    /// Cached server data and settings.
    state: ClientState,
    /// Sequence number of the last committed refresh.
    committed_seq: u64,
    /// Last rendered status per budget category.
    alert_levels: HashMap<String, BudgetStatus>,
}

/// Locks the dashboard state. Every update replaces whole sections, so a
/// poisoned lock still holds a consistent value.
fn lock_inner(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Returns the categories whose rows should raise an alert now, updating
/// the last-seen levels.
fn budget_alerts<'row>(
    rows: &'row [BudgetProgress],
    levels: &mut HashMap<String, BudgetStatus>,
    policy: AlertPolicy,
) -> Vec<&'row BudgetProgress> {
    let mut alerts = Vec::new();
    for row in rows {
        let previous = levels
            .insert(row.category.clone(), row.status)
            .unwrap_or(BudgetStatus::Success);
        let fire = match policy {
            AlertPolicy::EveryRender => row.status.is_alert(),
            AlertPolicy::OnUpwardCrossing => row.status.is_alert() && row.status > previous,
        };
        if fire {
            alerts.push(row);
        }
    }
    levels.retain(|category, _| rows.iter().any(|row| row.category == *category));
    alerts
}

/// Computes budget rows and raises threshold notifications when enabled.
fn render_budgets(
    inner: &mut Inner,
    policy: AlertPolicy,
    channel: &NotificationChannel,
) -> Vec<BudgetProgress> {
    let rows = projections::budget_progress(inner.state.budgets());
    let alerts = budget_alerts(&rows, &mut inner.alert_levels, policy);
    let settings = inner.state.settings();
    if settings.notifications {
        let msgs = messages(settings.language);
        for row in alerts {
            if row.status == BudgetStatus::Danger {
                channel.notify(format!("{}{}.", msgs.exceeded_budget, row.category), true);
            } else {
                channel.notify(format!("{}{}.", msgs.low_budget_alert, row.category), false);
            }
        }
    }
    rows
}

/// Renders every view from the committed cache in the fixed order.
fn render_view(
    inner: &mut Inner,
    sequence: u64,
    chart: ChartView,
    policy: AlertPolicy,
    channel: &NotificationChannel,
) -> DashboardView {
    let settings = inner.state.settings().clone();
    let msgs = messages(settings.language);
    let summary = inner.state.summary().cloned().unwrap_or_default();

    let stats = projections::stat_cards(&summary);
    let recent = projections::recent_list(inner.state.transactions(), RECENT_LIMIT).to_vec();
    let transactions = inner.state.transactions().to_vec();
    let insights = projections::insights(&summary, msgs);
    let budgets = render_budgets(inner, policy, channel);
    let profile = projections::profile_aggregates(inner.state.transactions());

    DashboardView {
        sequence,
        currency: settings.currency,
        language: settings.language,
        stats,
        recent,
        transactions,
        chart,
        insights,
        budgets,
        profile,
    }
}

/// Returns the local calendar date used to re-date reset forms.
fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Generates a dashboard (async or blocking) with builder and flows.
macro_rules! define_dashboard {
    (
        dashboard_name: $dashboard:ident,
        builder_name: $builder:ident,
        gateway_trait: $gateway_trait:ident,
        dashboard_doc: $dashboard_doc:expr,
        builder_doc: $builder_doc:expr,
        $(async_kw: $async_kw:tt,)?
        $(await_kw: $await_ext:tt,)?
    ) => {
        #[doc = $builder_doc]
        #[derive(Debug)]
        pub struct $builder<G: $gateway_trait, S: SettingsStore> {
            /// Backend gateway.
            gateway: Option<G>,
            /// Settings store.
            settings_store: Option<S>,
            /// Budget alert policy.
            alert_policy: AlertPolicy,
        }

        impl<G: $gateway_trait, S: SettingsStore> $builder<G, S> {
            /// Sets the backend gateway.
            #[inline]
            #[must_use]
            pub fn gateway(mut self, gateway: G) -> Self {
                self.gateway = Some(gateway);
                self
            }

            /// Sets the settings store.
            #[inline]
            #[must_use]
            pub fn settings_store(mut self, store: S) -> Self {
                self.settings_store = Some(store);
                self
            }

            /// Sets when budget threshold alerts fire.
            #[inline]
            #[must_use]
            pub const fn alert_policy(mut self, policy: AlertPolicy) -> Self {
                self.alert_policy = policy;
                self
            }

            /// Builds the dashboard, loading stored settings.
            ///
            /// Unreadable settings fall back to the defaults.
            ///
            /// # Errors
            ///
            /// Returns [`FinSmartError::MissingComponent`] if the gateway or
            /// the settings store was not provided.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub fn build(self) -> Result<$dashboard<G, S>> {
                let gateway = self
                    .gateway
                    .ok_or(FinSmartError::MissingComponent("gateway"))?;
                let store = self
                    .settings_store
                    .ok_or(FinSmartError::MissingComponent("settings store"))?;
                let settings = load_settings_or_default(&store);
                tracing::debug!(?settings, "dashboard settings loaded");

                Ok($dashboard {
                    gateway,
                    store,
                    alert_policy: self.alert_policy,
                    inner: Mutex::new(Inner {
                        state: ClientState::new(settings),
                        ..Inner::default()
                    }),
                    next_seq: AtomicU64::new(0),
                    notifications: NotificationChannel::new(),
                    transaction_guard: SubmitGuard::new(),
                    raw_text_guard: SubmitGuard::new(),
                    budget_guard: SubmitGuard::new(),
                })
            }
        }

        #[doc = $dashboard_doc]
        #[derive(Debug)]
        pub struct $dashboard<G: $gateway_trait, S: SettingsStore> {
            /// Backend gateway.
            gateway: G,
            /// Settings store.
            store: S,
            /// Budget alert policy.
            alert_policy: AlertPolicy,
            /// Cache, committed sequence and alert levels.
            inner: Mutex<Inner>,
            /// Last issued refresh sequence number.
            next_seq: AtomicU64,
            /// User-facing messages.
            notifications: NotificationChannel,
            /// Manual entry form state.
            transaction_guard: SubmitGuard,
            /// Raw-text form state.
            raw_text_guard: SubmitGuard,
            /// Budget form state.
            budget_guard: SubmitGuard,
        }

        impl<G: $gateway_trait, S: SettingsStore> $dashboard<G, S> {
            /// Creates a new builder for configuring the dashboard.
            #[inline]
            #[must_use]
            pub const fn builder() -> $builder<G, S> {
                $builder {
                    gateway: None,
                    settings_store: None,
                    alert_policy: AlertPolicy::OnUpwardCrossing,
                }
            }

            /// Returns the backend gateway.
            #[inline]
            #[must_use]
            pub const fn gateway(&self) -> &G {
                &self.gateway
            }

            /// Returns the notification channel.
            #[inline]
            #[must_use]
            pub const fn notifications(&self) -> &NotificationChannel {
                &self.notifications
            }

            /// Returns a copy of the cached state.
            #[inline]
            #[must_use]
            pub fn state(&self) -> ClientState {
                lock_inner(&self.inner).state.clone()
            }

            /// Returns the current display settings.
            #[inline]
            #[must_use]
            pub fn settings(&self) -> DisplaySettings {
                lock_inner(&self.inner).state.settings().clone()
            }

            /// Reads settings for the settings form: the stored record if
            /// there is one, otherwise the settings in use.
            #[inline]
            #[must_use]
            pub fn settings_form(&self) -> DisplaySettings {
                match self.store.load() {
                    Ok(Some(settings)) => settings,
                    Ok(None) => self.settings(),
                    Err(err) => {
                        tracing::warn!(error = %err, "failed to read stored settings");
                        self.settings()
                    }
                }
            }

            /// Returns the cached transactions matching `filter`.
            #[inline]
            #[must_use]
            pub fn filter_transactions(&self, filter: &TransactionFilter) -> Vec<Transaction> {
                let inner = lock_inner(&self.inner);
                filter
                    .apply(inner.state.transactions())
                    .into_iter()
                    .cloned()
                    .collect()
            }

            /// Renders the budget list from the cache, raising threshold
            /// alerts according to the alert policy.
            #[inline]
            #[must_use]
            pub fn budget_view(&self) -> Vec<BudgetProgress> {
                let mut inner = lock_inner(&self.inner);
                render_budgets(&mut inner, self.alert_policy, &self.notifications)
            }

            /// Returns profile aggregates over the cached transactions.
            #[inline]
            #[must_use]
            pub fn profile(&self) -> ProfileStats {
                projections::profile_aggregates(lock_inner(&self.inner).state.transactions())
            }

            /// Copies the cached transaction list.
            fn cached_transactions(&self) -> Vec<Transaction> {
                lock_inner(&self.inner).state.transactions().to_vec()
            }

            /// Messages in the current language.
            fn messages(&self) -> &'static Messages {
                messages(lock_inner(&self.inner).state.settings().language)
            }

            /// Fetches summary, transactions and budgets concurrently and,
            /// if all succeed, commits them and renders every view.
            ///
            /// Failures are reported through the notification channel and
            /// returned as [`RefreshOutcome::Failed`]; the cache is left
            /// exactly as it was.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn refresh_all(&self) -> RefreshOutcome {
                let sequence = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
                tracing::debug!(sequence, "refresh started");

                let snapshot = match fetch_batch(&self.gateway) $( .$await_ext )? {
                    Ok(snapshot) => snapshot,
                    Err(err) => {
                        tracing::warn!(sequence, error = %err, "refresh failed");
                        self.notifications.notify(
                            format!("{} {err}", self.messages().failed_to_connect),
                            true,
                        );
                        return RefreshOutcome::Failed(err);
                    }
                };

                {
                    let mut inner = lock_inner(&self.inner);
                    if sequence <= inner.committed_seq {
                        tracing::debug!(sequence, committed = inner.committed_seq, "refresh superseded");
                        return RefreshOutcome::Superseded { sequence };
                    }
                    inner.state.commit(snapshot);
                    inner.committed_seq = sequence;
                }

                let chart = match self.gateway.fetch_breakdown() $( .$await_ext )? {
                    Ok(breakdown) => ChartView::from_breakdown(&breakdown),
                    Err(err) => {
                        tracing::warn!(error = %err, "chart data unavailable");
                        ChartView::Unavailable
                    }
                };

                let view = {
                    let mut inner = lock_inner(&self.inner);
                    if inner.committed_seq != sequence {
                        return RefreshOutcome::Superseded { sequence };
                    }
                    render_view(&mut inner, sequence, chart, self.alert_policy, &self.notifications)
                };
                self.notifications.notify(self.messages().data_loaded, false);
                tracing::info!(
                    sequence,
                    transactions = view.transactions.len(),
                    budgets = view.budgets.len(),
                    "dashboard refreshed"
                );
                RefreshOutcome::Rendered(Box::new(view))
            }

            /// Switches to `view`, recomputing what that section shows.
            /// Navigating to [`View::Dashboard`] triggers a full refresh.
            #[inline]
            pub $($async_kw)? fn navigate(&self, view: View) -> Navigation {
                tracing::debug!(?view, "navigate");
                match view {
                    View::Dashboard => Navigation::Dashboard(self.refresh_all() $( .$await_ext )?),
                    View::Transactions => Navigation::Transactions(self.cached_transactions()),
                    View::Budgets => Navigation::Budgets(self.budget_view()),
                    View::Profile => Navigation::Profile(self.profile()),
                    View::Insights | View::Settings => Navigation::Static(view),
                }
            }

            /// Submits the manual entry form.
            ///
            /// On success the dashboard is refreshed and the form is reset.
            /// On failure the form keeps its input.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn submit_transaction(
                &self,
                form: &mut TransactionForm,
            ) -> SubmitOutcome<Transaction> {
                let Some(_ticket) = self.transaction_guard.try_begin() else {
                    tracing::debug!("transaction submit already in flight");
                    return SubmitOutcome::InFlight;
                };
                let Some(request) = form.to_request() else {
                    tracing::debug!(amount = %form.amount, "amount is not a number, skipping");
                    return SubmitOutcome::Skipped;
                };
                match self.gateway.create_transaction(&request) $( .$await_ext )? {
                    Ok(created) => {
                        let _refresh = self.refresh_all() $( .$await_ext )?;
                        form.reset(today());
                        self.notifications.notify(self.messages().transaction_added, false);
                        SubmitOutcome::Accepted(created)
                    }
                    Err(err) => {
                        self.notifications.notify(
                            format!("{}: {err}", self.messages().failed_to_save),
                            true,
                        );
                        SubmitOutcome::Failed(err)
                    }
                }
            }

            /// Submits the raw-text form for server-side parsing.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn submit_raw_text(
                &self,
                form: &mut RawTextForm,
            ) -> SubmitOutcome<Transaction> {
                let Some(_ticket) = self.raw_text_guard.try_begin() else {
                    tracing::debug!("raw-text submit already in flight");
                    return SubmitOutcome::InFlight;
                };
                let Some(text) = form.trimmed().map(str::to_owned) else {
                    self.notifications.notify(EMPTY_RAW_TEXT, true);
                    return SubmitOutcome::Skipped;
                };
                match self.gateway.create_from_raw_text(&text) $( .$await_ext )? {
                    Ok(created) => {
                        let _refresh = self.refresh_all() $( .$await_ext )?;
                        form.reset();
                        self.notifications.notify(
                            format!(
                                "AI added transaction: {} on {}",
                                created.category_or_default(),
                                created.date
                            ),
                            false,
                        );
                        SubmitOutcome::Accepted(created)
                    }
                    Err(err) => {
                        self.notifications.notify(format!("AI Failed: {err}"), true);
                        SubmitOutcome::Failed(err)
                    }
                }
            }

            /// Submits the budget form.
            ///
            /// Only a `"success"` acknowledgement refreshes the dashboard and
            /// resets the form; any other status is returned as
            /// [`SubmitOutcome::Declined`] without a notification.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn submit_budget(&self, form: &mut BudgetForm) -> SubmitOutcome<BudgetAck> {
                let Some(_ticket) = self.budget_guard.try_begin() else {
                    tracing::debug!("budget submit already in flight");
                    return SubmitOutcome::InFlight;
                };
                let Some((category, limit)) = form
                    .to_request()
                    .map(|(category, limit)| (category.to_owned(), limit))
                else {
                    return SubmitOutcome::Skipped;
                };
                match self.gateway.create_budget(&category, limit) $( .$await_ext )? {
                    Ok(ack) if ack.is_success() => {
                        let _refresh = self.refresh_all() $( .$await_ext )?;
                        self.notifications.notify(self.messages().budget_set, false);
                        form.reset();
                        SubmitOutcome::Accepted(ack)
                    }
                    Ok(ack) => {
                        tracing::warn!(status = %ack.status, "budget not confirmed");
                        SubmitOutcome::Declined
                    }
                    Err(err) => {
                        self.notifications.notify(
                            format!("{}: {err}", self.messages().failed_to_save),
                            true,
                        );
                        SubmitOutcome::Failed(err)
                    }
                }
            }

            /// Applies `patch` to the settings, persists the result and
            /// refreshes the dashboard.
            ///
            /// # Errors
            ///
            /// Returns an error if the settings store cannot be written; the
            /// settings in use are left unchanged in that case.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn save_settings(&self, patch: SettingsPatch) -> Result<RefreshOutcome> {
                let updated = self.settings().merged(patch);
                self.store.save(&updated)?;
                lock_inner(&self.inner).state.update_settings(SettingsPatch::from(updated));
                let outcome = self.refresh_all() $( .$await_ext )?;
                self.notifications.notify(self.messages().settings_saved, false);
                Ok(outcome)
            }

            /// Erases the stored settings, drops every cached section and
            /// reloads from the backend with default settings.
            ///
            /// # Errors
            ///
            /// Returns an error if the settings store cannot be cleared.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn clear_cache(&self) -> Result<RefreshOutcome> {
                self.store.clear()?;
                {
                    let mut inner = lock_inner(&self.inner);
                    inner.state.reset(DisplaySettings::default());
                    inner.alert_levels.clear();
                }
                self.notifications.notify(CACHE_CLEARED, true);
                Ok(self.refresh_all() $( .$await_ext )?)
            }

            /// Renders the cached transactions as CSV.
            ///
            /// Returns `Ok(None)` and notifies when there is nothing to export.
            ///
            /// # Errors
            ///
            /// Returns an error if CSV encoding fails.
            #[inline]
            pub fn export_csv(&self) -> Result<Option<String>> {
                let transactions = self.cached_transactions();
                if transactions.is_empty() {
                    self.notifications.notify(NOTHING_TO_EXPORT, true);
                    return Ok(None);
                }
                let csv = transactions_to_csv(&transactions)?;
                self.notifications.notify(EXPORT_DONE, false);
                Ok(Some(csv))
            }
        }
    };
}

/// Loads stored settings, falling back to the defaults when none are
/// stored or the record is unreadable.
fn load_settings_or_default<S: SettingsStore>(store: &S) -> DisplaySettings {
    match store.load() {
        Ok(Some(settings)) => settings,
        Ok(None) => DisplaySettings::default(),
        Err(err) => {
            tracing::warn!(error = %err, "stored settings unreadable, using defaults");
            DisplaySettings::default()
        }
    }
}

#[cfg(feature = "async")]
mod async_dashboard {
    //! Async dashboard.

    use core::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    use super::{
        AlertPolicy, ChartView, EXPORT_DONE, CACHE_CLEARED, EMPTY_RAW_TEXT, Inner, NOTHING_TO_EXPORT,
        Navigation, RefreshOutcome, View, load_settings_or_default, lock_inner, render_budgets,
        render_view, today,
    };
    use crate::error::{FinSmartError, Result};
    use crate::export::transactions_to_csv;
    use crate::filter::TransactionFilter;
    use crate::forms::{BudgetForm, RawTextForm, SubmitGuard, SubmitOutcome, TransactionForm};
    use crate::gateway::Gateway;
    use crate::i18n::{Messages, messages};
    use crate::models::{BudgetAck, DisplaySettings, SettingsPatch, Transaction};
    use crate::notify::NotificationChannel;
    use crate::projections::{self, BudgetProgress, ProfileStats};
    use crate::state::{ClientState, Snapshot};
    use crate::storage::SettingsStore;

    /// Fetches the three refresh payloads concurrently. All three requests
    /// run to completion before any failure is reported.
    async fn fetch_batch<G: Gateway>(gateway: &G) -> Result<Snapshot> {
        let (summary, transactions, budgets) = tokio::join!(
            gateway.fetch_summary(),
            gateway.fetch_transactions(),
            gateway.fetch_budgets(),
        );
        Ok(Snapshot {
            summary: summary?,
            transactions: transactions?,
            budgets: budgets?,
        })
    }

    define_dashboard! {
        dashboard_name: Dashboard,
        builder_name: DashboardBuilder,
        gateway_trait: Gateway,
        dashboard_doc: "Async dashboard over a [`Gateway`] and a [`SettingsStore`].\n\nUse [`Dashboard::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`Dashboard`].",
        async_kw: async,
        await_kw: await,
    }
}

#[cfg(feature = "blocking")]
mod blocking_dashboard {
    //! Blocking dashboard.

    use core::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;
    use std::thread::{self, ScopedJoinHandle};

    use super::{
        AlertPolicy, ChartView, EXPORT_DONE, CACHE_CLEARED, EMPTY_RAW_TEXT, Inner, NOTHING_TO_EXPORT,
        Navigation, RefreshOutcome, View, load_settings_or_default, lock_inner, render_budgets,
        render_view, today,
    };
    use crate::error::{FinSmartError, Result};
    use crate::export::transactions_to_csv;
    use crate::filter::TransactionFilter;
    use crate::forms::{BudgetForm, RawTextForm, SubmitGuard, SubmitOutcome, TransactionForm};
    use crate::gateway::BlockingGateway;
    use crate::i18n::{Messages, messages};
    use crate::models::{BudgetAck, DisplaySettings, SettingsPatch, Transaction};
    use crate::notify::NotificationChannel;
    use crate::projections::{self, BudgetProgress, ProfileStats};
    use crate::state::{ClientState, Snapshot};
    use crate::storage::SettingsStore;

    /// Waits for a fetch thread, re-raising its panic if it had one.
    fn join_fetch<T>(handle: ScopedJoinHandle<'_, Result<T>>) -> Result<T> {
        handle
            .join()
            .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
    }

    /// Fetches the three refresh payloads on scoped threads. All three
    /// requests run to completion before any failure is reported.
    fn fetch_batch<G: BlockingGateway>(gateway: &G) -> Result<Snapshot> {
        thread::scope(|scope| {
            let summary_handle = scope.spawn(|| gateway.fetch_summary());
            let transactions_handle = scope.spawn(|| gateway.fetch_transactions());
            let budgets = gateway.fetch_budgets();
            let summary = join_fetch(summary_handle);
            let transactions = join_fetch(transactions_handle);
            Ok(Snapshot {
                summary: summary?,
                transactions: transactions?,
                budgets: budgets?,
            })
        })
    }

    define_dashboard! {
        dashboard_name: BlockingDashboard,
        builder_name: BlockingDashboardBuilder,
        gateway_trait: BlockingGateway,
        dashboard_doc: "Blocking dashboard over a [`BlockingGateway`] and a [`SettingsStore`].\n\nUse [`BlockingDashboard::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`BlockingDashboard`].",
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::models::{
            BudgetEntry, Breakdown, Budgets, Currency, EntryKind, Language, NaiveDate,
            NewTransaction, Summary, TransactionId, TransactionKind,
        };
        use crate::projections::BudgetStatus;
        use crate::storage::InMemorySettingsStore;

        /// Scripted gateway for exercising the flows without a server.
        #[derive(Debug, Default)]
        struct MockGateway {
            /// Scripted responses and recorded calls.
            inner: Mutex<MockInner>,
        }

        /// Mock state.
        #[derive(Debug, Default)]
        struct MockInner {
            /// Summary payload.
            summary: Summary,
            /// Transactions payload.
            transactions: Vec<Transaction>,
            /// Budgets payload.
            budgets: Budgets,
            /// Breakdown payload.
            breakdown: Breakdown,
            /// Fail `fetch_budgets` with a 500.
            fail_budgets: bool,
            /// Fail `fetch_breakdown` with a 500.
            fail_breakdown: bool,
            /// Reject creates with this detail.
            reject_create: Option<String>,
            /// Status returned by `create_budget`.
            budget_status: Option<String>,
            /// Recorded manual entries.
            created: Vec<NewTransaction>,
            /// Number of summary fetches.
            refreshes: usize,
        }

        impl MockGateway {
            fn edit(&self, op: impl FnOnce(&mut MockInner)) {
                op(&mut self.inner.lock().unwrap());
            }

            fn read<R>(&self, op: impl FnOnce(&MockInner) -> R) -> R {
                op(&self.inner.lock().unwrap())
            }

            fn rejection(&self) -> Option<FinSmartError> {
                self.read(|mock| {
                    mock.reject_create.clone().map(|detail| FinSmartError::Rejected {
                        status: 400,
                        detail,
                    })
                })
            }
        }

        impl BlockingGateway for MockGateway {
            fn fetch_summary(&self) -> Result<Summary> {
                let mut mock = self.inner.lock().unwrap();
                mock.refreshes += 1;
                Ok(mock.summary.clone())
            }

            fn fetch_transactions(&self) -> Result<Vec<Transaction>> {
                Ok(self.read(|mock| mock.transactions.clone()))
            }

            fn fetch_budgets(&self) -> Result<Budgets> {
                self.read(|mock| {
                    if mock.fail_budgets {
                        Err(FinSmartError::Status { status: 500 })
                    } else {
                        Ok(mock.budgets.clone())
                    }
                })
            }

            fn fetch_breakdown(&self) -> Result<Breakdown> {
                self.read(|mock| {
                    if mock.fail_breakdown {
                        Err(FinSmartError::Status { status: 500 })
                    } else {
                        Ok(mock.breakdown.clone())
                    }
                })
            }

            fn create_transaction(&self, input: &NewTransaction) -> Result<Transaction> {
                if let Some(err) = self.rejection() {
                    return Err(err);
                }
                self.edit(|mock| mock.created.push(input.clone()));
                Ok(tx(99, input.amount, "2024-05-01"))
            }

            fn create_from_raw_text(&self, text: &str) -> Result<Transaction> {
                if let Some(err) = self.rejection() {
                    return Err(err);
                }
                let mut created = tx(100, 12.0, "2024-05-02");
                created.raw_text = text.to_owned();
                Ok(created)
            }

            fn create_budget(&self, _category: &str, _limit: f64) -> Result<BudgetAck> {
                let status = self.read(|mock| mock.budget_status.clone());
                Ok(BudgetAck {
                    status: status.unwrap_or_else(|| "success".to_owned()),
                    message: None,
                })
            }
        }

        fn tx(id: i64, amount: f64, date: &str) -> Transaction {
            Transaction {
                id: TransactionId::new(id),
                kind: TransactionKind::Debit,
                amount,
                category: Some("Transport".to_owned()),
                description: Some(format!("tx {id}")),
                date: date.parse().unwrap(),
                raw_text: String::new(),
            }
        }

        fn budgets(spent: f64) -> Budgets {
            [("Transport", BudgetEntry { limit: 100.0, spent })]
                .into_iter()
                .collect()
        }

        fn seeded_gateway() -> MockGateway {
            let gateway = MockGateway::default();
            gateway.edit(|mock| {
                mock.summary = Summary {
                    total_income: 1000.0,
                    total_expense: 250.0,
                    net_savings: 750.0,
                    recommendations: vec!["Excellent! Keep going.".to_owned()],
                };
                mock.transactions = (1..=7)
                    .map(|id| tx(id, 10.0 * f64::from(u8::try_from(id).unwrap()), "2024-04-10"))
                    .collect();
                mock.budgets = budgets(50.0);
                mock.breakdown = [("Transport", 250.0)].into_iter().collect();
            });
            gateway
        }

        fn dashboard(
            gateway: MockGateway,
            policy: AlertPolicy,
        ) -> BlockingDashboard<MockGateway, InMemorySettingsStore> {
            BlockingDashboard::builder()
                .gateway(gateway)
                .settings_store(InMemorySettingsStore::new())
                .alert_policy(policy)
                .build()
                .unwrap()
        }

        fn last_message(dash: &BlockingDashboard<MockGateway, InMemorySettingsStore>) -> String {
            dash.notifications().visible().unwrap().message
        }

        #[test]
        fn build_requires_gateway() {
            let result = BlockingDashboard::<MockGateway, InMemorySettingsStore>::builder()
                .settings_store(InMemorySettingsStore::new())
                .build();
            assert!(matches!(result, Err(FinSmartError::MissingComponent("gateway"))));
        }

        #[test]
        fn build_loads_stored_settings() {
            let stored = DisplaySettings {
                currency: Currency::Eur,
                ..DisplaySettings::default()
            };
            let dash = BlockingDashboard::builder()
                .gateway(MockGateway::default())
                .settings_store(InMemorySettingsStore::with_settings(stored.clone()))
                .build()
                .unwrap();
            assert_eq!(dash.settings(), stored);
        }

        #[test]
        fn refresh_renders_in_full() {
            let dash = dashboard(seeded_gateway(), AlertPolicy::default());
            let outcome = dash.refresh_all();
            let view = outcome.view().unwrap();
            assert_eq!(view.sequence, 1);
            assert_eq!(view.recent.len(), 5);
            assert_eq!(view.transactions.len(), 7);
            assert!((view.stats.savings_rate - 75.0).abs() < 1e-9);
            assert!(matches!(view.chart, ChartView::Ready(_)));
            assert_eq!(view.insights.len(), 1);
            assert_eq!(view.budgets.len(), 1);
            assert_eq!(view.profile.total_count, 7);
            assert_eq!(last_message(&dash), "Data loaded from server.");
            assert_eq!(dash.state().transactions().len(), 7);
        }

        #[test]
        fn failed_batch_leaves_state_unchanged() {
            let dash = dashboard(seeded_gateway(), AlertPolicy::default());
            assert!(dash.refresh_all().is_rendered());
            let before = dash.state();

            dash.gateway().edit(|mock| {
                mock.fail_budgets = true;
                mock.transactions.clear();
            });
            let outcome = dash.refresh_all();
            assert!(matches!(outcome, RefreshOutcome::Failed(FinSmartError::Status { status: 500 })));
            assert_eq!(dash.state(), before);

            let shown = dash.notifications().visible().unwrap();
            assert!(shown.is_error);
            assert!(shown.message.starts_with("Failed to connect to backend server."));
        }

        #[test]
        fn chart_failure_only_degrades_chart() {
            let gateway = seeded_gateway();
            gateway.edit(|mock| mock.fail_breakdown = true);
            let dash = dashboard(gateway, AlertPolicy::default());
            let outcome = dash.refresh_all();
            let view = outcome.view().unwrap();
            assert_eq!(view.chart, ChartView::Unavailable);
            assert_eq!(view.transactions.len(), 7);
            assert!((view.stats.total_income - 1000.0).abs() < f64::EPSILON);
        }

        #[test]
        fn empty_breakdown_is_empty_chart() {
            let gateway = seeded_gateway();
            gateway.edit(|mock| mock.breakdown = Breakdown::new());
            let dash = dashboard(gateway, AlertPolicy::default());
            assert_eq!(dash.refresh_all().view().unwrap().chart, ChartView::Empty);
        }

        #[test]
        fn older_refresh_is_superseded() {
            let dash = dashboard(seeded_gateway(), AlertPolicy::default());
            lock_inner(&dash.inner).committed_seq = 10;
            let outcome = dash.refresh_all();
            assert!(matches!(outcome, RefreshOutcome::Superseded { sequence: 1 }));
            assert!(dash.state().transactions().is_empty());
        }

        #[test]
        fn upward_crossing_alerts_once() {
            let gateway = seeded_gateway();
            gateway.edit(|mock| mock.budgets = budgets(85.0));
            let dash = dashboard(gateway, AlertPolicy::OnUpwardCrossing);
            let _refresh = dash.refresh_all();
            let _drained = dash.notifications().drain();

            let _rows = dash.budget_view();
            assert!(dash.notifications().drain().is_empty());

            dash.gateway().edit(|mock| mock.budgets = budgets(99.0));
            let _refresh = dash.refresh_all();
            let alerts: Vec<_> = dash
                .notifications()
                .drain()
                .into_iter()
                .filter(|n| n.is_error)
                .collect();
            assert_eq!(alerts.len(), 1);
            assert_eq!(alerts.first().unwrap().message, "Budget Exceeded for Transport.");
        }

        #[test]
        fn every_render_policy_repeats_alerts() {
            let gateway = seeded_gateway();
            gateway.edit(|mock| mock.budgets = budgets(85.0));
            let dash = dashboard(gateway, AlertPolicy::EveryRender);
            let _refresh = dash.refresh_all();
            let _drained = dash.notifications().drain();

            let rows = dash.budget_view();
            assert_eq!(rows.first().unwrap().status, BudgetStatus::Warning);
            let repeated = dash.notifications().drain();
            assert_eq!(repeated.len(), 1);
            assert_eq!(
                repeated.first().unwrap().message,
                "Budget Warning: Approaching limit for Transport."
            );
        }

        #[test]
        fn disabled_notifications_silence_alerts() {
            let gateway = seeded_gateway();
            gateway.edit(|mock| mock.budgets = budgets(120.0));
            let dash = BlockingDashboard::builder()
                .gateway(gateway)
                .settings_store(InMemorySettingsStore::with_settings(DisplaySettings {
                    notifications: false,
                    ..DisplaySettings::default()
                }))
                .alert_policy(AlertPolicy::EveryRender)
                .build()
                .unwrap();
            let _refresh = dash.refresh_all();
            assert!(dash.notifications().drain().iter().all(|n| !n.is_error));
        }

        #[test]
        fn submit_transaction_success_resets_form() {
            let dash = dashboard(seeded_gateway(), AlertPolicy::default());
            let mut form = TransactionForm::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
            form.amount = "42".to_owned();
            form.category = "Transport".to_owned();
            form.description = "Taxi".to_owned();

            let outcome = dash.submit_transaction(&mut form);
            assert!(outcome.is_accepted());
            assert!(form.amount.is_empty());
            assert_eq!(last_message(&dash), "Transaction added successfully!");
            dash.gateway().read(|mock| {
                assert_eq!(mock.created.len(), 1);
                assert_eq!(mock.created.first().unwrap().kind, EntryKind::Expense);
                assert_eq!(mock.refreshes, 1);
            });
        }

        #[test]
        fn submit_transaction_failure_keeps_form() {
            let gateway = seeded_gateway();
            gateway.edit(|mock| mock.reject_create = Some("Amount must be positive".to_owned()));
            let dash = dashboard(gateway, AlertPolicy::default());
            let mut form = TransactionForm::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
            form.amount = "-5".to_owned();

            let outcome = dash.submit_transaction(&mut form);
            assert!(matches!(outcome, SubmitOutcome::Failed(_)));
            assert_eq!(form.amount, "-5");
            assert_eq!(
                last_message(&dash),
                "Failed to save transaction to server.: Amount must be positive"
            );
            assert_eq!(dash.gateway().read(|mock| mock.refreshes), 0);
        }

        #[test]
        fn non_numeric_amount_is_skipped() {
            let dash = dashboard(seeded_gateway(), AlertPolicy::default());
            let mut form = TransactionForm::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
            form.amount = "ten".to_owned();
            assert!(matches!(dash.submit_transaction(&mut form), SubmitOutcome::Skipped));
            assert!(dash.gateway().read(|mock| mock.created.is_empty()));
        }

        #[test]
        fn second_submit_while_in_flight_is_refused() {
            let dash = dashboard(seeded_gateway(), AlertPolicy::default());
            let _ticket = dash.transaction_guard.try_begin().unwrap();
            let mut form = TransactionForm::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
            form.amount = "1".to_owned();
            assert!(matches!(dash.submit_transaction(&mut form), SubmitOutcome::InFlight));
        }

        #[test]
        fn raw_text_flow() {
            let dash = dashboard(seeded_gateway(), AlertPolicy::default());
            let mut empty = RawTextForm::new("  ");
            assert!(matches!(dash.submit_raw_text(&mut empty), SubmitOutcome::Skipped));
            assert_eq!(last_message(&dash), "Please paste transaction text to parse.");

            let mut form = RawTextForm::new("Paid Rs. 12 for tea");
            let outcome = dash.submit_raw_text(&mut form);
            assert!(outcome.is_accepted());
            assert!(form.text.is_empty());
            assert_eq!(last_message(&dash), "AI added transaction: Transport on 2024-05-02");
        }

        #[test]
        fn undeclared_budget_status_is_declined() {
            let gateway = seeded_gateway();
            gateway.edit(|mock| mock.budget_status = Some("error".to_owned()));
            let dash = dashboard(gateway, AlertPolicy::default());
            let mut form = BudgetForm::new("Shopping", "300");
            assert!(matches!(dash.submit_budget(&mut form), SubmitOutcome::Declined));
            assert_eq!(form.limit, "300");
            assert!(dash.notifications().visible().is_none());
        }

        #[test]
        fn accepted_budget_refreshes_and_resets() {
            let dash = dashboard(seeded_gateway(), AlertPolicy::default());
            let mut form = BudgetForm::new("Shopping", "300");
            assert!(dash.submit_budget(&mut form).is_accepted());
            assert_eq!(form, BudgetForm::default());
            assert_eq!(last_message(&dash), "Budget limit set successfully!");
        }

        #[test]
        fn save_settings_persists_and_relocalizes() {
            let dash = dashboard(seeded_gateway(), AlertPolicy::default());
            let outcome = dash
                .save_settings(SettingsPatch {
                    language: Some(Language::Hi),
                    currency: Some(Currency::Usd),
                    ..SettingsPatch::default()
                })
                .unwrap();
            assert_eq!(outcome.view().unwrap().currency, Currency::Usd);
            assert_eq!(dash.settings().language, Language::Hi);
            assert_eq!(dash.settings_form().currency, Currency::Usd);
            assert_eq!(
                last_message(&dash),
                messages(Language::Hi).settings_saved
            );
        }

        #[test]
        fn clear_cache_resets_settings() {
            let dash = dashboard(seeded_gateway(), AlertPolicy::default());
            let _saved = dash
                .save_settings(SettingsPatch {
                    dark_mode: Some(true),
                    ..SettingsPatch::default()
                })
                .unwrap();
            let _drained = dash.notifications().drain();
            let outcome = dash.clear_cache().unwrap();
            assert!(outcome.is_rendered());
            assert_eq!(dash.settings(), DisplaySettings::default());
            let messages: Vec<String> =
                dash.notifications().drain().into_iter().map(|n| n.message).collect();
            assert_eq!(messages.first().map(String::as_str), Some(CACHE_CLEARED));
        }

        #[test]
        fn export_requires_data() {
            let dash = dashboard(seeded_gateway(), AlertPolicy::default());
            assert!(dash.export_csv().unwrap().is_none());
            assert_eq!(last_message(&dash), "No data to export.");

            let _refresh = dash.refresh_all();
            let csv = dash.export_csv().unwrap().unwrap();
            assert_eq!(csv.lines().count(), 8);
            assert_eq!(last_message(&dash), "Data exported successfully!");
        }

        #[test]
        fn navigate_dashboard_refreshes() {
            let dash = dashboard(seeded_gateway(), AlertPolicy::default());
            assert!(matches!(dash.navigate(View::Profile), Navigation::Profile(_)));
            assert!(matches!(
                dash.navigate(View::Dashboard),
                Navigation::Dashboard(RefreshOutcome::Rendered(_))
            ));
            match dash.navigate(View::Transactions) {
                Navigation::Transactions(list) => assert_eq!(list.len(), 7),
                other => panic!("unexpected navigation {other:?}"),
            }
        }

        #[test]
        fn filter_uses_cache() {
            let dash = dashboard(seeded_gateway(), AlertPolicy::default());
            let _refresh = dash.refresh_all();
            let filter = TransactionFilter::new().kind(TransactionKind::Credit);
            assert!(dash.filter_transactions(&filter).is_empty());
        }
    }
}

#[cfg(feature = "async")]
pub use async_dashboard::{Dashboard, DashboardBuilder};
#[cfg(feature = "blocking")]
pub use blocking_dashboard::{BlockingDashboard, BlockingDashboardBuilder};

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: &str, status: BudgetStatus) -> BudgetProgress {
        BudgetProgress {
            category: category.to_owned(),
            limit: 100.0,
            spent: 0.0,
            percentage: 0.0,
            status,
        }
    }

    #[test]
    fn upward_crossing_tracks_levels() {
        let mut levels = HashMap::new();
        let first = [row("Food", BudgetStatus::Warning)];
        assert_eq!(budget_alerts(&first, &mut levels, AlertPolicy::OnUpwardCrossing).len(), 1);
        assert!(budget_alerts(&first, &mut levels, AlertPolicy::OnUpwardCrossing).is_empty());

        let worse = [row("Food", BudgetStatus::Danger)];
        assert_eq!(budget_alerts(&worse, &mut levels, AlertPolicy::OnUpwardCrossing).len(), 1);

        let better = [row("Food", BudgetStatus::Success)];
        assert!(budget_alerts(&better, &mut levels, AlertPolicy::OnUpwardCrossing).is_empty());
        assert_eq!(budget_alerts(&first, &mut levels, AlertPolicy::OnUpwardCrossing).len(), 1);
    }

    #[test]
    fn removed_categories_are_forgotten() {
        let mut levels = HashMap::new();
        let _alerts = budget_alerts(
            &[row("Food", BudgetStatus::Danger)],
            &mut levels,
            AlertPolicy::OnUpwardCrossing,
        );
        let _alerts = budget_alerts(&[], &mut levels, AlertPolicy::OnUpwardCrossing);
        assert!(levels.is_empty());
    }

    #[test]
    fn every_render_ignores_history() {
        let mut levels = HashMap::new();
        let rows = [
            row("Food", BudgetStatus::Warning),
            row("Rent/Housing", BudgetStatus::Success),
        ];
        for _ in 0..3 {
            assert_eq!(budget_alerts(&rows, &mut levels, AlertPolicy::EveryRender).len(), 1);
        }
    }
}
