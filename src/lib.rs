//! Client library for the FinSmart personal-finance backend.
//!
//! The crate keeps a local cache of the latest server snapshot and turns it
//! into view-ready projections for a dashboard front-end:
//!
//! - [`client`]: async and blocking HTTP clients for the backend API.
//! - [`gateway`]: the traits the dashboard talks to, implemented by the
//!   clients.
//! - [`dashboard`]: refresh orchestration, create flows and rendering.
//! - [`projections`]: pure functions from cached data to views.
//! - [`storage`]: device-local persistence of display settings.
//!
//! # Example
//!
//! ```no_run
//! use finsmart_rs::client::FinSmartBlockingClient;
//! use finsmart_rs::dashboard::BlockingDashboard;
//! use finsmart_rs::storage::InMemorySettingsStore;
//!
//! # fn main() -> finsmart_rs::error::Result<()> {
//! let dashboard = BlockingDashboard::builder()
//!     .gateway(FinSmartBlockingClient::builder().build()?)
//!     .settings_store(InMemorySettingsStore::new())
//!     .build()?;
//! if let Some(view) = dashboard.refresh_all().view() {
//!     println!("{} transactions", view.transactions.len());
//! }
//! # Ok(())
//! # }
//! ```

#[cfg(any(feature = "async", feature = "blocking"))]
pub mod client;
#[cfg(any(feature = "async", feature = "blocking"))]
pub mod dashboard;
pub mod error;
pub mod export;
pub mod filter;
pub mod forms;
#[cfg(any(feature = "async", feature = "blocking"))]
pub mod gateway;
pub mod i18n;
pub mod models;
pub mod notify;
pub mod projections;
pub mod state;
pub mod storage;
