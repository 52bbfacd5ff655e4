//! Remote data gateway traits.
//!
//! This module defines the [`Gateway`] (async) and [`BlockingGateway`]
//! (blocking) traits via a shared macro, mirroring the client generation
//! pattern in [`crate::client`]. The dashboard orchestrators depend only on
//! these traits; the HTTP clients are the production implementations.

/// Generates a gateway trait (async or blocking) with all remote operations.
///
/// Uses `@methods` to define the method list once, and `@method` to render
/// each method in async (`impl Future + Send`) or blocking (`fn`) style.
macro_rules! define_gateway {
    // ── Entry points ────────────────────────────────────────────────
    (
        trait_name: $trait_name:ident,
        trait_doc: $trait_doc:expr,
        mode: async_mode,
    ) => {
        #[doc = $trait_doc]
        pub trait $trait_name: core::fmt::Debug + Send + Sync {
            define_gateway!(@methods async_mode);
        }
    };
    (
        trait_name: $trait_name:ident,
        trait_doc: $trait_doc:expr,
        mode: blocking,
    ) => {
        #[doc = $trait_doc]
        pub trait $trait_name: core::fmt::Debug + Send + Sync {
            define_gateway!(@methods blocking);
        }
    };

    // ── Single method list (shared between both variants) ───────────
    (@methods $mode:ident) => {
        // Reads
        define_gateway!(@method $mode, fetch_summary,
            "Fetches headline totals and recommendations.\n\n# Errors\n\nReturns an error if the request fails or the payload cannot be decoded.",
            -> Result<Summary>);
        define_gateway!(@method $mode, fetch_transactions,
            "Fetches all transactions, newest first.\n\n# Errors\n\nReturns an error if the request fails or the payload cannot be decoded.",
            -> Result<Vec<Transaction>>);
        define_gateway!(@method $mode, fetch_budgets,
            "Fetches budgets with current-period spending.\n\n# Errors\n\nReturns an error if the request fails or the payload cannot be decoded.",
            -> Result<Budgets>);
        define_gateway!(@method $mode, fetch_breakdown,
            "Fetches aggregate expense per category for the chart.\n\n# Errors\n\nReturns an error if the request fails or the payload cannot be decoded.",
            -> Result<Breakdown>);

        // Writes
        define_gateway!(@method $mode, create_transaction,
            "Stores a manually entered transaction and returns it.\n\n# Errors\n\nReturns an error if the request fails, the server rejects it, or the payload cannot be decoded.",
            input: &NewTransaction, -> Result<Transaction>);
        define_gateway!(@method $mode, create_from_raw_text,
            "Stores a transaction parsed and categorized server-side from raw text.\n\n# Errors\n\nReturns an error if the request fails, the server rejects it, or the payload cannot be decoded.",
            text: &str, -> Result<Transaction>);
        define_gateway!(@method $mode, create_budget,
            "Sets the monthly limit for a category.\n\n# Errors\n\nReturns an error if the request fails, the server rejects it, or the payload cannot be decoded.",
            category: &str, limit: f64, -> Result<BudgetAck>);
    };

    // ── Blocking method renderer ────────────────────────────────────
    (@method blocking, $name:ident, $doc:expr,
     $($param:ident: $param_ty:ty,)* -> $ret:ty) => {
        #[doc = $doc]
        fn $name(&self $(, $param: $param_ty)*) -> $ret;
    };

    // ── Async method renderer (returns impl Future + Send) ──────────
    (@method async_mode, $name:ident, $doc:expr,
     $($param:ident: $param_ty:ty,)* -> $ret:ty) => {
        #[doc = $doc]
        fn $name(&self $(, $param: $param_ty)*)
            -> impl core::future::Future<Output = $ret> + Send;
    };
}

#[cfg(feature = "async")]
mod async_gateway {
    //! Async gateway trait definition and its HTTP implementation.

    use core::future::Future;

    use crate::client::FinSmartClient;
    use crate::error::Result;
    use crate::models::{BudgetAck, Breakdown, Budgets, NewTransaction, Summary, Transaction};

    define_gateway! {
        trait_name: Gateway,
        trait_doc: "Async access to the FinSmart backend.\n\nEach call issues one request and resolves to the decoded payload or a typed failure. Calls are never retried or deduplicated.",
        mode: async_mode,
    }

    impl Gateway for FinSmartClient {
        #[inline]
        fn fetch_summary(&self) -> impl Future<Output = Result<Summary>> + Send {
            self.summary()
        }

        #[inline]
        fn fetch_transactions(&self) -> impl Future<Output = Result<Vec<Transaction>>> + Send {
            self.transactions()
        }

        #[inline]
        fn fetch_budgets(&self) -> impl Future<Output = Result<Budgets>> + Send {
            self.budgets()
        }

        #[inline]
        fn fetch_breakdown(&self) -> impl Future<Output = Result<Breakdown>> + Send {
            self.breakdown()
        }

        #[inline]
        fn create_transaction(
            &self,
            input: &NewTransaction,
        ) -> impl Future<Output = Result<Transaction>> + Send {
            FinSmartClient::create_transaction(self, input)
        }

        #[inline]
        fn create_from_raw_text(&self, text: &str) -> impl Future<Output = Result<Transaction>> + Send {
            self.predict_and_save(text)
        }

        #[inline]
        fn create_budget(
            &self,
            category: &str,
            limit: f64,
        ) -> impl Future<Output = Result<BudgetAck>> + Send {
            self.set_budget(category, limit)
        }
    }
}

#[cfg(feature = "blocking")]
mod blocking_gateway {
    //! Blocking gateway trait definition and its HTTP implementation.

    use crate::client::FinSmartBlockingClient;
    use crate::error::Result;
    use crate::models::{BudgetAck, Breakdown, Budgets, NewTransaction, Summary, Transaction};

    define_gateway! {
        trait_name: BlockingGateway,
        trait_doc: "Blocking access to the FinSmart backend.\n\nEach call issues one request and returns the decoded payload or a typed failure. Calls are never retried or deduplicated.",
        mode: blocking,
    }

    impl BlockingGateway for FinSmartBlockingClient {
        #[inline]
        fn fetch_summary(&self) -> Result<Summary> {
            self.summary()
        }

        #[inline]
        fn fetch_transactions(&self) -> Result<Vec<Transaction>> {
            self.transactions()
        }

        #[inline]
        fn fetch_budgets(&self) -> Result<Budgets> {
            self.budgets()
        }

        #[inline]
        fn fetch_breakdown(&self) -> Result<Breakdown> {
            self.breakdown()
        }

        #[inline]
        fn create_transaction(&self, input: &NewTransaction) -> Result<Transaction> {
            FinSmartBlockingClient::create_transaction(self, input)
        }

        #[inline]
        fn create_from_raw_text(&self, text: &str) -> Result<Transaction> {
            self.predict_and_save(text)
        }

        #[inline]
        fn create_budget(&self, category: &str, limit: f64) -> Result<BudgetAck> {
            self.set_budget(category, limit)
        }
    }
}

#[cfg(feature = "async")]
pub use async_gateway::Gateway;
#[cfg(feature = "blocking")]
pub use blocking_gateway::BlockingGateway;
