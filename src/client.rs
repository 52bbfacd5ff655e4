//! HTTP client for the FinSmart API.
//!
//! Provides both async and blocking client variants behind feature flags.
//! Every call issues exactly one request: no retries, no deduplication and
//! no client-side timeout.

/// Base URL for a locally running FinSmart backend.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8001/api";

/// Dashboard summary endpoint path.
const SUMMARY_PATH: &str = "/data/summary";

/// Transaction list endpoint path.
const TRANSACTIONS_DATA_PATH: &str = "/data/transactions";

/// Expense breakdown endpoint path.
const BREAKDOWN_PATH: &str = "/data/breakdown";

/// Manual transaction creation endpoint path.
const TRANSACTIONS_PATH: &str = "/transactions";

/// Raw-text categorization endpoint path.
const PREDICT_PATH: &str = "/predict_and_save";

/// Budget list and creation endpoint path.
const BUDGETS_PATH: &str = "/budgets";

/// Error body the backend sends with non-success responses.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    /// Reason; a string for explicit rejections, a list for schema errors.
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Maps a non-success response body to the matching error variant.
///
/// Only a string `detail` counts as a server explanation; anything else
/// falls back to the generic status error.
fn error_from_body(status: u16, body: &str) -> crate::error::FinSmartError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: Some(serde_json::Value::String(detail)),
        }) => crate::error::FinSmartError::Rejected { status, detail },
        Ok(_) | Err(_) => crate::error::FinSmartError::Status { status },
    }
}

/// Validates a base URL and strips any trailing slash.
fn normalize_base_url(raw: &str) -> crate::error::Result<String> {
    let _parsed = url::Url::parse(raw)?;
    Ok(raw.trim_end_matches('/').to_owned())
}

/// Generates a FinSmart client (async or blocking) with builder, methods, and tests.
macro_rules! define_client {
    (
        client_name: $client:ident,
        builder_name: $builder:ident,
        http_type: $http_type:ty,
        response_type: $resp_type:ty,
        client_doc: $client_doc:expr,
        builder_doc: $builder_doc:expr,
        $(async_kw: $async_kw:tt,)?
        $(await_kw: $await_ext:tt,)?
        $(send_bound: $send_bound:tt,)?
    ) => {
        #[doc = $builder_doc]
        #[derive(Debug)]
        pub struct $builder {
            /// Base URL override.
            base_url: Option<String>,
        }

        impl $builder {
            /// Overrides the base URL (a deployed backend, or a mock server
            /// in tests).
            #[inline]
            #[must_use]
            pub fn base_url<T: Into<String>>(mut self, url: T) -> Self {
                self.base_url = Some(url.into());
                self
            }

            /// Builds the client.
            ///
            /// # Errors
            ///
            /// Returns [`FinSmartError::InvalidBaseUrl`] if the base URL
            /// does not parse.
            /// Returns [`FinSmartError::Http`] if the HTTP client fails to build.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub fn build(self) -> Result<$client> {
                let base_url = normalize_base_url(
                    self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
                )?;
                tracing::debug!(base_url = %base_url, "building client");
                let http = <$http_type>::builder().build()?;

                Ok($client { http, base_url })
            }
        }

        #[doc = $client_doc]
        #[derive(Debug)]
        pub struct $client {
            /// Underlying HTTP client.
            http: $http_type,
            /// API base URL without a trailing slash.
            base_url: String,
        }

        impl $client {
            /// Creates a new builder for configuring the client.
            #[inline]
            #[must_use]
            pub const fn builder() -> $builder {
                $builder { base_url: None }
            }

            /// Returns the API base URL requests are sent to.
            #[inline]
            #[must_use]
            pub fn base_url(&self) -> &str {
                &self.base_url
            }

            /// Fetches headline totals and recommendations via
            /// `GET /data/summary`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn summary(&self) -> Result<Summary> {
                self.get_json(SUMMARY_PATH) $( .$await_ext )?
            }

            /// Fetches every transaction, newest first, via
            /// `GET /data/transactions`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn transactions(&self) -> Result<Vec<Transaction>> {
                let list: Option<Vec<Transaction>> =
                    self.get_json(TRANSACTIONS_DATA_PATH) $( .$await_ext )? ?;
                Ok(list.unwrap_or_default())
            }

            /// Fetches budgets with current-month spending via
            /// `GET /budgets`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn budgets(&self) -> Result<Budgets> {
                self.get_json(BUDGETS_PATH) $( .$await_ext )?
            }

            /// Fetches the per-category expense breakdown via
            /// `GET /data/breakdown`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn breakdown(&self) -> Result<Breakdown> {
                self.get_json(BREAKDOWN_PATH) $( .$await_ext )?
            }

            /// Stores a manually entered transaction via `POST /transactions`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn create_transaction(
                &self,
                input: &NewTransaction,
            ) -> Result<Transaction> {
                self.post_json(TRANSACTIONS_PATH, input) $( .$await_ext )?
            }

            /// Sends raw SMS/e-mail text to be categorized and stored via
            /// `POST /predict_and_save`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn predict_and_save(&self, text: &str) -> Result<Transaction> {
                let request = RawTextRequest {
                    raw_text: text.to_owned(),
                };
                self.post_json(PREDICT_PATH, &request) $( .$await_ext )?
            }

            /// Sets a monthly limit for a category via `POST /budgets`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn set_budget(&self, category: &str, limit: f64) -> Result<BudgetAck> {
                let request = NewBudget {
                    category: category.to_owned(),
                    monthly_limit: limit,
                };
                self.post_json(BUDGETS_PATH, &request) $( .$await_ext )?
            }

            /// Sends a GET request and deserializes the response.
            #[tracing::instrument(skip_all, fields(path = %path))]
            $($async_kw)? fn get_json<Resp: serde::de::DeserializeOwned>(
                &self,
                path: &str,
            ) -> Result<Resp> {
                let url = format!("{}{path}", self.base_url);
                tracing::trace!(url = %url, "sending GET request");
                let response: $resp_type = self.http.get(&url).send() $( .$await_ext )? ?;
                Self::handle_response(response) $( .$await_ext )?
            }

            /// Sends a JSON POST request and deserializes the response.
            #[tracing::instrument(skip_all, fields(path = %path))]
            $($async_kw)? fn post_json<
                Req: serde::Serialize $(+ $send_bound)?,
                Resp: serde::de::DeserializeOwned,
            >(
                &self,
                path: &str,
                request: &Req,
            ) -> Result<Resp> {
                let url = format!("{}{path}", self.base_url);
                tracing::trace!(url = %url, "sending POST request");
                let response: $resp_type = self
                    .http
                    .post(&url)
                    .header(CONTENT_TYPE, "application/json")
                    .json(request)
                    .send()
                    $( .$await_ext )?
                    ?;
                Self::handle_response(response) $( .$await_ext )?
            }

            /// Checks the status and deserializes the body, or maps the error
            /// body to a typed failure.
            $($async_kw)? fn handle_response<Resp: serde::de::DeserializeOwned>(
                response: $resp_type,
            ) -> Result<Resp> {
                let status = response.status();
                tracing::debug!(status = %status, "received response");
                if status.is_success() {
                    let body = response.text() $( .$await_ext )? ?;
                    tracing::trace!(body_len = body.len(), "parsing response body");
                    serde_json::from_str(&body).map_err(FinSmartError::from)
                } else {
                    let body = response.text() $( .$await_ext )? .unwrap_or_default();
                    let err = error_from_body(status.as_u16(), &body);
                    tracing::debug!(status = status.as_u16(), error = %err, "API error");
                    Err(err)
                }
            }
        }

    };
}

#[cfg(feature = "async")]
mod async_client {
    //! Async HTTP client for the FinSmart API.

    use reqwest::header::CONTENT_TYPE;

    use super::{
        BREAKDOWN_PATH, BUDGETS_PATH, DEFAULT_BASE_URL, PREDICT_PATH, SUMMARY_PATH,
        TRANSACTIONS_DATA_PATH, TRANSACTIONS_PATH, error_from_body, normalize_base_url,
    };
    use crate::error::{FinSmartError, Result};
    use crate::models::{
        BudgetAck, Breakdown, Budgets, NewBudget, NewTransaction, RawTextRequest, Summary,
        Transaction,
    };

    define_client! {
        client_name: FinSmartClient,
        builder_name: FinSmartClientBuilder,
        http_type: reqwest::Client,
        response_type: reqwest::Response,
        client_doc: "Async client for the FinSmart API.\n\nUse [`FinSmartClient::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`FinSmartClient`].",
        async_kw: async,
        await_kw: await,
        send_bound: Sync,
    }
}

#[cfg(feature = "blocking")]
mod blocking_client {
    //! Blocking (synchronous) HTTP client for the FinSmart API.

    use reqwest::header::CONTENT_TYPE;

    use super::{
        BREAKDOWN_PATH, BUDGETS_PATH, DEFAULT_BASE_URL, PREDICT_PATH, SUMMARY_PATH,
        TRANSACTIONS_DATA_PATH, TRANSACTIONS_PATH, error_from_body, normalize_base_url,
    };
    use crate::error::{FinSmartError, Result};
    use crate::models::{
        BudgetAck, Breakdown, Budgets, NewBudget, NewTransaction, RawTextRequest, Summary,
        Transaction,
    };

    define_client! {
        client_name: FinSmartBlockingClient,
        builder_name: FinSmartBlockingClientBuilder,
        http_type: reqwest::blocking::Client,
        response_type: reqwest::blocking::Response,
        client_doc: "Blocking (synchronous) client for the FinSmart API.\n\nUse [`FinSmartBlockingClient::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`FinSmartBlockingClient`].",
    }
}

#[cfg(feature = "async")]
pub use async_client::{FinSmartClient, FinSmartClientBuilder};
#[cfg(feature = "blocking")]
pub use blocking_client::{FinSmartBlockingClient, FinSmartBlockingClientBuilder};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinSmartError;

    #[test]
    fn string_detail_is_a_rejection() {
        let err = error_from_body(400, r#"{"detail": "Raw text input is required."}"#);
        assert!(matches!(
            err,
            FinSmartError::Rejected { status: 400, ref detail } if detail == "Raw text input is required."
        ));
    }

    #[test]
    fn validation_detail_list_falls_back_to_status() {
        let err = error_from_body(422, r#"{"detail": [{"loc": ["body", "amount"]}]}"#);
        assert!(matches!(err, FinSmartError::Status { status: 422 }));
    }

    #[test]
    fn unparseable_body_falls_back_to_status() {
        let err = error_from_body(502, "<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "HTTP error, status 502");
    }

    #[test]
    fn normalize_keeps_path() {
        assert_eq!(
            normalize_base_url("https://finsmart.example/api//").unwrap(),
            "https://finsmart.example/api"
        );
    }
}
