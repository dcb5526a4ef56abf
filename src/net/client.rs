//! HTTP transport for the admin API.
//!
//! Every request the console makes passes through [`Api`] exactly once. The
//! transport owns the two cross-cutting behaviors callers must never have to
//! re-implement: attaching the stored bearer credential to outgoing
//! requests, and the global 401 policy — clear the credential slot and
//! notify the registered unauthorized hook, independent of whichever view
//! issued the request.
//!
//! Real HTTP happens via `gloo-net` on the client build; callers get typed
//! [`ApiError`] values everywhere else.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

use crate::config::AppConfig;
use crate::net::token::TokenStore;

/// Failure taxonomy of the transport, as seen by callers.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not complete at all; retryable.
    #[error("network error: {0}")]
    Network(String),
    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,
    /// The server rejected the credential. Already handled globally by the
    /// transport; views should not surface this as a normal error.
    #[error("authentication rejected")]
    Unauthorized,
    /// Application-level failure: envelope `code != 0` or a non-2xx status
    /// other than 401, carrying the server-provided message.
    #[error("{0}")]
    Api(String),
    /// The response body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),
    /// Network calls are only meaningful in the browser.
    #[error("not available outside the browser")]
    Unsupported,
}

type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// Shared client handle for the admin API.
///
/// Cheap to clone; all clones share the token store and the unauthorized
/// hook. One instance is created at application start and provided through
/// context — callers hold a handle, there is no ambient singleton.
#[derive(Clone)]
pub struct Api {
    base_url: String,
    timeout_ms: u32,
    tokens: Arc<dyn TokenStore>,
    on_unauthorized: Arc<Mutex<Option<UnauthorizedHook>>>,
}

impl Api {
    pub fn new(config: &AppConfig, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            base_url: config.api_url.trim_end_matches('/').to_owned(),
            timeout_ms: config.request_timeout_ms,
            tokens,
            on_unauthorized: Arc::new(Mutex::new(None)),
        }
    }

    /// The credential slot this transport reads on every request.
    pub fn tokens(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.tokens)
    }

    /// Register the single subscriber for credential-rejection events.
    ///
    /// The hook decides what a rejected credential means for the application
    /// (reset the session, navigate to the login boundary); the transport
    /// only emits the event.
    pub fn set_unauthorized_hook(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self
            .on_unauthorized
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(hook));
    }

    /// Apply the global 401 policy: clear the credential slot and notify the
    /// hook. Idempotent — clearing an empty slot and re-notifying an
    /// already-anonymous session are both no-ops downstream.
    pub fn handle_unauthorized(&self) {
        self.tokens.clear();
        let hook = self
            .on_unauthorized
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(hook) = hook {
            hook();
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

// Browser-only request machinery. Endpoint methods live in `net::api`.
#[cfg(feature = "hydrate")]
impl Api {
    /// Attach the stored credential and content negotiation headers.
    pub(crate) fn authorized(
        &self,
        builder: gloo_net::http::RequestBuilder,
    ) -> gloo_net::http::RequestBuilder {
        let builder = builder.header("Accept", "application/json");
        match self.tokens.read() {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    /// Send a request, racing it against the configured timeout, and apply
    /// the global 401 policy unless `enforce_auth` is off (login only).
    pub(crate) async fn dispatch(
        &self,
        request: gloo_net::http::Request,
        enforce_auth: bool,
    ) -> Result<gloo_net::http::Response, ApiError> {
        use futures::future::{Either, select};

        let timeout = gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(
            self.timeout_ms,
        )));
        let response = match select(Box::pin(request.send()), Box::pin(timeout)).await {
            Either::Left((result, _)) => {
                result.map_err(|e| ApiError::Network(e.to_string()))?
            }
            Either::Right(((), _)) => return Err(ApiError::Timeout),
        };

        if enforce_auth && response.status() == 401 {
            self.handle_unauthorized();
            return Err(ApiError::Unauthorized);
        }
        Ok(response)
    }

    /// Decode an envelope response and return its payload.
    pub(crate) async fn read_envelope<T: serde::de::DeserializeOwned>(
        &self,
        response: gloo_net::http::Response,
    ) -> Result<T, ApiError> {
        if !response.ok() {
            return Err(ApiError::Api(failure_message(&response).await));
        }
        let envelope = response
            .json::<crate::net::types::Envelope<T>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        if envelope.code != 0 {
            return Err(ApiError::Api(envelope.message));
        }
        envelope
            .data
            .ok_or_else(|| ApiError::Decode("envelope data missing".to_owned()))
    }

    /// Decode an envelope response for endpoints whose payload is empty.
    pub(crate) async fn read_envelope_ok(
        &self,
        response: gloo_net::http::Response,
    ) -> Result<(), ApiError> {
        if !response.ok() {
            return Err(ApiError::Api(failure_message(&response).await));
        }
        let envelope = response
            .json::<crate::net::types::Envelope<serde_json::Value>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        if envelope.code != 0 {
            return Err(ApiError::Api(envelope.message));
        }
        Ok(())
    }
}

/// Extract the server-provided failure message from a non-2xx body,
/// preferring `message` over `detail`, with a status-code fallback.
#[cfg(feature = "hydrate")]
pub(crate) async fn failure_message(response: &gloo_net::http::Response) -> String {
    let status = response.status();
    match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .or_else(|| body.get("detail").and_then(serde_json::Value::as_str))
            .map_or_else(
                || format!("request failed with status {status}"),
                ToOwned::to_owned,
            ),
        Err(_) => format!("request failed with status {status}"),
    }
}

/// Percent-encode the credential-grant form body for `POST /admin/login`.
#[cfg(feature = "hydrate")]
pub(crate) fn form_encode(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            let encoded: String = js_sys::encode_uri_component(value).into();
            format!("{key}={encoded}")
        })
        .collect::<Vec<_>>()
        .join("&")
}
