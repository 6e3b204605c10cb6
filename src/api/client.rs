//! reqwest-based implementation of the backend traits.
//!
//! Every call is fire-once: one request, no retries, no timeout, no caching. Non-2xx
//! responses are turned into [`Error::Request`] using the body's `error` or `message`
//! field, or an operation-specific fallback when the body has neither.

use super::Session;
use crate::errors::{Error, Result};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

/// HTTP client bound to one API base URL and one session
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Creates a client for `base_url` that authenticates with `session`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// The credential this client sends
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Full URL for an endpoint path such as `/items/get`
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Starts a request with the bearer credential attached when one is present.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{} {}", method, path);
        let builder = self.http.request(method, self.url(path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a prepared request and normalizes failures.
    pub(crate) async fn execute(&self, builder: RequestBuilder, fallback: &str) -> Result<Response> {
        let response = builder
            .send()
            .await
            .inspect_err(|e| error!("Request failed before a response arrived: {}", e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = server_message(&body).unwrap_or_else(|| fallback.to_string());
        error!(status = status.as_u16(), "API error: {}", message);
        Err(Error::Request {
            status: status.as_u16(),
            message,
        })
    }

    /// Sends a request and decodes the JSON body into `T`.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        fallback: &str,
    ) -> Result<T> {
        let response = self.execute(builder, fallback).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .inspect_err(|e| error!("Unexpected response body: {}", e))
            .map_err(Into::into)
    }

    /// Sends a request whose response body carries nothing the caller needs.
    pub(crate) async fn send_only(&self, builder: RequestBuilder, fallback: &str) -> Result<()> {
        self.execute(builder, fallback).await.map(|_| ())
    }
}

/// Extracts the server's failure text from a JSON error body.
///
/// `error` wins over `message`; non-string or empty values are ignored.
#[must_use]
pub fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"].iter().find_map(|key| {
        value
            .get(key)
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(String::from)
    })
}
