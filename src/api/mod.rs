//! API layer - Request wrappers for the remote inventory and sales service.
//!
//! Each remote operation is a method on one of the backend traits below. The core
//! modules only ever talk to these traits, so the reqwest-based [`ApiClient`] can be
//! swapped for an in-memory backend in tests.

/// Authentication endpoints (`auth/*`)
pub mod auth;
/// reqwest client, credential handling and error normalization
pub mod client;
/// Item endpoints (`items/*`)
pub mod items;
/// Sales endpoints (`sales/*`)
pub mod sales;
/// User endpoints (`user/*` and `auth/createUser`)
pub mod users;

pub use auth::AuthBackend;
pub use client::ApiClient;
pub use items::ItemBackend;
pub use sales::SalesBackend;
pub use users::UserBackend;

/// Credential attached to every authenticated request.
///
/// Passed explicitly to [`ApiClient::new`] instead of being read from ambient
/// storage, so request functions depend only on their inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// A session without a token (login requests only)
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { token: None }
    }

    /// A session carrying `token` as its bearer credential
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// The bearer token, if signed in
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }
}
