use super::ApiClient;
use crate::{
    errors::Result,
    models::{LoginRequest, LoginResponse, UserType},
};
use async_trait::async_trait;
use reqwest::Method;

/// Sign-in and authorization lookups
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Exchanges credentials for a token. Works without a session.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse>;

    /// Reports whether the current session has elevated privileges.
    async fn user_type(&self) -> Result<UserType>;
}

#[async_trait]
impl AuthBackend for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let body = LoginRequest { username, password };
        self.fetch(
            self.request(Method::POST, "/auth/loginUser").json(&body),
            "Login failed",
        )
        .await
    }

    async fn user_type(&self) -> Result<UserType> {
        self.fetch(
            self.request(Method::GET, "/auth/userType"),
            "Failed to validate user",
        )
        .await
    }
}
