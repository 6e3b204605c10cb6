//! Authentication payloads for the `auth` endpoints.

use serde::{Deserialize, Serialize};

/// Body for `auth/loginUser`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response of `auth/loginUser`. `status` is false for disabled accounts.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub status: bool,
}

/// Response of `auth/userType`
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserType {
    #[serde(default)]
    pub authorized_user: bool,
}
