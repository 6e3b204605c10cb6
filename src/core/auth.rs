//! Authentication - Sign-in, sign-out and the authorization hint.

use crate::{
    api::{AuthBackend, Session},
    config::session::clear_session,
    errors::{Error, Result},
};
use std::path::Path;
use tracing::{info, warn};

/// Exchanges credentials for a session.
///
/// A disabled account yields no session even when the server sends a token.
///
/// # Errors
/// Returns [`Error::InvalidInput`] for a blank username or password,
/// [`Error::AccountDisabled`] when the server reports the account as disabled, or
/// the request error.
pub async fn login<B: AuthBackend + ?Sized>(backend: &B, username: &str, password: &str) -> Result<Session> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(Error::InvalidInput {
            message: "Username and password are required".to_string(),
        });
    }

    let response = backend.login(username, password).await?;
    if !response.status {
        warn!("Login refused for disabled account {}", username);
        return Err(Error::AccountDisabled);
    }

    let token = response.token.ok_or_else(|| Error::Request {
        status: 200,
        message: "Login response did not include a token".to_string(),
    })?;
    info!("Signed in as {}", username);
    Ok(Session::with_token(token))
}

/// Forgets the persisted session token.
///
/// # Errors
/// Returns an error if the session file exists but cannot be removed.
pub fn sign_out<P: AsRef<Path>>(session_path: P) -> Result<()> {
    clear_session(session_path)?;
    info!("Signed out");
    Ok(())
}

/// Whether the current session has manager-level privileges.
///
/// # Errors
/// Returns an error if the request fails.
pub async fn is_authorized<B: AuthBackend + ?Sized>(backend: &B) -> Result<bool> {
    Ok(backend.user_type().await?.authorized_user)
}
