//! Session token persistence between command invocations.
//!
//! The token is written once at login and removed at sign-out. Nothing else touches
//! the file; every request reads the token from the `Session` value built here.

use crate::{api::Session, errors::Result};
use std::{fs, io::ErrorKind, path::Path};
use tracing::debug;

/// Reads the stored session. A missing or empty file means "signed out".
///
/// # Errors
/// Returns an error if the file exists but cannot be read.
pub fn load_session<P: AsRef<Path>>(path: P) -> Result<Session> {
    match fs::read_to_string(path.as_ref()) {
        Ok(contents) => {
            let token = contents.trim();
            if token.is_empty() {
                Ok(Session::anonymous())
            } else {
                Ok(Session::with_token(token))
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Session::anonymous()),
        Err(e) => Err(e.into()),
    }
}

/// Persists the session token, replacing any previous one.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn save_session<P: AsRef<Path>>(path: P, token: &str) -> Result<()> {
    debug!("Writing session token to {:?}", path.as_ref());
    fs::write(path.as_ref(), token)?;
    Ok(())
}

/// Removes the stored token. Clearing an absent session is not an error.
///
/// # Errors
/// Returns an error if the file exists but cannot be removed.
pub fn clear_session<P: AsRef<Path>>(path: P) -> Result<()> {
    match fs::remove_file(path.as_ref()) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
