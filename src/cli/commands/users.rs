//! User commands - list, add, edit, toggle and delete staff accounts.

use crate::{
    api::{AuthBackend, UserBackend},
    core::users::UserDirectory,
    errors::{Error, Result},
    models::{NewUser, Position, UserUpdate},
};
use std::fmt::Write;

/// Optional field changes for `users edit`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub position: Option<Position>,
}

/// Lists non-admin users with their status and the head counts.
pub async fn list<B>(backend: &B) -> Result<String>
where
    B: UserBackend + AuthBackend + ?Sized,
{
    let directory = UserDirectory::load(backend).await?;
    let visible = directory.visible();
    if visible.is_empty() {
        return Ok("No users found.".to_string());
    }

    let mut out = format!(
        "{:<26} {:<24} {:<16} {:<8} {:<8}\n",
        "ID", "Name", "Username", "Position", "Status"
    );
    for user in visible {
        writeln!(
            out,
            "{:<26} {:<24} {:<16} {:<8} {:<8}",
            user.id,
            user.name,
            user.username,
            user.position,
            if user.active { "active" } else { "disabled" }
        )?;
    }
    write!(
        out,
        "{} active, {} disabled",
        directory.active_count(),
        directory.inactive_count()
    )?;
    Ok(out)
}

pub async fn add<B>(backend: &B, new_user: NewUser) -> Result<String>
where
    B: UserBackend + ?Sized,
{
    let mut directory = UserDirectory::default();
    let user = directory.create(backend, new_user).await?;
    Ok(format!("User '{}' created with id {}", user.username, user.id))
}

/// Applies `changes` on top of the stored profile. The password is only sent when given.
pub async fn edit<B>(backend: &B, id: &str, changes: UserChanges) -> Result<String>
where
    B: UserBackend + AuthBackend + ?Sized,
{
    let mut directory = UserDirectory::load(backend).await?;
    let current = directory
        .get(id)
        .ok_or_else(|| Error::UserNotFound { id: id.to_string() })?;

    let update = UserUpdate {
        id: current.id.clone(),
        name: changes.name.unwrap_or_else(|| current.name.clone()),
        username: changes.username.unwrap_or_else(|| current.username.clone()),
        password: changes.password,
        position: changes.position.unwrap_or(current.position),
    };
    let user = directory.edit(backend, update).await?;
    Ok(format!("User '{}' updated", user.username))
}

/// Enables a disabled account or disables an active one.
pub async fn toggle<B>(backend: &B, id: &str) -> Result<String>
where
    B: UserBackend + AuthBackend + ?Sized,
{
    let mut directory = UserDirectory::load(backend).await?;
    let active = directory.toggle_active(backend, id).await?;
    Ok(format!(
        "User {id} {}",
        if active { "enabled" } else { "disabled" }
    ))
}

pub async fn delete<B>(backend: &B, id: &str) -> Result<String>
where
    B: UserBackend + AuthBackend + ?Sized,
{
    let mut directory = UserDirectory::load(backend).await?;
    let removed = directory.delete(backend, id).await?;
    Ok(format!("User '{}' deleted", removed.username))
}
