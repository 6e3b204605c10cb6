//! User administration - The staff directory behind the user management screens.
//!
//! Admin accounts are kept in the loaded list but never shown and never mutated from
//! here; every mutation of an admin row is refused before a request goes out.

use crate::{
    api::{AuthBackend, UserBackend},
    errors::{Error, Result},
    models::{NewUser, Position, User, UserUpdate},
};
use tracing::{info, warn};

/// Users loaded for one command, plus the server's authorization hint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDirectory {
    users: Vec<User>,
    authorized: bool,
}

impl UserDirectory {
    #[must_use]
    pub const fn new(users: Vec<User>, authorized: bool) -> Self {
        Self { users, authorized }
    }

    /// Fetches the user list, then the `authorizedUser` hint.
    ///
    /// # Errors
    /// Returns an error if either request fails.
    pub async fn load<B>(backend: &B) -> Result<Self>
    where
        B: UserBackend + AuthBackend + ?Sized,
    {
        let users = backend.get_users().await?;
        let authorized = backend.user_type().await?.authorized_user;
        info!("Loaded {} users (authorized: {})", users.len(), authorized);
        Ok(Self::new(users, authorized))
    }

    /// Every loaded user, admins included
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Users shown in listings: everyone except admins
    #[must_use]
    pub fn visible(&self) -> Vec<&User> {
        self.users.iter().filter(|user| !user.is_admin()).collect()
    }

    /// Display hint only; the server decides what the session may do.
    #[must_use]
    pub const fn is_authorized(&self) -> bool {
        self.authorized
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.visible().iter().filter(|user| user.active).count()
    }

    #[must_use]
    pub fn inactive_count(&self) -> usize {
        self.visible().iter().filter(|user| !user.active).count()
    }

    /// Index of a mutable (non-admin) user
    fn editable(&self, id: &str) -> Result<usize> {
        let index = self
            .users
            .iter()
            .position(|user| user.id == id)
            .ok_or_else(|| Error::UserNotFound { id: id.to_string() })?;
        if self.users[index].is_admin() {
            warn!("Refused to modify admin account {}", id);
            return Err(Error::AdminProtected { id: id.to_string() });
        }
        Ok(index)
    }

    /// Creates an account and appends the stored record.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] for blank fields or the admin position, or
    /// the request error.
    pub async fn create<B: UserBackend + ?Sized>(&mut self, backend: &B, new_user: NewUser) -> Result<&User> {
        let new_user = NewUser {
            name: required("name", &new_user.name)?,
            username: required("username", &new_user.username)?,
            password: required("password", &new_user.password)?,
            position: assignable(new_user.position)?,
        };

        let created = backend.create_user(&new_user).await?;
        info!("Created user {} ({})", created.username, created.position);
        self.users.push(created);
        Ok(&self.users[self.users.len() - 1])
    }

    /// Replaces a user's profile. A blank password leaves the stored one as is.
    ///
    /// # Errors
    /// Returns [`Error::UserNotFound`], [`Error::AdminProtected`],
    /// [`Error::InvalidInput`], or the request error.
    pub async fn edit<B: UserBackend + ?Sized>(&mut self, backend: &B, update: UserUpdate) -> Result<&User> {
        let index = self.editable(&update.id)?;
        let update = UserUpdate {
            name: required("name", &update.name)?,
            username: required("username", &update.username)?,
            password: update.password.filter(|password| !password.trim().is_empty()),
            position: assignable(update.position)?,
            id: update.id,
        };

        backend.edit_user(&update).await?;

        let user = &mut self.users[index];
        user.name = update.name;
        user.username = update.username;
        user.position = update.position;
        info!("Updated user {}", user.id);
        Ok(user)
    }

    /// Flips a user's active flag on the server, then locally.
    ///
    /// # Errors
    /// Returns [`Error::UserNotFound`], [`Error::AdminProtected`], or the request error.
    pub async fn toggle_active<B: UserBackend + ?Sized>(&mut self, backend: &B, id: &str) -> Result<bool> {
        let index = self.editable(id)?;
        let active = !self.users[index].active;

        backend.set_user_status(id, active).await?;
        self.users[index].active = active;
        info!("User {} is now {}", id, if active { "active" } else { "inactive" });
        Ok(active)
    }

    /// Deletes a user, removing it locally once the server confirms.
    ///
    /// # Errors
    /// Returns [`Error::UserNotFound`], [`Error::AdminProtected`], or the request error.
    pub async fn delete<B: UserBackend + ?Sized>(&mut self, backend: &B, id: &str) -> Result<User> {
        let index = self.editable(id)?;
        backend.delete_user(id).await?;
        info!("Deleted user {}", id);
        Ok(self.users.remove(index))
    }
}

fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput {
            message: format!("User {field} cannot be empty"),
        });
    }
    Ok(trimmed.to_string())
}

fn assignable(position: Position) -> Result<Position> {
    if position == Position::Admin {
        return Err(Error::InvalidInput {
            message: "Admin accounts cannot be assigned here".to_string(),
        });
    }
    Ok(position)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn staff() -> Vec<User> {
        let mut off = sample_user("u2", "Bola", Position::Staff);
        off.active = false;
        vec![
            sample_user("u1", "Ada", Position::BarMan),
            off,
            sample_user("root", "Root", Position::Admin),
        ]
    }

    fn update(id: &str, password: Option<&str>) -> UserUpdate {
        UserUpdate {
            id: id.to_string(),
            name: " Ada Obi ".to_string(),
            username: "adaobi".to_string(),
            password: password.map(str::to_string),
            position: Position::Manager,
        }
    }

    #[tokio::test]
    async fn test_load_hides_admins_and_counts() -> Result<()> {
        let backend = FakeBackend::new().with_users(staff()).authorized(true);
        let directory = UserDirectory::load(&backend).await?;

        assert_eq!(directory.users().len(), 3);
        let visible: Vec<&str> = directory.visible().iter().map(|u| u.id.as_str()).collect();
        assert_eq!(visible, vec!["u1", "u2"]);
        assert_eq!(directory.active_count(), 1);
        assert_eq!(directory.inactive_count(), 1);
        assert!(directory.is_authorized());
        assert_eq!(backend.calls(), vec!["get_users", "user_type"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_admin_rows_are_never_mutated() {
        let backend = FakeBackend::new().with_users(staff());
        let mut directory = UserDirectory::load(&backend).await.unwrap();
        let before = backend.call_count();

        assert!(matches!(
            directory.toggle_active(&backend, "root").await,
            Err(Error::AdminProtected { .. })
        ));
        assert!(matches!(
            directory.delete(&backend, "root").await,
            Err(Error::AdminProtected { .. })
        ));
        assert!(matches!(
            directory.edit(&backend, update("root", None)).await,
            Err(Error::AdminProtected { .. })
        ));
        assert!(matches!(
            directory.delete(&backend, "nobody").await,
            Err(Error::UserNotFound { .. })
        ));
        assert_eq!(backend.call_count(), before);
    }

    #[tokio::test]
    async fn test_create_validates_before_request() -> Result<()> {
        let backend = FakeBackend::new();
        let mut directory = UserDirectory::default();

        let mut new_user = NewUser {
            name: "Chi".to_string(),
            username: "  ".to_string(),
            password: "secret".to_string(),
            position: Position::Staff,
        };
        assert!(matches!(
            directory.create(&backend, new_user.clone()).await,
            Err(Error::InvalidInput { .. })
        ));

        new_user.username = "chi".to_string();
        new_user.position = Position::Admin;
        assert!(directory.create(&backend, new_user.clone()).await.is_err());
        assert_eq!(backend.call_count(), 0);

        new_user.position = Position::Staff;
        let created = directory.create(&backend, new_user).await?;
        assert_eq!(created.username, "chi");
        assert!(created.active);
        assert_eq!(directory.visible().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_edit_drops_blank_password_and_merges() -> Result<()> {
        let backend = FakeBackend::new().with_users(staff());
        let mut directory = UserDirectory::load(&backend).await?;

        let user = directory.edit(&backend, update("u1", Some("   "))).await?;
        assert_eq!(user.name, "Ada Obi");
        assert_eq!(user.position, Position::Manager);

        directory.edit(&backend, update("u1", Some("n3w"))).await?;

        let edits = backend.edits.lock().unwrap();
        assert_eq!(edits[0].password, None);
        assert_eq!(edits[1].password.as_deref(), Some("n3w"));
        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_commits_after_confirmation() -> Result<()> {
        let backend = FakeBackend::new().with_users(staff());
        let mut directory = UserDirectory::load(&backend).await?;

        backend.fail_next(500, "Failed to update user status");
        assert!(directory.toggle_active(&backend, "u1").await.is_err());
        assert!(directory.get("u1").unwrap().active);

        assert!(!directory.toggle_active(&backend, "u1").await?);
        assert!(directory.toggle_active(&backend, "u2").await?);
        assert_eq!(directory.active_count(), 1);
        assert!(!backend.users.lock().unwrap()[0].active);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_removes_locally() -> Result<()> {
        let backend = FakeBackend::new().with_users(staff());
        let mut directory = UserDirectory::load(&backend).await?;

        let removed = directory.delete(&backend, "u2").await?;
        assert_eq!(removed.name, "Bola");
        assert!(directory.get("u2").is_none());
        Ok(())
    }
}
