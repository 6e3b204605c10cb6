use super::ApiClient;
use crate::{
    errors::Result,
    models::{IdRequest, NewUser, StatusRequest, User, UserUpdate},
};
use async_trait::async_trait;
use reqwest::Method;

/// User account persistence
#[async_trait]
pub trait UserBackend: Send + Sync {
    async fn get_users(&self) -> Result<Vec<User>>;

    /// Creates an account and returns the stored record.
    async fn create_user(&self, user: &NewUser) -> Result<User>;

    /// Replaces profile fields. A missing password keeps the current one.
    async fn edit_user(&self, update: &UserUpdate) -> Result<()>;

    async fn delete_user(&self, id: &str) -> Result<()>;

    /// Enables or disables an account.
    async fn set_user_status(&self, id: &str, active: bool) -> Result<()>;
}

#[async_trait]
impl UserBackend for ApiClient {
    async fn get_users(&self) -> Result<Vec<User>> {
        self.fetch(self.request(Method::GET, "/user/all"), "Failed to load users")
            .await
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        self.fetch(
            self.request(Method::POST, "/auth/createUser").json(user),
            "Failed to create user",
        )
        .await
    }

    async fn edit_user(&self, update: &UserUpdate) -> Result<()> {
        self.send_only(
            self.request(Method::PUT, "/user/edit").json(update),
            "Failed to update user",
        )
        .await
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        self.send_only(
            self.request(Method::DELETE, "/user/delete")
                .json(&IdRequest { id }),
            "Failed to delete user",
        )
        .await
    }

    async fn set_user_status(&self, id: &str, active: bool) -> Result<()> {
        self.send_only(
            self.request(Method::PATCH, "/user/edit-status")
                .json(&StatusRequest { id, status: active }),
            "Failed to update user status",
        )
        .await
    }
}
