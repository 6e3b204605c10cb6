//! User model - Staff accounts managed through the user administration screens.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Job position, which also drives what the server lets the account do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    Manager,
    BarMan,
    Staff,
    Admin,
}

impl Position {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::BarMan => "bar-man",
            Self::Staff => "staff",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manager" => Ok(Self::Manager),
            "bar-man" | "barman" => Ok(Self::BarMan),
            "staff" => Ok(Self::Staff),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown position '{other}'")),
        }
    }
}

/// User record as listed by the API. The password is never read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub username: String,
    pub position: Position,
    #[serde(default)]
    pub active: bool,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.position == Position::Admin
    }
}

/// Payload for `createUser`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub password: String,
    pub position: Position,
}

/// Payload for `user/edit`. A `None` password leaves the stored one untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    pub id: String,
    pub name: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub position: Position,
}

/// Payload for `user/edit-status`
#[derive(Debug, Clone, Serialize)]
pub struct StatusRequest<'a> {
    pub id: &'a str,
    pub status: bool,
}
