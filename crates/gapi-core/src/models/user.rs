use std::fmt;

use serde::{Deserialize, Serialize};

/// A user account as listed by `/api/users`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub login: String,
    pub is_admin: bool,
}

impl User {
    /// Name for display, falling back to the login when no name is set.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.login
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchUserContextResponse {
    pub message: String,
}

/// Body for creating a user through the admin endpoint.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AdminCreateUserForm {
    pub email: String,
    pub login: String,
    pub name: String,
    pub password: String,
}

impl fmt::Debug for AdminCreateUserForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCreateUserForm")
            .field("email", &self.email)
            .field("login", &self.login)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminCreateUserResponse {
    pub id: i64,
    pub message: String,
}
