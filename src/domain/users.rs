// src/domain/users.rs
use serde::{Deserialize, Serialize};
use super::core::UserId;

/// An account as the authentication service reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: UserId,
    pub email: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

impl AuthUser {
    /// The display name, if one has been set and is not blank.
    pub fn username(&self) -> Option<&str> {
        self.display_name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Document stored under `users/{uid}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub admin: bool,
}

impl UserProfile {
    /// Profiles are never created with admin rights.
    pub fn new(name: &str) -> Self {
        UserProfile {
            name: name.to_string(),
            admin: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uid: UserId,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub admin: bool,
}
