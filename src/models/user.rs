use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::UserPreferences;

/// A registered account as persisted in the user store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Hashed credential. Files written by older versions hold plaintext here.
    #[serde(rename = "password")]
    pub password_hash: String,
    #[serde(default)]
    pub preferences: UserPreferences,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(password_hash: String, preferences: UserPreferences) -> Self {
        Self {
            password_hash,
            preferences,
            created_at: Some(Utc::now()),
        }
    }
}

/// username → User, ordered so the store file is stable across writes
pub type UserMap = BTreeMap<String, User>;
