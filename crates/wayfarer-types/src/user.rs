use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Free-form travel preferences. Keys and values are entirely user-defined.
///
/// A `BTreeMap` keeps the rendering order stable when preferences are
/// embedded into prompts.
pub type TravelPreferences = BTreeMap<String, serde_json::Value>;

/// Unique identifier for a user, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Create a new UserId using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A registered user as stored in the identity store.
///
/// Holds the password hash, so this type never leaves the server. Use
/// [`UserProfile`] for anything sent over the wire.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    /// Unique login identity.
    pub email: String,
    /// Salted PHC-format password hash.
    pub hashed_password: String,
    pub full_name: Option<String>,
    pub travel_preferences: TravelPreferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Public view of this user.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            travel_preferences: self.travel_preferences.clone(),
        }
    }
}

/// Public profile record returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub full_name: Option<String>,
    #[serde(default)]
    pub travel_preferences: TravelPreferences,
}

/// Request body for `POST /signup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Request body for `PUT /profile`.
///
/// The update is wholesale: a missing `full_name` clears the name and
/// missing preferences become an empty map. An `email` field, if sent,
/// is accepted and ignored; the token decides whose profile changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub travel_preferences: TravelPreferences,
}

/// Check that a string looks like an email address.
///
/// Intentionally shallow: one `@`, a non-empty local part, and a domain
/// containing a dot that neither starts nor ends it. No whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
