//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_user_id, UserValidationError};
use crate::domain::listing::Listable;
use crate::domain::storage::{StorageEntity, StorageKey};

/// Store-assigned user identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Parse an existing UserId
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    /// Allocate a fresh identifier for a new user
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for UserId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Registered user
///
/// Serialized as the stored document, so the password hash is included here.
/// API responses use their own projections and never carry it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    /// Argon2 PHC string
    #[serde(rename = "password")]
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a freshly generated id
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self::with_id(UserId::generate(), name, email, password_hash)
    }

    /// Create a user with a known id
    pub fn with_id(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace the profile fields
    pub fn set_profile(&mut self, name: impl Into<String>, email: impl Into<String>) {
        self.name = name.into();
        self.email = email.into();
        self.touch();
    }

    /// Update the password hash
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for User {
    type Key = UserId;

    fn key(&self) -> &Self::Key {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Listable for User {
    fn field_value(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(&self.name),
            "email" => Some(&self.email),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_valid_and_unique() {
        let a = UserId::generate();
        let b = UserId::generate();

        assert_ne!(a, b);
        assert!(UserId::new(a.as_str()).is_ok());
    }

    #[test]
    fn test_user_id_invalid() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("has space").is_err());
    }

    #[test]
    fn test_user_creation() {
        let user = User::new("Alice", "alice@example.com", "hashed_password");

        assert_eq!(user.name(), "Alice");
        assert_eq!(user.email(), "alice@example.com");
        assert_eq!(user.password_hash(), "hashed_password");
        assert_eq!(user.created_at(), user.updated_at());
    }

    #[test]
    fn test_set_profile_touches_timestamp() {
        let mut user = User::new("Alice", "alice@example.com", "hash");
        let original_updated = user.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(10));

        user.set_profile("Alicia", "alicia@example.com");
        assert_eq!(user.name(), "Alicia");
        assert_eq!(user.email(), "alicia@example.com");
        assert!(user.updated_at() > original_updated);
    }

    #[test]
    fn test_listable_fields() {
        let user = User::new("Alice", "alice@example.com", "hash");

        assert_eq!(user.field_value("name"), Some("Alice"));
        assert_eq!(user.field_value("email"), Some("alice@example.com"));
        assert_eq!(user.field_value("password"), None);
    }

    #[test]
    fn test_document_shape_keeps_password_field() {
        let user = User::new("Alice", "alice@example.com", "hashed_password");

        let doc = serde_json::to_value(&user).unwrap();
        assert_eq!(doc["password"], "hashed_password");
        assert_eq!(doc["email"], "alice@example.com");

        let back: User = serde_json::from_value(doc).unwrap();
        assert_eq!(back.id(), user.id());
    }
}
