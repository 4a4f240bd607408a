//! eCash account entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::user::{validate_user_id, UserValidationError};

/// Store-assigned eCash account identifier
///
/// Shares the user id shape rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ECashId(String);

impl ECashId {
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ECashId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ECashId> for String {
    fn from(id: ECashId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ECashId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for ECashId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// e-wallet account
///
/// The pin is kept as given. It is not a credential this service verifies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ECashAccount {
    id: ECashId,
    name: String,
    phone_number: String,
    pin: String,
    account_type: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ECashAccount {
    pub fn new(
        name: impl Into<String>,
        phone_number: impl Into<String>,
        pin: impl Into<String>,
        account_type: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: ECashId::generate(),
            name: name.into(),
            phone_number: phone_number.into(),
            pin: pin.into(),
            account_type: account_type.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &ECashId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn pin(&self) -> &str {
        &self.pin
    }

    pub fn account_type(&self) -> &str {
        &self.account_type
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replace the contact fields, the only ones an update may change
    pub fn set_contact(&mut self, phone_number: impl Into<String>, pin: impl Into<String>) {
        self.phone_number = phone_number.into();
        self.pin = pin.into();
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for ECashAccount {
    type Key = ECashId;

    fn key(&self) -> &Self::Key {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
