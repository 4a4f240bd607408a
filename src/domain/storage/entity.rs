//! Storage entity traits and types

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

/// Trait for types that can be used as storage keys
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// Returns the key as a string for storage backends that require string keys
    fn as_str(&self) -> &str;
}

/// A record that can be persisted as a document
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    /// The key type for this entity
    type Key: StorageKey;

    /// Returns the entity's key
    fn key(&self) -> &Self::Key;

    /// Creation time, used to give listings a stable order
    fn created_at(&self) -> DateTime<Utc>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    struct DocKey(String);

    impl StorageKey for DocKey {
        fn as_str(&self) -> &str {
            &self.0
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Doc {
        id: DocKey,
        created_at: DateTime<Utc>,
    }

    impl StorageEntity for Doc {
        type Key = DocKey;

        fn key(&self) -> &Self::Key {
            &self.id
        }

        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }
    }

    #[test]
    fn test_entity_exposes_key_and_creation_time() {
        let now = Utc::now();
        let doc = Doc {
            id: DocKey("doc-1".to_string()),
            created_at: now,
        };

        assert_eq!(doc.key().as_str(), "doc-1");
        assert_eq!(doc.created_at(), now);
    }
}
