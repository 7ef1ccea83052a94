use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

/// Fixed keys of the persisted widget state.
pub mod keys {
    pub const CUSTOM_EVENTS: &str = "customEvents";
    pub const TODOS: &str = "todos";
    pub const POST_IT_NOTES: &str = "postItNotes";
    pub const THEME: &str = "theme";
    pub const WATER_TRACKER: &str = "waterTracker";
}

/// Trait for a local key-value store holding JSON text.
pub trait KeyValueStore: Send + Sync {
    /// Get the raw value stored under `key`.
    fn get(&self, key: &str)
        -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String)
        -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Load and decode the value under `key`. A missing key yields `None`.
pub async fn load_opt<S, T>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StorageError::Corrupt {
            key: key.to_string(),
            message: e.to_string(),
        })
}

/// Load and decode the value under `key`, defaulting when it was never saved.
pub async fn load<S, T>(store: &S, key: &str) -> Result<T, StorageError>
where
    S: KeyValueStore,
    T: DeserializeOwned + Default,
{
    Ok(load_opt(store, key).await?.unwrap_or_default())
}

/// Encode and store `value` under `key`.
pub async fn save<S, T>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: KeyValueStore,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|e| StorageError::Corrupt {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    store.set(key, raw).await
}

// In-memory implementation for testing
#[cfg(any(test, feature = "test-utils"))]
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// In-memory key-value store for testing.
    #[derive(Default)]
    pub struct InMemoryStore {
        values: RwLock<HashMap<String, String>>,
    }

    impl InMemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Seed a raw value, bypassing encoding.
        pub fn insert_raw(&self, key: &str, value: &str) {
            self.values
                .write()
                .unwrap()
                .insert(key.to_string(), value.to_string());
        }
    }

    impl KeyValueStore for InMemoryStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.values.read().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
            self.values.write().unwrap().insert(key.to_string(), value);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::InMemoryStore;
    use super::*;
    use crate::event::EventBook;
    use crate::theme::Theme;
    use crate::todo::TodoList;

    #[tokio::test]
    async fn test_load_missing_defaults() {
        let store = InMemoryStore::new();
        let todos: TodoList = load(&store, keys::TODOS).await.unwrap();
        assert!(todos.is_empty());

        let theme: Theme = load(&store, keys::THEME).await.unwrap();
        assert_eq!(theme, Theme::System);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = InMemoryStore::new();
        let mut todos = TodoList::new();
        todos.add("Handle", None, 1).unwrap();

        save(&store, keys::TODOS, &todos).await.unwrap();
        let loaded: TodoList = load(&store, keys::TODOS).await.unwrap();
        assert_eq!(loaded, todos);
    }

    #[tokio::test]
    async fn test_corrupt_value() {
        let store = InMemoryStore::new();
        store.insert_raw(keys::CUSTOM_EVENTS, "{not json");

        let result: Result<EventBook, _> = load(&store, keys::CUSTOM_EVENTS).await;
        match result {
            Err(StorageError::Corrupt { key, .. }) => assert_eq!(key, "customEvents"),
            other => panic!("expected corrupt error, got {:?}", other),
        }
    }
}
