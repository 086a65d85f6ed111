//! In-memory store for tests and local runs.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{KeyValueStore, StoreResult};

/// Volatile [`KeyValueStore`] backed by hash maps.
///
/// The engine's default for tests. Values and lists live in separate maps
/// so a key can be deleted from both with one call.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
    lists: RwLock<HashMap<String, Vec<String>>>,
}

impl MemoryStore {
    /// A fresh, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys across values and lists.
    ///
    /// Lets tests assert that a failed operation wrote nothing.
    pub async fn key_count(&self) -> usize {
        let values = self.values.read().await;
        let lists = self.lists.read().await;
        values.len() + lists.keys().filter(|k| !values.contains_key(*k)).count()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> StoreResult<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.values.write().await.remove(key);
        self.lists.write().await.remove(key);
        Ok(())
    }

    async fn list_keys(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let values = self.values.read().await;
        let lists = self.lists.read().await;
        let mut keys: Vec<String> = values
            .keys()
            .chain(lists.keys())
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        keys.dedup();
        Ok(keys)
    }

    async fn append_to_list(&self, key: &str, value: String) -> StoreResult<()> {
        self.lists.write().await.entry(key.to_string()).or_default().push(value);
        Ok(())
    }

    async fn list(&self, key: &str) -> StoreResult<Vec<String>> {
        Ok(self.lists.read().await.get(key).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_returns_none_for_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = MemoryStore::new();
        store.set("a", "1".to_string()).await.unwrap();
        store.set("a", "2".to_string()).await.unwrap();
        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn delete_clears_value_and_list() {
        let store = MemoryStore::new();
        store.set("k", "v".to_string()).await.unwrap();
        store.append_to_list("k", "e".to_string()).await.unwrap();
        store.delete("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
        assert!(store.list("k").await.unwrap().is_empty());
        assert_eq!(store.key_count().await, 0);
    }

    #[tokio::test]
    async fn list_keys_filters_by_prefix_across_namespaces() {
        let store = MemoryStore::new();
        store.set("event:meta:a", "{}".to_string()).await.unwrap();
        store.set("event:meta:b", "{}".to_string()).await.unwrap();
        store.set("user:1:profile", "{}".to_string()).await.unwrap();
        store.append_to_list("user:1:event_history", "{}".to_string()).await.unwrap();

        let mut metas = store.list_keys("event:meta:").await.unwrap();
        metas.sort();
        assert_eq!(metas, vec!["event:meta:a", "event:meta:b"]);

        let users = store.list_keys("user:1:").await.unwrap();
        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn append_preserves_insertion_order() {
        let store = MemoryStore::new();
        for n in 1..=3 {
            store.append_to_list("log", n.to_string()).await.unwrap();
        }
        assert_eq!(store.list("log").await.unwrap(), vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn key_count_does_not_double_count_shared_keys() {
        let store = MemoryStore::new();
        store.set("k", "v".to_string()).await.unwrap();
        store.append_to_list("k", "e".to_string()).await.unwrap();
        store.append_to_list("other", "e".to_string()).await.unwrap();
        assert_eq!(store.key_count().await, 2);
    }
}
