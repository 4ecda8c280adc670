use crate::KeyValueStore;
use crate::error::StorageError;
use crate::key::StorageKey;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Process-local [`KeyValueStore`]. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<FxHashMap<StorageKey, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &StorageKey) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &StorageKey, value: &str) -> Result<(), StorageError> {
        self.entries.write().insert(key.clone(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &StorageKey) -> Result<(), StorageError> {
        self.entries.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        let key = StorageKey::try_from("userPlan").unwrap();

        store.set(&key, "gold").await.unwrap();
        assert_eq!(other.get(&key).await.unwrap().as_deref(), Some("gold"));
        assert_eq!(other.len(), 1);

        other.remove(&key).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn removing_missing_key_is_ok() {
        let store = MemoryStore::new();
        let key = StorageKey::try_from("course-progress").unwrap();
        store.remove(&key).await.unwrap();
        assert_eq!(store.get(&key).await.unwrap(), None);
    }
}
