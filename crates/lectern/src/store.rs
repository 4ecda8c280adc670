use lectern_domain::config::{StorageBackend, StorageConfig};
use lectern_storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageKey};

/// The storage backend selected by configuration.
#[derive(Debug, Clone)]
pub enum StateStore {
    File(FileStore),
    Memory(MemoryStore),
}

impl StateStore {
    /// Opens the configured backend, creating the data directory for file storage.
    ///
    /// # Errors
    /// Returns [`StorageError`] if the data directory cannot be created or resolved.
    pub async fn open(config: &StorageConfig) -> Result<Self, StorageError> {
        match config.backend {
            StorageBackend::File => {
                let store = FileStore::builder().root(&config.data_dir).create(true).connect().await?;
                Ok(Self::File(store))
            },
            StorageBackend::Memory => Ok(Self::Memory(MemoryStore::new())),
        }
    }
}

impl KeyValueStore for StateStore {
    async fn get(&self, key: &StorageKey) -> Result<Option<String>, StorageError> {
        match self {
            Self::File(store) => store.get(key).await,
            Self::Memory(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &StorageKey, value: &str) -> Result<(), StorageError> {
        match self {
            Self::File(store) => store.set(key, value).await,
            Self::Memory(store) => store.set(key, value).await,
        }
    }

    async fn remove(&self, key: &StorageKey) -> Result<(), StorageError> {
        match self {
            Self::File(store) => store.remove(key).await,
            Self::Memory(store) => store.remove(key).await,
        }
    }
}
