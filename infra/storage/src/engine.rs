//! File-backed [`KeyValueStore`]: one file per key under a canonical root directory.

use crate::KeyValueStore;
use crate::builder::FileStoreBuilder;
use crate::error::{StorageError, StorageErrorExt};
use crate::key::StorageKey;
use crate::maintenance::{self, TMP_MARKER};
use crate::security;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

#[derive(Debug)]
pub(crate) struct FileStoreInner {
    /// Canonical data directory; every key resolves directly beneath it.
    pub(crate) root: PathBuf,
    pub(crate) tmp_counter: AtomicU64,
}

/// A sandboxed, crash-safe file store.
///
/// Each value lives in `<root>/<key>`. Writes go to a unique temp file which is synced and
/// then renamed over the target, so readers only ever observe a complete old or new value.
/// The handle is reference-counted and cheap to clone.
#[derive(Debug, Clone)]
pub struct FileStore {
    pub(crate) inner: Arc<FileStoreInner>,
}

impl FileStore {
    #[must_use = "The store is not opened until you call .connect()"]
    pub fn builder() -> FileStoreBuilder {
        FileStoreBuilder::new()
    }

    /// The canonical data directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    /// Physical location of `key`.
    ///
    /// # Errors
    /// Returns [`StorageError::PathTraversalAttempt`] if an existing entry for the key is a
    /// symlink leading outside the root.
    pub fn resolve(&self, key: &StorageKey) -> Result<PathBuf, StorageError> {
        security::resolve_key(&self.inner.root, key)
    }

    pub(crate) async fn purge_tmp(&self) {
        maintenance::purge_tmp(&self.inner.root).await;
    }

    async fn read_value(&self, key: &StorageKey) -> Result<Option<String>, StorageError> {
        let path = self.resolve(key)?;

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(StorageError::Io {
                    source: err,
                    context: Some(format!("Read failed: {}", path.display()).into()),
                });
            },
        };

        String::from_utf8(bytes).map(Some).context(format!("Key {key}"))
    }

    async fn write_value(&self, key: &StorageKey, value: &str) -> Result<(), StorageError> {
        let path = self.resolve(key)?;
        let temp = self.unique_tmp_path(key);

        {
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)
                .await
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(value.as_bytes()).await.context("Write failed")?;
            file.sync_all().await.context("Hardware sync failed")?;
        }

        if let Err(err) = fs::rename(&temp, &path).await {
            if err.kind() != std::io::ErrorKind::AlreadyExists {
                let _ = fs::remove_file(&temp).await;
                return Err(StorageError::Io {
                    source: err,
                    context: Some(
                        format!("Atomic swap failed: {} -> {}", temp.display(), path.display())
                            .into(),
                    ),
                });
            }
            fs::remove_file(&path)
                .await
                .context(format!("Failed to replace existing file: {}", path.display()))?;
            fs::rename(&temp, &path).await.context(format!(
                "Atomic swap failed: {} -> {}",
                temp.display(),
                path.display()
            ))?;
        }

        self.sync_root().await;

        debug!(key = %key, bytes = value.len(), "Value saved atomically");
        Ok(())
    }

    async fn remove_value(&self, key: &StorageKey) -> Result<(), StorageError> {
        let path = self.resolve(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key = %key, "Value removed");
                Ok(())
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io {
                source: err,
                context: Some(format!("Failed to delete: {}", path.display()).into()),
            }),
        }
    }

    fn unique_tmp_path(&self, key: &StorageKey) -> PathBuf {
        let n = self.inner.tmp_counter.fetch_add(1, Ordering::Relaxed);
        self.inner.root.join(format!("{key}{TMP_MARKER}{n}"))
    }

    async fn sync_root(&self) {
        let root = &self.inner.root;
        match fs::File::open(root).await {
            Ok(dir) => {
                if let Err(err) = dir.sync_all().await {
                    warn!(path = %root.display(), error = %err, "Directory sync failed");
                }
            },
            Err(err) => warn!(path = %root.display(), error = %err, "Directory open failed"),
        }
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &StorageKey) -> Result<Option<String>, StorageError> {
        self.read_value(key).await
    }

    async fn set(&self, key: &StorageKey, value: &str) -> Result<(), StorageError> {
        self.write_value(key, value).await
    }

    async fn remove(&self, key: &StorageKey) -> Result<(), StorageError> {
        self.remove_value(key).await
    }
}
