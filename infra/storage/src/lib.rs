//! Client-local key-value persistence.
//!
//! Lectern keeps exactly two pieces of mutable state (the session tier and the progress
//! set) and stores each as one string value under a well-known key. This crate provides
//! the storage seam those stores are written against.
//!
//! # Backends
//!
//! - **[`FileStore`]**: one file per key inside a sandboxed data directory. Writes use an
//!   atomic swap (unique temp file, `fsync`, `rename`) so a crash never leaves a torn
//!   value, and stale temp files are purged when the store is opened.
//! - **[`MemoryStore`]**: a process-local map, used for ephemeral sessions and tests.
//!
//! # Example
//!
//! ```rust
//! use lectern_storage::{FileStore, KeyValueStore, StorageError, StorageKey};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), StorageError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     # let root = tmp.path().join("state");
//!     let store = FileStore::builder().root(&root).create(true).connect().await?;
//!     let key = StorageKey::try_from("userPlan")?;
//!
//!     store.set(&key, "gold").await?;
//!     assert_eq!(store.get(&key).await?.as_deref(), Some("gold"));
//!
//!     store.remove(&key).await?;
//!     assert_eq!(store.get(&key).await?, None);
//!     Ok(())
//! }
//! ```

mod builder;
mod engine;
mod error;
mod key;
mod maintenance;
mod memory;
mod security;

pub use builder::FileStoreBuilder;
pub use engine::FileStore;
pub use error::{StorageError, StorageErrorExt};
pub use key::StorageKey;
pub use memory::MemoryStore;

use std::future::Future;

/// String-valued key-value storage with whole-value reads and writes.
///
/// Semantics mirror browser local storage: a missing key reads as `None`, `set` replaces
/// the previous value entirely, and removing a missing key is not an error.
pub trait KeyValueStore: Clone + Send + Sync + 'static {
    /// Reads the value stored under `key`.
    fn get(
        &self,
        key: &StorageKey,
    ) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Durably replaces the value stored under `key`.
    fn set(
        &self,
        key: &StorageKey,
        value: &str,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Deletes `key` if present.
    fn remove(&self, key: &StorageKey) -> impl Future<Output = Result<(), StorageError>> + Send;
}
