use crate::engine::{FileStore, FileStoreInner};
use crate::error::{StorageError, StorageErrorExt};
use private::Sealed;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tokio::fs;
use tracing::info;

#[derive(Debug, Default)]
pub struct NoRoot;
#[derive(Debug)]
pub struct WithRoot(PathBuf);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoRoot {}
impl Sealed for WithRoot {}

#[allow(private_bounds)]
#[derive(Debug)]
pub struct FileStoreBuilder<S: Sealed = NoRoot> {
    state: S,
    create: bool,
}

impl Default for FileStoreBuilder<NoRoot> {
    fn default() -> Self {
        Self { state: NoRoot, create: true }
    }
}

#[allow(private_bounds)]
impl<S: Sealed> FileStoreBuilder<S> {
    #[must_use = "Sets whether the data directory should be created if it does not exist"]
    pub const fn create(mut self, enable: bool) -> Self {
        self.create = enable;
        self
    }

    fn transition<N: Sealed>(self, state: N) -> FileStoreBuilder<N> {
        FileStoreBuilder { state, create: self.create }
    }
}

impl FileStoreBuilder<NoRoot> {
    #[must_use = "Creates a new file store builder with default configuration"]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the data directory for the file store"]
    pub fn root(self, path: impl Into<PathBuf>) -> FileStoreBuilder<WithRoot> {
        self.transition(WithRoot(path.into()))
    }
}

impl FileStoreBuilder<WithRoot> {
    /// Opens the store.
    ///
    /// Creates the data directory when `create(true)` is set (the default), resolves it to a
    /// canonical path and purges temp files orphaned by interrupted writes. A failed purge
    /// is logged and does not prevent the store from opening.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory is missing and `create` is false, or the
    /// process lacks permission to create or resolve it.
    pub async fn connect(self) -> Result<FileStore, StorageError> {
        let root = &self.state.0;

        if self.create {
            fs::create_dir_all(root)
                .await
                .context(format!("Failed to bootstrap data directory: {}", root.display()))?;
        }

        let canonical = fs::canonicalize(root)
            .await
            .context(format!("Failed to resolve data directory: {}", root.display()))?;

        let metadata = fs::metadata(&canonical).await.context("Failed to inspect data directory")?;
        if !metadata.is_dir() {
            return Err(StorageError::Io {
                source: std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
                context: Some(canonical.display().to_string().into()),
            });
        }

        let store = FileStore {
            inner: Arc::new(FileStoreInner { root: canonical, tmp_counter: AtomicU64::new(1) }),
        };

        store.purge_tmp().await;
        info!(path = %store.root().display(), "File store opened");

        Ok(store)
    }
}
