use crate::error::StorageError;
use crate::key::StorageKey;
use std::path::{Path, PathBuf};

/// Maps a key to its file inside the sandbox root.
///
/// Keys are already restricted to a single path segment, so only symlinks can point a
/// resolved file elsewhere; an existing entry is canonicalized and must stay under `root`.
pub(crate) fn resolve_key(root: &Path, key: &StorageKey) -> Result<PathBuf, StorageError> {
    let joined = root.join(key.as_str());

    match joined.canonicalize() {
        Ok(canonical) => validate_canonical(root, canonical),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(joined),
        Err(e) => Err(StorageError::Io {
            source: e,
            context: Some(format!("Failed to verify {}", joined.display()).into()),
        }),
    }
}

fn validate_canonical(root: &Path, canonical: PathBuf) -> Result<PathBuf, StorageError> {
    if canonical.starts_with(root) {
        Ok(canonical)
    } else {
        Err(StorageError::PathTraversalAttempt {
            message: canonical.display().to_string().into(),
            context: Some("Stored value is a symlink outside the sandbox".into()),
        })
    }
}
