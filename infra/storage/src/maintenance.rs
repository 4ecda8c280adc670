use std::path::Path;
use std::time::{Duration, SystemTime};
use tokio::fs;
use tracing::{info, warn};

/// Marker embedded in temp file names by [`crate::FileStore`] writes.
pub(crate) const TMP_MARKER: &str = ".lecterntmp.";

const STALE_AFTER: Duration = Duration::from_secs(300);

/// Removes temp files left behind by interrupted writes.
///
/// Failures are logged and skipped; a leftover temp file never blocks startup.
pub(crate) async fn purge_tmp(root: &Path) {
    let now = SystemTime::now();
    let mut removed = 0usize;
    let mut failed = 0usize;

    let mut entries = match fs::read_dir(root).await {
        Ok(entries) => entries,
        Err(err) => {
            warn!(path = %root.display(), error = %err, "Temp purge skipped");
            return;
        },
    };

    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        let is_tmp =
            path.file_name().and_then(|n| n.to_str()).is_some_and(|n| n.contains(TMP_MARKER));
        if !is_tmp {
            continue;
        }

        let stale = match entry.metadata().await {
            Ok(meta) if meta.is_file() => meta
                .modified()
                .ok()
                .and_then(|modified| now.duration_since(modified).ok())
                .is_none_or(|age| age > STALE_AFTER),
            _ => false,
        };
        if !stale {
            continue;
        }

        match fs::remove_file(&path).await {
            Ok(()) => removed += 1,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Failed to remove stale temp file");
                failed += 1;
            },
        }
    }

    if removed > 0 || failed > 0 {
        info!(removed, failed, "Cleaned up temporary files");
    }
}
