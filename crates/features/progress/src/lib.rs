//! Progress slice: which lessons the viewer has marked complete.
//!
//! The set is persisted as one JSON document under [`PROGRESS_KEY`] and rewritten in full
//! after every mutation. Membership is all that matters; the stored array keeps completion
//! order only so the document is stable across writes.

mod error;
mod percentage;

pub use crate::error::{ProgressError, ProgressErrorExt};
pub use crate::percentage::{completion_percentage, summarize};

use lectern_domain::constants::PROGRESS_KEY;
use lectern_domain::events::ProgressChanged;
use lectern_domain::{Module, ProgressRecord, ProgressSummary};
use lectern_events::EventBus;
use lectern_kernel::Course;
use lectern_storage::{KeyValueStore, StorageKey};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug)]
struct ProgressInner<S> {
    storage: S,
    key: StorageKey,
    bus: EventBus,
    completed: RwLock<Vec<String>>,
    /// Serializes mutate-then-persist so writes land in mutation order.
    write_gate: Mutex<()>,
}

/// Persisted set of completed lesson ids. Cheap to clone; clones share state.
#[derive(Debug)]
pub struct ProgressStore<S> {
    inner: Arc<ProgressInner<S>>,
}

impl<S> Clone for ProgressStore<S> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<S: KeyValueStore> ProgressStore<S> {
    /// Opens the store and restores the last written set.
    ///
    /// Duplicate ids in the stored document collapse. A document that is not valid JSON of
    /// the expected shape is logged and treated as empty progress; it is replaced on the
    /// next mutation.
    ///
    /// # Errors
    /// Returns [`ProgressError::Storage`] if the storage cannot be read.
    pub async fn open(storage: S, bus: EventBus) -> Result<Self, ProgressError> {
        let key = StorageKey::try_from(PROGRESS_KEY)?;
        let stored = storage.get(&key).await.context("Failed to restore progress")?;

        let completed = match stored {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<ProgressRecord>(&raw) {
                Ok(record) => dedup(record.completed_lessons),
                Err(err) => {
                    warn!(error = %err, "Ignoring malformed progress document");
                    Vec::new()
                },
            },
        };

        debug!(completed = completed.len(), "Progress restored");
        Ok(Self {
            inner: Arc::new(ProgressInner {
                storage,
                key,
                bus,
                completed: RwLock::new(completed),
                write_gate: Mutex::new(()),
            }),
        })
    }

    /// Flips the completion flag of `lesson_id` and persists the whole set.
    ///
    /// Returns the new flag. Two toggles of the same id restore the original set.
    ///
    /// # Errors
    /// Returns [`ProgressError`] if the set cannot be written; the in-memory set is rolled
    /// back so it keeps matching storage.
    pub async fn toggle(&self, lesson_id: &str) -> Result<bool, ProgressError> {
        let _gate = self.inner.write_gate.lock().await;

        let (completed, snapshot) = {
            let mut set = self.inner.completed.write();
            let completed = if let Some(index) = set.iter().position(|id| id == lesson_id) {
                set.remove(index);
                false
            } else {
                set.push(lesson_id.to_owned());
                true
            };
            (completed, set.clone())
        };

        if let Err(err) = self.persist(&snapshot).await {
            let mut set = self.inner.completed.write();
            if completed {
                set.retain(|id| id != lesson_id);
            } else {
                set.push(lesson_id.to_owned());
            }
            return Err(err);
        }

        debug!(lesson = lesson_id, completed, total = snapshot.len(), "Progress toggled");
        self.announce(Some(lesson_id.to_owned()), completed, snapshot.len());
        Ok(completed)
    }

    /// Forgets every completed lesson.
    ///
    /// # Errors
    /// Returns [`ProgressError::Storage`] if the stored document cannot be removed.
    pub async fn clear(&self) -> Result<(), ProgressError> {
        let _gate = self.inner.write_gate.lock().await;

        self.inner.storage.remove(&self.inner.key).await.context("Failed to clear progress")?;
        let cleared = std::mem::take(&mut *self.inner.completed.write());

        info!(cleared = cleared.len(), "Progress cleared");
        self.announce(None, false, 0);
        Ok(())
    }

    #[must_use]
    pub fn is_completed(&self, lesson_id: &str) -> bool {
        self.inner.completed.read().iter().any(|id| id == lesson_id)
    }

    /// Completed ids in completion order.
    #[must_use]
    pub fn completed(&self) -> Vec<String> {
        self.inner.completed.read().clone()
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.inner.completed.read().len()
    }

    /// Share of `module`'s lessons that are completed.
    #[must_use]
    pub fn module_progress(&self, module: &Module) -> ProgressSummary {
        let set = self.inner.completed.read();
        let done = module.lessons.iter().filter(|lesson| set.contains(&lesson.id)).count();
        summarize(module.lessons.len(), done)
    }

    /// Share of all catalog lessons that are completed. Stored ids the catalog does not
    /// know are not counted.
    #[must_use]
    pub fn course_progress(&self, course: &Course) -> ProgressSummary {
        let set = self.inner.completed.read();
        let done = set.iter().filter(|id| course.contains_lesson(id)).count();
        summarize(course.total_lessons(), done)
    }

    async fn persist(&self, completed: &[String]) -> Result<(), ProgressError> {
        let record = ProgressRecord { completed_lessons: completed.to_vec() };
        let document = serde_json::to_string(&record).context("Failed to encode progress")?;
        self.inner
            .storage
            .set(&self.inner.key, &document)
            .await
            .context("Failed to persist progress")?;
        Ok(())
    }

    fn announce(&self, lesson_id: Option<String>, completed: bool, completed_count: usize) {
        let event = ProgressChanged { lesson_id, completed, completed_count };
        if let Err(err) = self.inner.bus.publish(event) {
            warn!(error = %err, "Failed to publish progress change");
        }
    }
}

fn dedup(ids: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}
