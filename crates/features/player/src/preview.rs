use crate::duration::parse_duration;
use crate::error::{PlayerError, PlayerErrorExt};
use crate::urls::EmbedUrls;
use lectern_kernel::Course;
use rand::Rng;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

/// One preview clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub lesson_id: String,
    pub media_id: String,
    pub start_secs: u32,
    pub url: String,
}

#[derive(Debug, Clone)]
struct Candidate {
    lesson_id: String,
    media_id: String,
    duration_secs: u32,
}

/// Picks a random lesson with a video and a random start offset inside it.
///
/// Offsets fall in `[0, duration - tail)`, so the clip never starts within the last `tail`
/// seconds; short or unparsable durations start at 0.
#[derive(Debug)]
pub struct PreviewRotation<R> {
    candidates: Vec<Candidate>,
    urls: EmbedUrls,
    tail_secs: u32,
    rng: R,
}

impl<R: Rng> PreviewRotation<R> {
    #[must_use]
    pub fn new(course: &Course, urls: EmbedUrls, tail_secs: u32, rng: R) -> Self {
        let candidates = course
            .lessons()
            .filter_map(|lesson| {
                let media_id = lesson.media_id.clone()?;
                Some(Candidate {
                    lesson_id: lesson.id.clone(),
                    media_id,
                    duration_secs: parse_duration(&lesson.duration).unwrap_or(0),
                })
            })
            .collect();
        Self { candidates, urls, tail_secs, rng }
    }

    /// Number of lessons previews are drawn from.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Draws the next preview, or `None` if no lesson has a video.
    pub fn next_preview(&mut self) -> Option<Preview> {
        if self.candidates.is_empty() {
            return None;
        }
        let pick = &self.candidates[self.rng.gen_range(0..self.candidates.len())];

        let max_start = pick.duration_secs.saturating_sub(self.tail_secs);
        let start_secs = if max_start == 0 { 0 } else { self.rng.gen_range(0..max_start) };

        Some(Preview {
            lesson_id: pick.lesson_id.clone(),
            media_id: pick.media_id.clone(),
            start_secs,
            url: self.urls.preview_url(&pick.media_id, start_secs),
        })
    }
}

/// Re-draws a preview on a fixed interval in the background.
///
/// The first preview is drawn immediately. Dropping the ticker stops the task.
#[derive(Debug)]
pub struct PreviewTicker {
    rx: watch::Receiver<Option<Preview>>,
    task: JoinHandle<()>,
}

impl PreviewTicker {
    /// # Errors
    /// Returns [`PlayerError::InvalidInterval`] for a zero interval, or
    /// [`PlayerError::Runtime`] when called outside a tokio runtime.
    pub fn spawn<R>(mut rotation: PreviewRotation<R>, every: Duration) -> Result<Self, PlayerError>
    where
        R: Rng + Send + 'static,
    {
        if every.is_zero() {
            return Err(PlayerError::InvalidInterval {
                message: "interval must be non-zero".into(),
                context: None,
            });
        }
        let runtime = tokio::runtime::Handle::try_current().context("Preview ticker")?;

        let (tx, rx) = watch::channel(rotation.next_preview());
        debug!(candidates = rotation.len(), ?every, "Preview rotation started");

        let task = runtime.spawn(async move {
            if rotation.is_empty() {
                return;
            }
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval.tick().await;

            loop {
                interval.tick().await;
                let preview = rotation.next_preview();
                trace!(lesson = preview.as_ref().map(|p| p.lesson_id.as_str()), "Preview rotated");
                tx.send_replace(preview);
            }
        });

        Ok(Self { rx, task })
    }

    #[must_use]
    pub fn current(&self) -> Option<Preview> {
        self.rx.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Preview>> {
        self.rx.clone()
    }
}

impl Drop for PreviewTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
