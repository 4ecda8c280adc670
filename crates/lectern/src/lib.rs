//! Facade crate for Lectern slices and shared modules.
//! Re-exports domain/kernel primitives and wires the stores from configuration.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! Load a [`LecternConfig`](domain::config::LecternConfig), then call [`Lectern::init`]
//! inside a tokio runtime and use the handle for every query and mutation.

mod error;
mod store;

pub use crate::error::{LecternError, LecternErrorExt};
pub use crate::store::StateStore;
pub use lectern_domain as domain;
pub use lectern_events as events;
pub use lectern_kernel as kernel;

/// Feature slices.
pub mod features {
    pub use lectern_access as access;
    pub use lectern_player as player;
    pub use lectern_progress as progress;
    pub use lectern_release as release;
    pub use lectern_session as session;
}

use chrono::{DateTime, Utc};
use lectern_access::{AccessState, LessonAccess};
use lectern_domain::config::LecternConfig;
use lectern_domain::{ActionButton, Lesson, Module, ProgressSummary, Tier};
use lectern_events::EventBus;
use lectern_kernel::{Clock, Course};
use lectern_player::{EmbedUrls, PreviewRotation, PreviewTicker};
use lectern_progress::ProgressStore;
use lectern_release::{Countdown, CountdownState, CountdownTicker};
use lectern_session::{SecretTable, SessionStore};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::info;

/// A lesson as the current viewer sees it.
#[derive(Debug, Clone, Copy)]
pub struct LessonView<'a> {
    pub module: &'a Module,
    pub lesson: &'a Lesson,
    pub access: LessonAccess,
    pub completed: bool,
}

/// What the player area shows for a lesson.
///
/// Lesson material and action links are only reachable through [`LessonBody::Playable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonBody<'a> {
    Locked {
        required: Tier,
    },
    Pending {
        release: DateTime<Utc>,
        countdown: CountdownState,
    },
    Playable {
        /// `None` for lessons without a video.
        player_url: Option<String>,
        content: Option<&'a str>,
        contact: Option<&'a str>,
        buttons: &'a [ActionButton],
    },
}

/// A lesson page: header fields are always shown, the body depends on access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonPage<'a> {
    pub module: &'a Module,
    pub lesson: &'a Lesson,
    pub completed: bool,
    pub body: LessonBody<'a>,
}

/// The assembled application: catalog, stores, clock and player endpoints.
#[derive(Debug, Clone)]
pub struct Lectern {
    config: LecternConfig,
    course: Course,
    bus: EventBus,
    clock: Arc<dyn Clock>,
    session: SessionStore<StateStore>,
    progress: ProgressStore<StateStore>,
    urls: EmbedUrls,
}

impl Lectern {
    /// Loads the catalog and opens both stores.
    ///
    /// # Errors
    /// Returns [`LecternError`] if the catalog is missing or invalid, or storage cannot be
    /// opened or read.
    pub async fn init(config: &LecternConfig, clock: Arc<dyn Clock>) -> Result<Self, LecternError> {
        let course = Course::load(config.catalog.path.as_deref())?;
        let storage = StateStore::open(&config.storage).await.context("Opening state storage")?;
        let bus = EventBus::new();

        let session = SessionStore::open(
            storage.clone(),
            SecretTable::from_config(&config.session),
            bus.clone(),
        )
        .await?;
        let progress = ProgressStore::open(storage, bus.clone()).await?;

        info!(
            lessons = course.total_lessons(),
            tier = ?session.current_tier(),
            completed = progress.completed_count(),
            "Lectern initialized"
        );

        Ok(Self {
            config: config.clone(),
            course,
            bus,
            clock,
            session,
            progress,
            urls: EmbedUrls::from_config(&config.player),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &LecternConfig {
        &self.config
    }

    #[must_use]
    pub const fn course(&self) -> &Course {
        &self.course
    }

    /// Bus carrying `TierChanged` and `ProgressChanged` notifications.
    #[must_use]
    pub const fn events(&self) -> &EventBus {
        &self.bus
    }

    #[must_use]
    pub const fn session(&self) -> &SessionStore<StateStore> {
        &self.session
    }

    #[must_use]
    pub const fn progress(&self) -> &ProgressStore<StateStore> {
        &self.progress
    }

    #[must_use]
    pub const fn urls(&self) -> &EmbedUrls {
        &self.urls
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    #[must_use]
    pub fn tier(&self) -> Option<Tier> {
        self.session.current_tier()
    }

    #[must_use]
    pub fn access(&self, lesson: &Lesson) -> LessonAccess {
        LessonAccess::resolve(lesson, self.tier(), self.now())
    }

    #[must_use]
    pub fn lesson_view(&self, lesson_id: &str) -> Option<LessonView<'_>> {
        let module = self.course.module_of(lesson_id)?;
        let lesson = self.course.lesson(lesson_id)?;
        Some(LessonView {
            module,
            lesson,
            access: self.access(lesson),
            completed: self.progress.is_completed(lesson_id),
        })
    }

    /// The page for `lesson_id` as embedded at `page_href`.
    #[must_use]
    pub fn lesson_page(&self, lesson_id: &str, page_href: &str) -> Option<LessonPage<'_>> {
        let view = self.lesson_view(lesson_id)?;
        let lesson = view.lesson;
        let body = match view.access.state(lesson) {
            AccessState::Locked { required } => LessonBody::Locked { required },
            AccessState::Pending { release } => LessonBody::Pending {
                release,
                countdown: Countdown::new(release, self.now()).state(),
            },
            AccessState::Playable => LessonBody::Playable {
                player_url: lesson
                    .media_id
                    .as_deref()
                    .map(|media_id| self.urls.embed_url(media_id, page_href)),
                content: lesson.content.as_deref(),
                contact: lesson.contact.as_deref(),
                buttons: &lesson.buttons,
            },
        };
        Some(LessonPage { module: view.module, lesson, completed: view.completed, body })
    }

    /// Flips completion of a lesson the viewer can currently watch.
    ///
    /// Returns whether the lesson is now completed.
    ///
    /// # Errors
    /// Returns [`LecternError::UnknownLesson`], [`LecternError::Locked`],
    /// [`LecternError::Pending`] or [`LecternError::NoMedia`] without touching progress,
    /// or [`LecternError::Progress`] if the change cannot be persisted.
    pub async fn toggle_completion(&self, lesson_id: &str) -> Result<bool, LecternError> {
        let lesson = self.course.lesson(lesson_id).ok_or_else(|| LecternError::UnknownLesson {
            message: lesson_id.to_owned().into(),
            context: None,
        })?;

        match self.access(lesson).state(lesson) {
            AccessState::Playable => {},
            AccessState::Locked { required } => {
                return Err(LecternError::Locked {
                    message: format!("{lesson_id} requires the {} plan", required.display_name())
                        .into(),
                    context: None,
                });
            },
            AccessState::Pending { release } => {
                return Err(LecternError::Pending {
                    message: format!("{lesson_id} opens {release}").into(),
                    context: None,
                });
            },
        }
        if lesson.media_id.is_none() {
            return Err(LecternError::NoMedia { message: lesson_id.to_owned().into(), context: None });
        }

        Ok(self.progress.toggle(lesson_id).await?)
    }

    /// Every lesson of `module` in display order.
    #[must_use]
    pub fn module_view<'a>(&'a self, module: &'a Module) -> Vec<LessonView<'a>> {
        module
            .lessons
            .iter()
            .map(|lesson| LessonView {
                module,
                lesson,
                access: self.access(lesson),
                completed: self.progress.is_completed(&lesson.id),
            })
            .collect()
    }

    #[must_use]
    pub fn course_progress(&self) -> ProgressSummary {
        self.progress.course_progress(&self.course)
    }

    /// A countdown for `lesson_id` if it has a release timestamp.
    #[must_use]
    pub fn countdown(&self, lesson_id: &str) -> Option<Countdown> {
        Countdown::for_lesson(self.course.lesson(lesson_id)?, self.now())
    }

    /// Starts the once-per-tick countdown for `lesson_id`.
    ///
    /// # Errors
    /// Returns [`LecternError::Release`] if the ticker cannot be started.
    pub fn countdown_ticker(&self, lesson_id: &str) -> Result<Option<CountdownTicker>, LecternError> {
        let Some(countdown) = self.countdown(lesson_id) else {
            return Ok(None);
        };
        let ticker =
            CountdownTicker::spawn(countdown, Arc::clone(&self.clock), self.config.release.tick())?;
        Ok(Some(ticker))
    }

    /// A preview rotation over the catalog, seeded from the OS.
    #[must_use]
    pub fn preview_rotation(&self) -> PreviewRotation<StdRng> {
        let tail = u32::try_from(self.config.player.preview_tail_secs).unwrap_or(u32::MAX);
        PreviewRotation::new(&self.course, self.urls.clone(), tail, StdRng::from_entropy())
    }

    /// Starts the background preview rotation.
    ///
    /// # Errors
    /// Returns [`LecternError::Player`] if the ticker cannot be started.
    pub fn preview_ticker(&self) -> Result<PreviewTicker, LecternError> {
        Ok(PreviewTicker::spawn(self.preview_rotation(), self.config.player.preview_interval())?)
    }
}
