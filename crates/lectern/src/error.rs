use std::borrow::Cow;

/// Errors surfaced by the assembled [`crate::Lectern`] handle.
#[lectern_derive::lectern_error]
pub enum LecternError {
    #[error("Catalog error{}: {source}", format_context(.context))]
    Catalog { source: lectern_kernel::CatalogError, context: Option<Cow<'static, str>> },

    #[error("Storage error{}: {source}", format_context(.context))]
    Storage { source: lectern_storage::StorageError, context: Option<Cow<'static, str>> },

    #[error("Session error{}: {source}", format_context(.context))]
    Session { source: lectern_session::SessionError, context: Option<Cow<'static, str>> },

    #[error("Progress error{}: {source}", format_context(.context))]
    Progress { source: lectern_progress::ProgressError, context: Option<Cow<'static, str>> },

    #[error("Release error{}: {source}", format_context(.context))]
    Release { source: lectern_release::ReleaseError, context: Option<Cow<'static, str>> },

    #[error("Player error{}: {source}", format_context(.context))]
    Player { source: lectern_player::PlayerError, context: Option<Cow<'static, str>> },

    #[error("Unknown lesson{}: {message}", format_context(.context))]
    UnknownLesson { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The current tier does not unlock the lesson.
    #[error("Lesson locked{}: {message}", format_context(.context))]
    Locked { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The lesson's release time has not passed yet.
    #[error("Lesson not released yet{}: {message}", format_context(.context))]
    Pending { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Lesson has no video{}: {message}", format_context(.context))]
    NoMedia { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
