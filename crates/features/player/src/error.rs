use std::borrow::Cow;

/// A specialized [`PlayerError`] enum of this crate.
#[lectern_derive::lectern_error]
pub enum PlayerError {
    #[error("Lesson has no video{}: {message}", format_context(.context))]
    NoMedia { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("No async runtime{}: {source}", format_context(.context))]
    Runtime { source: tokio::runtime::TryCurrentError, context: Option<Cow<'static, str>> },

    #[error("Invalid preview interval{}: {message}", format_context(.context))]
    InvalidInterval { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
