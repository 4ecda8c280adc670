use std::borrow::Cow;

/// A specialized [`ReleaseError`] enum of this crate.
#[lectern_derive::lectern_error]
pub enum ReleaseError {
    #[error("No async runtime{}: {source}", format_context(.context))]
    Runtime { source: tokio::runtime::TryCurrentError, context: Option<Cow<'static, str>> },

    #[error("Invalid tick period{}: {message}", format_context(.context))]
    InvalidPeriod { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
