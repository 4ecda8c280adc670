use std::borrow::Cow;

/// A specialized [`SessionError`] enum of this crate.
///
/// A wrong secret is not an error; see [`crate::SessionStore::login`].
#[lectern_derive::lectern_error]
pub enum SessionError {
    #[error("Session storage failure{}: {source}", format_context(.context))]
    Storage { source: lectern_storage::StorageError, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal session error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
