use std::borrow::Cow;

/// A specialized [`ProgressError`] enum of this crate.
#[lectern_derive::lectern_error]
pub enum ProgressError {
    #[error("Progress storage failure{}: {source}", format_context(.context))]
    Storage { source: lectern_storage::StorageError, context: Option<Cow<'static, str>> },

    #[error("Progress encoding failure{}: {source}", format_context(.context))]
    Encoding { source: serde_json::Error, context: Option<Cow<'static, str>> },
}
