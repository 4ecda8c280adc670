use std::borrow::Cow;

/// Errors that can occur during event bus operations.
#[lectern_derive::lectern_error]
pub enum EventBusError {
    /// A registered sender could not be downcast to the requested event type.
    #[error("Type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
