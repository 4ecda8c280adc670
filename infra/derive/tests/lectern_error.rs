use lectern_derive::lectern_error;
use std::borrow::Cow;

#[lectern_error]
pub enum ProbeError {
    #[error("IO failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Bad key{}: {message}", format_context(.context))]
    BadKey { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal probe error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn failing_io() -> Result<(), std::io::Error> {
    Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))
}

#[test]
fn lectern_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/lectern_error_pass.rs");
}

#[test]
fn question_mark_converts_source_errors() {
    fn run() -> Result<(), ProbeError> {
        failing_io()?;
        Ok(())
    }

    let err = run().expect_err("io error should propagate");
    assert!(matches!(err, ProbeError::Io { context: None, .. }));
}

#[test]
fn context_is_attached_to_foreign_results() {
    let err = failing_io().context("reading userPlan").expect_err("should fail");
    assert_eq!(err.to_string(), "IO failure (reading userPlan): gone");
}

#[test]
fn context_is_attached_to_own_results() {
    let res: Result<(), ProbeError> =
        Err(ProbeError::BadKey { message: "../escape".into(), context: None });
    let err = res.context("validating key").expect_err("should fail");
    assert_eq!(err.to_string(), "Bad key (validating key): ../escape");
}

#[test]
fn strings_fall_back_to_internal() {
    let err = ProbeError::from(format!("unexpected {}", 42));
    assert_eq!(err.to_string(), "Internal probe error: unexpected 42");
}
