/// Storage key holding the persisted tier string.
pub const USER_PLAN_KEY: &str = "userPlan";

/// Storage key holding `{"completedLessons": [...]}`.
pub const PROGRESS_KEY: &str = "course-progress";

/// Shown when a login secret matches no tier.
pub const INCORRECT_SECRET_MESSAGE: &str = "incorrect password, try again";
