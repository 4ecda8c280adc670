//! Change notifications published by the session and progress stores.

use crate::tier::Tier;

/// The session tier was set by a login or cleared by a logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierChanged {
    pub tier: Option<Tier>,
}

/// A lesson's completion flag flipped, or progress was cleared (`lesson_id` is `None`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressChanged {
    pub lesson_id: Option<String>,
    pub completed: bool,
    pub completed_count: usize,
}
