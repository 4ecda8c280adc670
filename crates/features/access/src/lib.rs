//! Access slice: decides what the current tier may watch.
//!
//! Everything here is pure and recomputed on demand from the tier and an injected clock;
//! nothing is cached between calls.

use chrono::{DateTime, Utc};
use lectern_domain::{Lesson, Module, Tier};
use lectern_kernel::Clock;

/// Whether `user` meets `required`.
///
/// No requirement is always met. A requirement is never met without a tier.
#[must_use]
pub fn satisfies(user: Option<Tier>, required: Option<Tier>) -> bool {
    match (user, required) {
        (_, None) => true,
        (None, Some(_)) => false,
        (Some(user), Some(required)) => user.rank() >= required.rank(),
    }
}

/// Module-level gate. Modules are never gated: their `required_tier` is informational and
/// only lessons are checked.
#[must_use]
pub const fn module_accessible(_tier: Option<Tier>, _module: &Module) -> bool {
    true
}

/// Display state of one lesson for one tier at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonAccess {
    /// The tier does not meet the lesson's requirement.
    pub locked: bool,
    /// The release timestamp is still in the future.
    pub pending: bool,
    pub playable: bool,
}

impl LessonAccess {
    #[must_use]
    pub fn resolve(lesson: &Lesson, tier: Option<Tier>, now: DateTime<Utc>) -> Self {
        let locked = !satisfies(tier, lesson.required_tier);
        let pending = lesson.release_date.is_some_and(|release| release > now);
        Self { locked, pending, playable: !locked && !pending }
    }

    #[must_use]
    pub fn resolve_at(lesson: &Lesson, tier: Option<Tier>, clock: &impl Clock) -> Self {
        Self::resolve(lesson, tier, clock.now())
    }

    /// Collapses the flags into the one state a view shows. Locked wins over pending.
    #[must_use]
    pub fn state(self, lesson: &Lesson) -> AccessState {
        match (self.locked, self.pending, lesson.required_tier, lesson.release_date) {
            (true, _, Some(required), _) => AccessState::Locked { required },
            (false, true, _, Some(release)) => AccessState::Pending { release },
            _ => AccessState::Playable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessState {
    Playable,
    Locked { required: Tier },
    Pending { release: DateTime<Utc> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_requirement_is_always_met() {
        assert!(satisfies(None, None));
        for tier in Tier::ALL {
            assert!(satisfies(Some(tier), None));
        }
    }

    #[test]
    fn requirement_without_tier_is_never_met() {
        for tier in Tier::ALL {
            assert!(!satisfies(None, Some(tier)));
        }
    }

    #[test]
    fn equal_tiers_satisfy() {
        for tier in Tier::ALL {
            assert!(satisfies(Some(tier), Some(tier)));
        }
    }
}
