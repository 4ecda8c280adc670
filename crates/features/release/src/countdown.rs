use chrono::{DateTime, Utc};
use lectern_domain::Lesson;
use std::fmt;
use std::time::Duration;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Remaining time broken into whole units, each floored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeLeft {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    remaining: Duration,
}

impl TimeLeft {
    #[must_use]
    pub fn from_duration(remaining: Duration) -> Self {
        let secs = remaining.as_secs();
        let unit = |value: u64| u8::try_from(value).unwrap_or(u8::MAX);
        Self {
            days: secs / SECS_PER_DAY,
            hours: unit(secs % SECS_PER_DAY / SECS_PER_HOUR),
            minutes: unit(secs % SECS_PER_HOUR / SECS_PER_MINUTE),
            seconds: unit(secs % SECS_PER_MINUTE),
            remaining,
        }
    }

    /// The exact remaining time, including the sub-second part the units drop.
    #[must_use]
    pub const fn remaining(&self) -> Duration {
        self.remaining
    }
}

impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}d {:02}h {:02}m {:02}s", self.days, self.hours, self.minutes, self.seconds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Counting(TimeLeft),
    Released,
}

impl CountdownState {
    #[must_use]
    pub const fn is_released(&self) -> bool {
        matches!(self, Self::Released)
    }
}

/// Counts down to a release instant. Once released it stays released, whatever later
/// clock readings say.
#[derive(Debug, Clone)]
pub struct Countdown {
    release: DateTime<Utc>,
    state: CountdownState,
}

impl Countdown {
    /// Creates a countdown already evaluated at `now`.
    #[must_use]
    pub fn new(release: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self { release, state: evaluate(release, now) }
    }

    /// A countdown for `lesson`, if it has a release timestamp.
    #[must_use]
    pub fn for_lesson(lesson: &Lesson, now: DateTime<Utc>) -> Option<Self> {
        lesson.release_date.map(|release| Self::new(release, now))
    }

    /// Re-evaluates at `now` and returns the new state.
    pub fn tick(&mut self, now: DateTime<Utc>) -> CountdownState {
        if !self.state.is_released() {
            self.state = evaluate(self.release, now);
        }
        self.state
    }

    #[must_use]
    pub const fn state(&self) -> CountdownState {
        self.state
    }

    #[must_use]
    pub const fn release(&self) -> DateTime<Utc> {
        self.release
    }

    #[must_use]
    pub const fn is_released(&self) -> bool {
        self.state.is_released()
    }
}

fn evaluate(release: DateTime<Utc>, now: DateTime<Utc>) -> CountdownState {
    match (release - now).to_std() {
        Ok(remaining) if !remaining.is_zero() => {
            CountdownState::Counting(TimeLeft::from_duration(remaining))
        },
        _ => CountdownState::Released,
    }
}
