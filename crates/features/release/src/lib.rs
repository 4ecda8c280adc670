//! Release slice: countdowns for lessons scheduled in the future.
//!
//! [`Countdown`] is a two-state machine, `Counting` then `Released`, driven by whatever
//! clock readings it is given. [`CountdownTicker`] drives one on a fixed period in the
//! background and publishes each state over a `watch` channel.
//!
//! Reaching `Released` is a notice only. It does not change what the lesson shows; the
//! access check reads the clock on its own.

mod countdown;
mod error;
mod ticker;

pub use crate::countdown::{Countdown, CountdownState, TimeLeft};
pub use crate::error::{ReleaseError, ReleaseErrorExt};
pub use crate::ticker::CountdownTicker;
