//! Player slice: everything needed to point an external video player at a lesson.
//!
//! Playback itself is out of process; this crate only builds URLs for the hosted embed
//! page, parses lesson durations and rotates short random previews for the course intro.

mod duration;
mod error;
mod preview;
mod urls;

pub use crate::duration::parse_duration;
pub use crate::error::{PlayerError, PlayerErrorExt};
pub use crate::preview::{Preview, PreviewRotation, PreviewTicker};
pub use crate::urls::EmbedUrls;
