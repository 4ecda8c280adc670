//! # Domain Models
//!
//! Pure domain types with minimal dependencies (`serde`, `chrono`).
//! Keep it lean: no I/O or heavy logic, just data and simple helpers.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod events;
pub mod progress;
pub mod release;
pub mod tier;

pub use catalog::{ActionButton, ButtonVariant, Catalog, Lesson, Module};
pub use progress::{ProgressRecord, ProgressSummary};
pub use tier::Tier;
