//! Kernel utilities shared across slices: configuration loading, the clock seam and the
//! validated course catalog.
//!
//! ```rust
//! use lectern_kernel::course::Course;
//!
//! let course = Course::embedded().unwrap();
//! let first = course.first_lesson().unwrap();
//! assert!(course.previous(&first.id).is_none());
//! ```

pub mod clock;
pub mod config;
pub mod course;

pub use clock::{Clock, ManualClock, SystemClock};
pub use course::{CatalogError, Course, LessonPosition};
pub use lectern_domain as domain;
