//! # Runtime
//!
//! Standardized [Tokio](https://tokio.rs) runtime construction for Lectern binaries.
//!
//! Lectern front-ends run on a single-threaded, cooperative runtime with I/O and timers
//! enabled. All store mutations and tickers of a front-end share one event thread, so
//! nothing needs cross-thread coordination.
//!
//! ## Example
//!
//! ```rust,ignore
//! #[lectern_runtime::main(interactive)]
//! async fn main() -> anyhow::Result<()> {
//!     Ok(())
//! }
//! ```

pub use anyhow::Result;
pub use lectern_derive::main;

use anyhow::anyhow;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

/// Builds the interactive (current-thread) runtime.
///
/// # Errors
///
/// Returns an [`anyhow::Error`] if the OS refuses to create the runtime drivers.
pub fn build_runtime() -> Result<Runtime> {
    debug!("Building interactive tokio runtime");

    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| anyhow!("Failed to initialize runtime: {e}"))
}
