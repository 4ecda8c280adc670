//! # Event Bus
//!
//! Typed, in-process pub-sub used by the session and progress stores to tell interested
//! views that persisted state changed, without the stores knowing who listens.
//!
//! Events are identified by their Rust type. Each type gets a `tokio` broadcast channel,
//! registered lazily in an `FxHashMap` behind a `parking_lot::RwLock`.
//!
//! # Example
//!
//! ```rust
//! use lectern_events::{EventBus, EventBusError, EventReceiverExt};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct TierChanged(Option<&'static str>);
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!     let mut rx = bus.subscribe::<TierChanged>()?;
//!     bus.publish(TierChanged(Some("gold")))?;
//!
//!     let event = rx.recv_event().await;
//!     assert_eq!(event.as_deref(), Some(&TierChanged(Some("gold"))));
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod receiver;

pub use bus::{DEFAULT_CAPACITY, Event, EventBus};
pub use error::{EventBusError, EventBusErrorExt};
pub use receiver::EventReceiverExt;
