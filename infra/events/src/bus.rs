use crate::error::EventBusError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::trace;

/// Buffer per event type. State-change notifications are small and infrequent.
pub const DEFAULT_CAPACITY: usize = 64;

/// Marker trait for types that can be sent across the [`EventBus`].
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

type Sender<T> = broadcast::Sender<Arc<T>>;

/// A cloneable, thread-safe event bus with one broadcast channel per event type.
///
/// Each subscriber sees every event published after it subscribed. Publishing to a type
/// with no subscribers is not an error; the event is dropped.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    channels: Arc<RwLock<FxHashMap<TypeId, Box<dyn Any + Send + Sync>>>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to events of type `T`.
    ///
    /// # Errors
    /// Returns [`EventBusError::TypeMismatch`] if the registry holds a foreign sender for `T`.
    pub fn subscribe<T: Event>(&self) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        Ok(self.sender::<T>()?.subscribe())
    }

    /// Publishes `event` to every current subscriber, returning how many received it.
    ///
    /// # Errors
    /// Returns [`EventBusError::TypeMismatch`] if the registry holds a foreign sender for `T`.
    pub fn publish<T: Event>(&self, event: T) -> Result<usize, EventBusError> {
        let count = self.sender::<T>()?.send(Arc::new(event)).unwrap_or(0);
        trace!(event = std::any::type_name::<T>(), count, "Event dispatched");
        Ok(count)
    }

    fn sender<T: Event>(&self) -> Result<Sender<T>, EventBusError> {
        let id = TypeId::of::<T>();
        if let Some(sender) = self.channels.read().get(&id) {
            return downcast::<T>(sender.as_ref());
        }

        let mut channels = self.channels.write();
        let sender = channels.entry(id).or_insert_with(|| {
            trace!(event = std::any::type_name::<T>(), "Initializing channel");
            let (tx, _) = broadcast::channel::<Arc<T>>(DEFAULT_CAPACITY);
            Box::new(tx)
        });
        downcast::<T>(sender.as_ref())
    }
}

fn downcast<T: Event>(sender: &(dyn Any + Send + Sync)) -> Result<Sender<T>, EventBusError> {
    sender.downcast_ref::<Sender<T>>().cloned().ok_or_else(|| EventBusError::TypeMismatch {
        message: std::any::type_name::<T>().into(),
        context: Some("Unexpected event type".into()),
    })
}
