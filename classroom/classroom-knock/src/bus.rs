//! Fan-out of impact events.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};

use crate::detector::ImpactEvent;

/// Broadcasts impact events to every live subscriber.
///
/// Cloning the bus yields another handle to the same subscriber list.
/// Delivery is fire-and-forget over unbounded channels; subscribers whose
/// receiver has been dropped are pruned on the next publish.
///
/// # Example
///
/// ```
/// use classroom_knock::{ImpactBus, ImpactEvent};
///
/// let bus = ImpactBus::new();
/// let ui = bus.subscribe();
/// let logger = bus.subscribe();
///
/// assert_eq!(bus.publish(ImpactEvent), 2);
/// assert_eq!(ui.try_recv(), Ok(ImpactEvent));
/// assert_eq!(logger.try_recv(), Ok(ImpactEvent));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImpactBus {
    subscribers: Arc<Mutex<Vec<Sender<ImpactEvent>>>>,
}

impl ImpactBus {
    /// Creates a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber.
    ///
    /// Only events published after this call are delivered.
    #[must_use]
    pub fn subscribe(&self) -> Receiver<ImpactEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// Sends `event` to every subscriber, returning how many received it.
    pub fn publish(&self, event: ImpactEvent) -> usize {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|tx| tx.send(event).is_ok());
        subscribers.len()
    }

    /// Number of subscribers still registered.
    ///
    /// Dropped receivers are only noticed on the next publish.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
