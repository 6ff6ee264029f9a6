//! Poll events for external collaborators.
//!
//! Subscribers get a bounded channel each; emission never blocks. A full
//! queue drops the event for that subscriber (and counts the drop) rather
//! than stalling vote acceptance.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, SyncSender, TrySendError};
use std::sync::Mutex;

use vox_types::{PollId, Username};

/// Events emitted by the node as polls change.
#[derive(Clone, Debug, PartialEq)]
pub enum PollEvent {
    /// A vote was accepted and its token minted.
    VoteAccepted {
        poll_id: PollId,
        voter: Username,
        option: String,
    },
    /// A poll was explicitly closed.
    PollClosed { poll_id: PollId },
}

/// Fan-out bus over bounded per-subscriber queues.
pub struct EventBus {
    subscribers: Mutex<Vec<SyncSender<PollEvent>>>,
    queue_depth: usize,
    dropped: AtomicU64,
}

impl EventBus {
    pub fn new(queue_depth: usize) -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            queue_depth,
            dropped: AtomicU64::new(0),
        }
    }

    /// Register a subscriber and return its receiving end.
    pub fn subscribe(&self) -> Receiver<PollEvent> {
        let (tx, rx) = std::sync::mpsc::sync_channel(self.queue_depth);
        self.subscribers
            .lock()
            .expect("event bus lock poisoned")
            .push(tx);
        rx
    }

    /// Deliver an event to every live subscriber without blocking.
    pub fn emit(&self, event: &PollEvent) {
        let mut subscribers = self.subscribers.lock().expect("event bus lock poisoned");
        subscribers.retain(|tx| match tx.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(?event, "subscriber queue full, dropping event");
                true
            }
            // Receiver gone — unsubscribe.
            Err(TrySendError::Disconnected(_)) => false,
        });
    }

    /// Number of events dropped because a subscriber queue was full.
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> PollEvent {
        PollEvent::PollClosed {
            poll_id: PollId::random(),
        }
    }

    #[test]
    fn emit_reaches_all_subscribers() {
        let bus = EventBus::new(4);
        let rx1 = bus.subscribe();
        let rx2 = bus.subscribe();

        let event = sample_event();
        bus.emit(&event);

        assert_eq!(rx1.try_recv().unwrap(), event);
        assert_eq!(rx2.try_recv().unwrap(), event);
    }

    #[test]
    fn emit_with_no_subscribers_is_a_noop() {
        let bus = EventBus::new(4);
        bus.emit(&sample_event());
        assert_eq!(bus.dropped_count(), 0);
    }

    #[test]
    fn full_queue_drops_instead_of_blocking() {
        let bus = EventBus::new(1);
        let rx = bus.subscribe();

        bus.emit(&sample_event());
        bus.emit(&sample_event()); // queue full, dropped

        assert_eq!(bus.dropped_count(), 1);
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn disconnected_subscriber_is_pruned() {
        let bus = EventBus::new(4);
        let rx = bus.subscribe();
        drop(rx);

        bus.emit(&sample_event());
        assert_eq!(bus.subscribers.lock().unwrap().len(), 0);
    }
}
