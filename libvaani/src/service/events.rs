//! Event system for scan progress and connectivity changes
//!
//! An in-process bus distributing events to any number of subscribers
//! without blocking the emitter. Built on `tokio::sync::broadcast`: with no
//! subscribers an emit is dropped immediately, and a lagging subscriber
//! loses oldest events rather than stalling the pipeline.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Event receiver type alias
pub type EventReceiver = broadcast::Receiver<Event>;

/// Event bus for distributing progress events
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new event bus.
    ///
    /// `capacity` bounds how many events buffer per subscriber before a
    /// laggard starts losing the oldest ones.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to all events emitted after this call.
    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Emit an event to all subscribers. Never blocks or fails.
    pub fn emit(&self, event: Event) {
        // send() errs when nobody listens, which is fine
        let _ = self.sender.send(event);
    }

    /// Number of active subscribers (diagnostics only).
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Events emitted by the scan pipeline and the connectivity probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A capture has been handed to the identifier
    ScanStarted {
        scan_id: String,
    },

    /// Identification produced a denomination
    IdentificationCompleted {
        scan_id: String,
        label: String,
    },

    /// Identification failed
    IdentificationFailed {
        scan_id: String,
        error: String,
    },

    /// Reachability flipped
    ConnectivityChanged {
        online: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emission_and_subscription() {
        let bus = EventBus::new(10);
        let mut receiver = bus.subscribe();

        bus.emit(Event::ScanStarted {
            scan_id: "scan-1".to_string(),
        });

        match receiver.recv().await.unwrap() {
            Event::ScanStarted { scan_id } => assert_eq!(scan_id, "scan-1"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_multiple_subscribers_both_receive() {
        let bus = EventBus::new(10);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.emit(Event::ConnectivityChanged { online: false });

        assert!(matches!(
            rx1.recv().await.unwrap(),
            Event::ConnectivityChanged { online: false }
        ));
        assert!(matches!(
            rx2.recv().await.unwrap(),
            Event::ConnectivityChanged { online: false }
        ));
    }

    #[tokio::test]
    async fn test_emit_without_subscribers_does_not_block() {
        let bus = EventBus::new(10);
        bus.emit(Event::IdentificationFailed {
            scan_id: "scan-2".to_string(),
            error: "test".to_string(),
        });
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_event_serialization() {
        let event = Event::IdentificationCompleted {
            scan_id: "scan-3".to_string(),
            label: "500 rupees".to_string(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("identification_completed"));
        assert!(json.contains("500 rupees"));

        let back: Event = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, Event::IdentificationCompleted { .. }));
    }
}
