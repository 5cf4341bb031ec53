//! Scan pipeline
//!
//! Takes one captured frame through identification, narrating progress on
//! the event bus. The image is borrowed for the duration of the call and
//! never stored; session state owns its lifetime.

use std::sync::Arc;
use tracing::{info, warn};

use super::events::{Event, EventBus};
use crate::error::Result;
use crate::identify::Identifier;
use crate::types::{CapturedImage, IdentificationResult};

#[derive(Clone)]
pub struct ScanService {
    identifier: Arc<dyn Identifier>,
    event_bus: EventBus,
}

/// Outcome of one scan.
#[derive(Debug, Clone)]
pub struct ScanResponse {
    pub scan_id: String,
    pub result: IdentificationResult,
}

impl ScanService {
    pub fn new(identifier: Arc<dyn Identifier>, event_bus: EventBus) -> Self {
        Self {
            identifier,
            event_bus,
        }
    }

    /// Identify `image`, emitting started/completed/failed events.
    ///
    /// # Errors
    ///
    /// Returns the identifier's failure after emitting
    /// [`Event::IdentificationFailed`].
    pub async fn scan(&self, image: &CapturedImage) -> Result<ScanResponse> {
        let scan_id = uuid::Uuid::new_v4().to_string();

        self.event_bus.emit(Event::ScanStarted {
            scan_id: scan_id.clone(),
        });

        match self.identifier.identify(image).await {
            Ok(result) => {
                info!(scan_id = %scan_id, label = %result.label, "identification completed");
                self.event_bus.emit(Event::IdentificationCompleted {
                    scan_id: scan_id.clone(),
                    label: result.label.clone(),
                });
                Ok(ScanResponse { scan_id, result })
            }
            Err(e) => {
                warn!(scan_id = %scan_id, error = %e, "identification failed");
                self.event_bus.emit(Event::IdentificationFailed {
                    scan_id,
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identify::MockIdentifier;
    use crate::types::CapturedImage;

    fn frame() -> CapturedImage {
        CapturedImage::from_jpeg_bytes(&[0xFF, 0xD8])
    }

    #[tokio::test]
    async fn test_scan_emits_started_then_completed() {
        let bus = EventBus::new(10);
        let mut rx = bus.subscribe();
        let service = ScanService::new(Arc::new(MockIdentifier::success("100 rupees")), bus);

        let response = service.scan(&frame()).await.unwrap();
        assert_eq!(response.result.label, "100 rupees");

        let started = rx.recv().await.unwrap();
        assert!(matches!(started, Event::ScanStarted { .. }));

        match rx.recv().await.unwrap() {
            Event::IdentificationCompleted { scan_id, label } => {
                assert_eq!(scan_id, response.scan_id);
                assert_eq!(label, "100 rupees");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_scan_failure_emits_failed_event() {
        let bus = EventBus::new(10);
        let mut rx = bus.subscribe();
        let service = ScanService::new(Arc::new(MockIdentifier::failure("blurry frame")), bus);

        assert!(service.scan(&frame()).await.is_err());

        let _started = rx.recv().await.unwrap();
        match rx.recv().await.unwrap() {
            Event::IdentificationFailed { error, .. } => {
                assert!(error.contains("blurry frame"));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
