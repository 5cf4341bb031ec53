//! Banknote identification
//!
//! No recognition backend exists yet, so the shipped identifier is an
//! honest stand-in: it waits a fixed delay, discards the frame, and picks a
//! denomination uniformly at random. Keeping it behind the [`Identifier`]
//! trait means a real classification service slots in later without
//! touching the scan pipeline.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

use crate::error::{IdentifyError, Result};
use crate::types::{CapturedImage, IdentificationResult};

/// Classifies a captured frame into a denomination label.
#[async_trait]
pub trait Identifier: Send + Sync {
    async fn identify(&self, image: &CapturedImage) -> Result<IdentificationResult>;

    fn name(&self) -> &str;
}

/// Indian banknote denominations in circulation.
const DENOMINATIONS: [&str; 7] = [
    "10 rupees",
    "20 rupees",
    "50 rupees",
    "100 rupees",
    "200 rupees",
    "500 rupees",
    "2000 rupees",
];

/// Default simulated processing time.
const DEFAULT_DELAY: Duration = Duration::from_secs(2);

/// The fixed-delay, uniformly-random placeholder identifier.
pub struct StubIdentifier {
    delay: Duration,
    denominations: Vec<String>,
}

impl StubIdentifier {
    pub fn new() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            denominations: DENOMINATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new()
        }
    }
}

impl Default for StubIdentifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Identifier for StubIdentifier {
    async fn identify(&self, image: &CapturedImage) -> Result<IdentificationResult> {
        if image.is_empty() {
            return Err(IdentifyError::Failed("empty frame".to_string()).into());
        }

        // Stand-in for model inference; the frame content is not inspected.
        sleep(self.delay).await;

        let label = self
            .denominations
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| "500 rupees".to_string());

        debug!(label = %label, "stub identification produced");
        Ok(IdentificationResult::new(label))
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Scripted identifier for tests.
pub struct MockIdentifier {
    result: std::result::Result<String, String>,
    delay: Duration,
    calls: Arc<Mutex<usize>>,
}

impl MockIdentifier {
    /// Always identifies as `label`.
    pub fn success(label: &str) -> Self {
        Self {
            result: Ok(label.to_string()),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Always fails with `error`.
    pub fn failure(error: &str) -> Self {
        Self {
            result: Err(error.to_string()),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    pub fn calls_handle(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl Identifier for MockIdentifier {
    async fn identify(&self, _image: &CapturedImage) -> Result<IdentificationResult> {
        *self.calls.lock().unwrap() += 1;

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match &self.result {
            Ok(label) => Ok(IdentificationResult::new(label.clone())),
            Err(error) => Err(IdentifyError::Failed(error.clone()).into()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> CapturedImage {
        CapturedImage::from_jpeg_bytes(&[0xFF, 0xD8, 0xFF, 0xE0])
    }

    #[tokio::test]
    async fn test_stub_returns_known_denomination() {
        let identifier = StubIdentifier::with_delay(Duration::ZERO);
        let result = identifier.identify(&frame()).await.unwrap();

        assert!(DENOMINATIONS.contains(&result.label.as_str()));
    }

    #[tokio::test]
    async fn test_stub_waits_for_its_delay() {
        let identifier = StubIdentifier::with_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        identifier.identify(&frame()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_stub_rejects_empty_frame() {
        let identifier = StubIdentifier::with_delay(Duration::ZERO);
        let empty = CapturedImage {
            data: String::new(),
            mime: "image/jpeg".to_string(),
        };

        assert!(identifier.identify(&empty).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_scripted_result() {
        let identifier = MockIdentifier::success("500 rupees");

        let result = identifier.identify(&frame()).await.unwrap();
        assert_eq!(result.label, "500 rupees");
        assert_eq!(identifier.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_scripted_failure() {
        let identifier = MockIdentifier::failure("no note in frame");

        let err = identifier.identify(&frame()).await.unwrap_err();
        assert!(err.to_string().contains("no note in frame"));
    }
}
