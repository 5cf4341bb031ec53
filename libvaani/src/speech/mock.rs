//! Mock speech engine for tests
//!
//! Records every utterance, stop, and selected voice so tests can assert on
//! announcement behavior without any audio hardware. Available in all
//! builds to support integration tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use super::{SpeechEngine, Utterance, Voice};
use crate::error::{DeviceError, Result};

pub struct MockSpeech {
    voices: Vec<Voice>,
    fail_with: Option<String>,
    delay: Duration,
    spoken: Arc<Mutex<Vec<Utterance>>>,
    stops: Arc<Mutex<usize>>,
    last_voice: Arc<Mutex<Option<String>>>,
}

impl MockSpeech {
    pub fn new() -> Self {
        Self {
            voices: Vec::new(),
            fail_with: None,
            delay: Duration::ZERO,
            spoken: Arc::new(Mutex::new(Vec::new())),
            stops: Arc::new(Mutex::new(0)),
            last_voice: Arc::new(Mutex::new(None)),
        }
    }

    /// A mock that advertises the given voices.
    pub fn with_voices(voices: Vec<Voice>) -> Self {
        Self {
            voices,
            ..Self::new()
        }
    }

    /// A mock whose `speak` always fails.
    pub fn failing(error: &str) -> Self {
        Self {
            fail_with: Some(error.to_string()),
            ..Self::new()
        }
    }

    /// A mock that simulates synthesis latency.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new()
        }
    }

    /// Shared handle to the recorded utterances.
    pub fn spoken_handle(&self) -> Arc<Mutex<Vec<Utterance>>> {
        Arc::clone(&self.spoken)
    }

    /// Shared handle to the stop-call counter.
    pub fn stop_handle(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.stops)
    }

    /// Shared handle to the most recently selected voice id.
    pub fn voice_handle(&self) -> Arc<Mutex<Option<String>>> {
        Arc::clone(&self.last_voice)
    }

    pub fn spoken(&self) -> Vec<Utterance> {
        self.spoken.lock().unwrap().clone()
    }

    pub fn stop_count(&self) -> usize {
        *self.stops.lock().unwrap()
    }
}

impl Default for MockSpeech {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechEngine for MockSpeech {
    async fn speak(&self, utterance: &Utterance, voice: Option<&Voice>) -> Result<()> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        if let Some(error) = &self.fail_with {
            return Err(DeviceError::Synthesis(error.clone()).into());
        }

        *self.last_voice.lock().unwrap() = voice.map(|v| v.id.clone());
        self.spoken.lock().unwrap().push(utterance.clone());
        Ok(())
    }

    async fn stop(&self) {
        *self.stops.lock().unwrap() += 1;
    }

    async fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_utterances() {
        let mock = MockSpeech::new();

        mock.speak(&Utterance::new("one"), None).await.unwrap();
        mock.speak(&Utterance::new("two"), None).await.unwrap();

        let spoken = mock.spoken();
        assert_eq!(spoken.len(), 2);
        assert_eq!(spoken[0].text, "one");
        assert_eq!(spoken[1].text, "two");
    }

    #[tokio::test]
    async fn test_mock_counts_stops() {
        let mock = MockSpeech::new();
        mock.stop().await;
        mock.stop().await;
        assert_eq!(mock.stop_count(), 2);
    }

    #[tokio::test]
    async fn test_failing_mock_returns_error() {
        let mock = MockSpeech::failing("boom");
        let result = mock.speak(&Utterance::new("hello"), None).await;
        assert!(result.is_err());
        assert!(mock.spoken().is_empty());
    }
}
