//! Speech output
//!
//! The [`Announcer`] is the only path through which the application speaks.
//! It wraps an optional [`SpeechEngine`] (detected at startup) and enforces
//! the one rule every caller relies on: at most one utterance is audible at
//! a time. A new `speak` cancels whatever is in flight; there is no queue.
//!
//! A machine without any synthesizer still runs fine - the announcer
//! degrades to a logged no-op, mirroring how every other output device in
//! this crate behaves when absent.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::SpeechConfig;
use crate::error::Result;
use crate::types::AppLanguage;

pub mod command;
pub mod mock;

pub use command::CommandSpeech;
pub use mock::MockSpeech;

/// One discrete unit of speech with its own delivery parameters.
///
/// Rate, pitch and volume are neutral-1.0 multipliers.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    /// Preferred voice locale; `None` keeps the engine default
    pub language: Option<AppLanguage>,
}

impl Utterance {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
            language: None,
        }
    }

    pub fn with_language(mut self, language: AppLanguage) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_tuning(mut self, rate: f32, pitch: f32, volume: f32) -> Self {
        self.rate = rate;
        self.pitch = pitch;
        self.volume = volume;
        self
    }
}

/// An installable synthesis voice as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    /// Engine-specific identifier passed back when speaking
    pub id: String,
    /// BCP-47-ish locale tag, e.g. "en-GB", "hi"
    pub locale: String,
}

/// A text-to-speech backend.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Start speaking `utterance`, optionally with an explicit voice.
    ///
    /// Implementations return without waiting for playback to finish.
    async fn speak(&self, utterance: &Utterance, voice: Option<&Voice>) -> Result<()>;

    /// Cancel any in-flight utterance. Safe to call when idle.
    async fn stop(&self);

    /// List the voices this engine can synthesize with.
    async fn voices(&self) -> Vec<Voice>;

    fn name(&self) -> &str;
}

/// Speech front door: last-write-wins announcements over an optional engine.
pub struct Announcer {
    engine: Option<Box<dyn SpeechEngine>>,
}

impl Announcer {
    /// Build an announcer from configuration, probing for a synthesizer.
    ///
    /// Returns a working announcer either way; absence of an engine is a
    /// degradation, not an error.
    pub fn detect(config: &SpeechConfig) -> Self {
        if !config.enabled {
            debug!("speech disabled by configuration");
            return Self { engine: None };
        }

        match CommandSpeech::detect(config.synthesizer.as_deref()) {
            Some(engine) => {
                debug!(engine = engine.name(), "speech synthesizer detected");
                Self {
                    engine: Some(Box::new(engine)),
                }
            }
            None => {
                warn!("no speech synthesizer found; announcements will be silent");
                Self { engine: None }
            }
        }
    }

    /// Wrap an explicit engine (used by tests and the service facade).
    pub fn with_engine(engine: Box<dyn SpeechEngine>) -> Self {
        Self {
            engine: Some(engine),
        }
    }

    /// An announcer that never speaks.
    pub fn disabled() -> Self {
        Self { engine: None }
    }

    pub fn is_available(&self) -> bool {
        self.engine.is_some()
    }

    /// Speak `utterance`, cancelling any utterance already in flight.
    ///
    /// Empty text is a no-op. Engine failures are logged and swallowed;
    /// this never returns an error to the caller.
    pub async fn speak(&self, utterance: Utterance) {
        let Some(engine) = &self.engine else {
            debug!("speak ignored: no synthesizer");
            return;
        };

        if utterance.text.trim().is_empty() {
            debug!("speak ignored: empty text");
            return;
        }

        // Last write wins: silence the previous utterance first.
        engine.stop().await;

        let (voice, utterance) = match utterance.language {
            Some(language) => {
                let voices = engine.voices().await;
                match pick_voice(&voices, language) {
                    Some(voice) => (Some(voice), utterance),
                    // No matching voice: keep the default voice and nudge
                    // delivery instead of failing.
                    None => (None, approximate_for_missing_voice(utterance)),
                }
            }
            None => (None, utterance),
        };

        if let Err(e) = engine.speak(&utterance, voice.as_ref()).await {
            warn!(error = %e, "speech synthesis failed");
        }
    }

    /// Cancel any in-flight utterance.
    pub async fn stop(&self) {
        if let Some(engine) = &self.engine {
            engine.stop().await;
        }
    }
}

/// Choose a voice whose locale matches the requested language prefix.
fn pick_voice(voices: &[Voice], language: AppLanguage) -> Option<Voice> {
    let prefix = language.locale_code();
    voices
        .iter()
        .find(|v| v.locale.starts_with(prefix))
        .cloned()
}

/// Delivery tweak applied when the requested locale has no voice: slightly
/// slower and higher, which renders unfamiliar words more intelligibly on
/// the fallback voice.
fn approximate_for_missing_voice(mut utterance: Utterance) -> Utterance {
    utterance.rate *= 0.9;
    utterance.pitch *= 1.1;
    utterance
}
