//! Service layer for Vaani
//!
//! A facade coordinating the leaf components (preference store, speech
//! announcer, haptic signaler, connectivity probe, identifier) behind one
//! entry point, so front ends (TUI, CLI) share identical behavior.
//!
//! Side-effect contract: announcement and haptic calls are best-effort and
//! never surface failures; callers fire them and move on. Anything that can
//! take real time (identification, the reachability probe) narrates itself
//! on the event bus instead of blocking callers on state.

pub mod events;
pub mod scan;

pub use events::{Event, EventBus, EventReceiver};
pub use scan::{ScanResponse, ScanService};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::config::Config;
use crate::connectivity::ConnectivityProbe;
use crate::error::Result;
use crate::haptics::{HapticDevice, HapticPattern, SysfsHaptics};
use crate::i18n::{self, Phrase};
use crate::identify::{Identifier, StubIdentifier};
use crate::speech::{Announcer, Utterance};
use crate::store::PrefStore;
use crate::types::{AppLanguage, CapturedImage, Preferences};

/// Per-session delivery adjustments from the accessibility screen.
///
/// Multipliers stack on top of the configured speech defaults; intensity
/// scales haptic patterns (0-100).
#[derive(Debug, Clone, Copy)]
pub struct AnnounceTuning {
    pub rate: f32,
    pub volume: f32,
    pub haptic_intensity: u8,
}

impl Default for AnnounceTuning {
    fn default() -> Self {
        Self {
            rate: 1.0,
            volume: 1.0,
            haptic_intensity: 100,
        }
    }
}

/// Main service facade.
pub struct VaaniService {
    config: Arc<Config>,
    store: PrefStore,
    announcer: Arc<Announcer>,
    haptics: Arc<dyn HapticDevice>,
    probe: Arc<ConnectivityProbe>,
    scanner: ScanService,
    event_bus: EventBus,
    online: AtomicBool,
}

impl VaaniService {
    /// Create the service with detected devices and the stub identifier.
    pub async fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::with_config(config).await
    }

    /// Create the service from an explicit configuration.
    pub async fn with_config(config: Config) -> Result<Self> {
        let store = PrefStore::open(&config.storage.path).await?;
        let announcer = Announcer::detect(&config.speech);
        let haptics: Arc<dyn HapticDevice> = Arc::new(SysfsHaptics::detect(&config.haptics));
        let probe = ConnectivityProbe::new(&config.connectivity);
        let identifier: Arc<dyn Identifier> = Arc::new(StubIdentifier::new());

        Ok(Self::assemble(
            config, store, announcer, haptics, probe, identifier,
        ))
    }

    /// Assemble the service from parts (dependency injection for tests).
    pub fn assemble(
        config: Config,
        store: PrefStore,
        announcer: Announcer,
        haptics: Arc<dyn HapticDevice>,
        probe: ConnectivityProbe,
        identifier: Arc<dyn Identifier>,
    ) -> Self {
        let event_bus = EventBus::new(100);
        let scanner = ScanService::new(identifier, event_bus.clone());

        Self {
            config: Arc::new(config),
            store,
            announcer: Arc::new(announcer),
            haptics,
            probe: Arc::new(probe),
            scanner,
            event_bus,
            online: AtomicBool::new(true),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Subscribe to scan and connectivity events.
    pub fn subscribe(&self) -> EventReceiver {
        self.event_bus.subscribe()
    }

    // ------------------------------------------------------------------
    // Preferences
    // ------------------------------------------------------------------

    /// Load stored preferences, falling back to configured defaults.
    pub async fn load_preferences(&self) -> Preferences {
        let defaults = Preferences {
            mode: self.config.defaults.mode,
            language: self.config.defaults.language,
            dark_mode: false,
        };
        self.store.load_preferences(defaults).await
    }

    /// Persist the full preference record (best-effort).
    pub async fn save_preferences(&self, prefs: &Preferences) {
        self.store.save_preferences(prefs).await;
    }

    // ------------------------------------------------------------------
    // Scanning
    // ------------------------------------------------------------------

    /// Run one frame through identification.
    pub async fn scan(&self, image: &CapturedImage) -> Result<ScanResponse> {
        self.scanner.scan(image).await
    }

    // ------------------------------------------------------------------
    // Announcements
    // ------------------------------------------------------------------

    /// Speak the identification result and confirm with a success buzz.
    ///
    /// Composes the locale-specific prefix with `label`. Fire-and-forget:
    /// failures degrade to logged no-ops.
    pub async fn announce_result(
        &self,
        label: &str,
        language: AppLanguage,
        tuning: AnnounceTuning,
    ) {
        let text = i18n::result_announcement(label, language);
        self.speak_text(text, language, tuning).await;
        self.haptics
            .trigger(&HapticPattern::success().scaled(tuning.haptic_intensity));
    }

    /// Speak one of the operational phrases (no haptic).
    pub async fn announce_phrase(
        &self,
        phrase: Phrase,
        language: AppLanguage,
        tuning: AnnounceTuning,
    ) {
        let text = i18n::phrase(phrase, language).to_string();
        self.speak_text(text, language, tuning).await;
    }

    /// Speak arbitrary text in the given language.
    pub async fn speak_text(&self, text: String, language: AppLanguage, tuning: AnnounceTuning) {
        let speech = &self.config.speech;
        let utterance = Utterance::new(text)
            .with_language(language)
            .with_tuning(
                speech.rate * tuning.rate,
                speech.pitch,
                speech.volume * tuning.volume,
            );
        self.announcer.speak(utterance).await;
    }

    /// Cancel any in-flight speech.
    pub async fn stop_speech(&self) {
        self.announcer.stop().await;
    }

    pub fn speech_available(&self) -> bool {
        self.announcer.is_available()
    }

    // ------------------------------------------------------------------
    // Haptics
    // ------------------------------------------------------------------

    /// Play a pattern; returns whether the hardware executed it.
    pub fn trigger_haptic(&self, pattern: &HapticPattern) -> bool {
        self.haptics.trigger(pattern)
    }

    pub fn haptics_supported(&self) -> bool {
        self.haptics.is_supported()
    }

    // ------------------------------------------------------------------
    // Connectivity
    // ------------------------------------------------------------------

    /// Probe reachability, emitting [`Event::ConnectivityChanged`] when the
    /// answer differs from the last one.
    pub async fn refresh_online_status(&self) -> bool {
        let online = self.probe.check_online_status().await;
        let previous = self.online.swap(online, Ordering::SeqCst);

        if previous != online {
            debug!(online, "connectivity changed");
            self.event_bus.emit(Event::ConnectivityChanged { online });
        }
        online
    }

    /// Last probed answer without a new round-trip.
    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}
