//! Application state
//!
//! The single source of truth for the session. All transitions happen
//! through the reducer (see `reducer.rs`); rendering reads this record and
//! nothing else.

use libvaani::service::AnnounceTuning;
use libvaani::types::{AppLanguage, AppMode, AppStatus, CapturedImage, Preferences};

/// Root application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Should the application quit?
    pub should_quit: bool,

    /// UI variant (full mobile layout vs reduced wearable layout)
    pub mode: AppMode,

    /// Announcement language
    pub language: AppLanguage,

    /// Dark theme?
    pub dark_mode: bool,

    /// Which screen family is active
    pub status: AppStatus,

    /// Identified denomination, present only on the result screen
    pub result: Option<String>,

    /// Message for the generic error screen
    pub error: Option<String>,

    /// Inline camera-acquisition error (status stays `camera`)
    pub camera_error: Option<String>,

    /// The captured frame, held from capture until the next reset
    pub image: Option<CapturedImage>,

    /// Last probed reachability; drives the offline banner
    pub online: bool,

    /// Accessibility tuning sliders
    pub accessibility: AccessibilityState,

    /// UI configuration
    pub config: UiConfig,
}

/// Accessibility screen state: three 0-100 sliders and a cursor.
#[derive(Debug, Clone)]
pub struct AccessibilityState {
    pub voice_volume: u8,
    pub voice_speed: u8,
    pub vibration_intensity: u8,
    pub selected: AccessibilitySetting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessibilitySetting {
    VoiceVolume,
    VoiceSpeed,
    VibrationIntensity,
}

impl AccessibilitySetting {
    pub fn next(self) -> Self {
        match self {
            Self::VoiceVolume => Self::VoiceSpeed,
            Self::VoiceSpeed => Self::VibrationIntensity,
            Self::VibrationIntensity => Self::VoiceVolume,
        }
    }

    pub fn prev(self) -> Self {
        self.next().next()
    }
}

impl Default for AccessibilityState {
    fn default() -> Self {
        Self {
            voice_volume: 80,
            voice_speed: 50,
            vibration_intensity: 70,
            selected: AccessibilitySetting::VoiceVolume,
        }
    }
}

impl AccessibilityState {
    /// Map the sliders onto announcement tuning.
    ///
    /// Speed 50 is the neutral rate; the range spans half to one-and-a-half
    /// times normal.
    pub fn tuning(&self) -> AnnounceTuning {
        AnnounceTuning {
            rate: 0.5 + self.voice_speed as f32 / 100.0,
            volume: self.voice_volume as f32 / 100.0,
            haptic_intensity: self.vibration_intensity,
        }
    }
}

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Use unicode symbols (false = ASCII fallback)
    pub unicode_enabled: bool,

    /// Tick rate in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        let unicode_enabled = std::env::var("VAANI_TUI_ASCII").is_err();

        let tick_rate_ms = std::env::var("VAANI_TUI_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        Self {
            unicode_enabled,
            tick_rate_ms,
        }
    }
}

impl AppState {
    /// Fresh session state on top of stored preferences.
    pub fn from_preferences(prefs: Preferences) -> Self {
        Self {
            should_quit: false,
            mode: prefs.mode,
            language: prefs.language,
            dark_mode: prefs.dark_mode,
            status: AppStatus::Idle,
            result: None,
            error: None,
            camera_error: None,
            image: None,
            online: true,
            accessibility: AccessibilityState::default(),
            config: UiConfig::default(),
        }
    }

    pub fn new() -> Self {
        Self::from_preferences(Preferences::default())
    }

    /// The durable slice of this state.
    pub fn preferences(&self) -> Preferences {
        Preferences {
            mode: self.mode,
            language: self.language,
            dark_mode: self.dark_mode,
        }
    }

    /// Announcement tuning derived from the accessibility sliders.
    pub fn tuning(&self) -> AnnounceTuning {
        self.accessibility.tuning()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
