//! Actions and effects for the reducer
//!
//! Actions describe what happened; effects describe what the service layer
//! should now do. Keeping the two separate is what makes every status
//! transition testable without devices: the reducer turns an action into
//! `(new state, effects)` and never touches a device itself.

use crossterm::event::KeyEvent;

use libvaani::haptics::HapticPattern;
use libvaani::i18n::Phrase;
use libvaani::types::{AppLanguage, AppMode, CapturedImage, Preferences};

/// Everything that can change application state.
#[derive(Debug, Clone)]
pub enum Action {
    // === UI events ===
    /// Keyboard input
    Key(KeyEvent),

    /// Periodic tick (animations, queued work)
    Tick,

    /// Terminal resize
    Resize(u16, u16),

    /// Quit the application
    Quit,

    // === Navigation ===
    /// Begin a scan: enter the camera screen
    StartCamera,

    /// Universal reset back to the home screen
    GoHome,

    /// Open the settings screen (from home)
    OpenSettings,

    /// Open the accessibility screen (from home)
    OpenAccessibility,

    // === Capture flow ===
    /// Camera device acquired
    CameraOpened,

    /// Camera device could not be acquired (e.g. permission denied)
    CameraOpenFailed { message: String },

    /// User asked for a frame
    CaptureRequested,

    /// A frame was captured
    CaptureSucceeded { image: CapturedImage },

    /// Frame capture failed
    CaptureFailed { message: String },

    /// Re-request camera access after a denial
    RetryCapture,

    // === Identification flow ===
    IdentificationSucceeded { label: String },

    IdentificationFailed { error: String },

    // === Preferences ===
    SetMode(AppMode),

    SetLanguage(AppLanguage),

    ToggleDarkMode,

    // === Connectivity ===
    /// Probe finished with a changed answer
    ConnectivityChanged { online: bool },

    /// User asked for a fresh probe
    RefreshOnlineStatus,

    // === Result screen ===
    /// Speak the current result again
    SpeakResult,

    /// Silence any in-flight speech
    StopSpeech,

    // === Accessibility screen ===
    /// Move the slider cursor
    SelectNextSetting,

    SelectPrevSetting,

    /// Nudge the selected slider by a signed step
    AdjustSelected(i8),

    /// Speak a sample with the current tuning
    TestVoice,

    /// Buzz a sample with the current intensity
    TestHaptic,
}

/// Side-effect commands returned by the reducer, executed by the main loop
/// through the service layer.
#[derive(Debug, Clone)]
pub enum Effect {
    /// Acquire the camera device
    OpenCamera,

    /// Grab one frame from the open camera
    CaptureFrame,

    /// Release the camera device
    ReleaseCamera,

    /// Hand a frame to the identifier
    BeginIdentification(CapturedImage),

    /// Speak a localized phrase
    AnnouncePhrase(Phrase),

    /// Speak the result announcement and fire the success buzz
    AnnounceResult(String),

    /// Cancel in-flight speech
    StopSpeech,

    /// Play a vibration pattern
    Haptic(HapticPattern),

    /// Probe reachability
    ProbeConnectivity,

    /// Persist the preference record
    PersistPreferences(Preferences),
}
