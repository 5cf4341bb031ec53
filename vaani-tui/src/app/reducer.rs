//! Pure reducer for state transitions
//!
//! `(State, Action) -> (State, Vec<Effect>)`. The reducer computes the new
//! state and names the side effects that should follow; it performs none of
//! them. No I/O, no device calls, deterministic.
//!
//! Status changes go through an explicit transition table. An action that
//! would cause an illegal jump (say, a stale identification result arriving
//! after the user already went home) is logged and dropped instead of
//! moving the machine.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use libvaani::haptics::HapticPattern;
use libvaani::i18n::Phrase;
use libvaani::types::{AppLanguage, AppMode, AppStatus};

use super::actions::{Action, Effect};
use super::state::{AccessibilitySetting, AppState};

/// Legal `(from, to)` status edges, excluding the universal `-> idle` reset
/// and self-loops (both always allowed).
const TRANSITIONS: &[(AppStatus, AppStatus)] = &[
    (AppStatus::Idle, AppStatus::Camera),
    (AppStatus::Result, AppStatus::Camera),
    (AppStatus::Error, AppStatus::Camera),
    (AppStatus::Camera, AppStatus::Processing),
    (AppStatus::Processing, AppStatus::Result),
    (AppStatus::Processing, AppStatus::Error),
    (AppStatus::Idle, AppStatus::Settings),
    (AppStatus::Idle, AppStatus::Accessibility),
];

/// Whether `from -> to` is a legal status change.
pub fn transition_allowed(from: AppStatus, to: AppStatus) -> bool {
    from == to || to == AppStatus::Idle || TRANSITIONS.contains(&(from, to))
}

/// Apply a status change if legal; log and refuse otherwise.
fn try_status(state: &mut AppState, to: AppStatus) -> bool {
    if !transition_allowed(state.status, to) {
        warn!(from = %state.status, to = %to, "rejected illegal status transition");
        return false;
    }
    state.status = to;
    true
}

/// Pure reducer function
pub fn reduce(state: AppState, action: Action) -> (AppState, Vec<Effect>) {
    let mut state = state;

    match action {
        // === UI events ===
        Action::Key(key) => handle_key(state, key),
        Action::Tick => (state, vec![]),
        Action::Resize(_, _) => (state, vec![]),

        Action::Quit => {
            state.should_quit = true;
            (state, vec![Effect::ReleaseCamera, Effect::StopSpeech])
        }

        // === Navigation ===
        Action::StartCamera => {
            if state.status == AppStatus::Camera {
                // Already there; don't reacquire the device
                return (state, vec![]);
            }
            if !try_status(&mut state, AppStatus::Camera) {
                return (state, vec![]);
            }
            state.result = None;
            state.error = None;
            state.camera_error = None;
            state.image = None;
            (
                state,
                vec![
                    Effect::OpenCamera,
                    Effect::AnnouncePhrase(Phrase::CameraReady),
                ],
            )
        }

        Action::GoHome => {
            // Universal reset: always legal, clears the whole session slice
            state.status = AppStatus::Idle;
            state.result = None;
            state.error = None;
            state.camera_error = None;
            state.image = None;
            (state, vec![Effect::ReleaseCamera, Effect::StopSpeech])
        }

        Action::OpenSettings => {
            try_status(&mut state, AppStatus::Settings);
            (state, vec![])
        }

        Action::OpenAccessibility => {
            try_status(&mut state, AppStatus::Accessibility);
            (state, vec![])
        }

        // === Capture flow ===
        Action::CameraOpened => {
            state.camera_error = None;
            (state, vec![])
        }

        Action::CameraOpenFailed { message } => {
            // Status stays `camera`; the screen shows the error inline with
            // a retry action
            state.camera_error = Some(message);
            (state, vec![])
        }

        Action::CaptureRequested => {
            if state.status == AppStatus::Camera && state.camera_error.is_none() {
                (state, vec![Effect::CaptureFrame])
            } else {
                (state, vec![])
            }
        }

        Action::CaptureSucceeded { image } => {
            if !try_status(&mut state, AppStatus::Processing) {
                return (state, vec![Effect::ReleaseCamera]);
            }
            state.image = Some(image.clone());
            state.camera_error = None;
            (
                state,
                vec![
                    Effect::ReleaseCamera,
                    Effect::AnnouncePhrase(Phrase::Processing),
                    Effect::BeginIdentification(image),
                ],
            )
        }

        Action::CaptureFailed { message } => {
            state.camera_error = Some(message);
            (state, vec![Effect::ReleaseCamera])
        }

        Action::RetryCapture => {
            if state.status != AppStatus::Camera {
                return (state, vec![]);
            }
            state.camera_error = None;
            (state, vec![Effect::OpenCamera])
        }

        // === Identification flow ===
        Action::IdentificationSucceeded { label } => {
            if !try_status(&mut state, AppStatus::Result) {
                // The user navigated away mid-identification; drop the
                // stale result silently
                return (state, vec![]);
            }
            state.result = Some(label.clone());
            (state, vec![Effect::AnnounceResult(label)])
        }

        Action::IdentificationFailed { error } => {
            if !try_status(&mut state, AppStatus::Error) {
                return (state, vec![]);
            }
            state.error = Some(error);
            let haptic = HapticPattern::error().scaled(state.accessibility.vibration_intensity);
            (
                state,
                vec![
                    Effect::AnnouncePhrase(Phrase::GenericError),
                    Effect::Haptic(haptic),
                ],
            )
        }

        // === Preferences ===
        Action::SetMode(mode) => {
            state.mode = mode;
            let prefs = state.preferences();
            (state, vec![Effect::PersistPreferences(prefs)])
        }

        Action::SetLanguage(language) => {
            state.language = language;
            let prefs = state.preferences();
            (state, vec![Effect::PersistPreferences(prefs)])
        }

        Action::ToggleDarkMode => {
            state.dark_mode = !state.dark_mode;
            let prefs = state.preferences();
            (state, vec![Effect::PersistPreferences(prefs)])
        }

        // === Connectivity ===
        Action::ConnectivityChanged { online } => {
            let was_online = state.online;
            state.online = online;

            let effects = if !online && was_online {
                vec![Effect::AnnouncePhrase(Phrase::Offline)]
            } else if online && !was_online && state.status != AppStatus::Idle {
                // Only worth interrupting the user mid-task
                vec![Effect::AnnouncePhrase(Phrase::BackOnline)]
            } else {
                vec![]
            };
            (state, effects)
        }

        Action::RefreshOnlineStatus => (state, vec![Effect::ProbeConnectivity]),

        // === Result screen ===
        Action::SpeakResult => match &state.result {
            Some(label) => {
                let label = label.clone();
                (state, vec![Effect::AnnounceResult(label)])
            }
            None => (state, vec![]),
        },

        Action::StopSpeech => (state, vec![Effect::StopSpeech]),

        // === Accessibility screen ===
        Action::SelectNextSetting => {
            state.accessibility.selected = state.accessibility.selected.next();
            (state, vec![])
        }

        Action::SelectPrevSetting => {
            state.accessibility.selected = state.accessibility.selected.prev();
            (state, vec![])
        }

        Action::AdjustSelected(delta) => {
            let slider = match state.accessibility.selected {
                AccessibilitySetting::VoiceVolume => &mut state.accessibility.voice_volume,
                AccessibilitySetting::VoiceSpeed => &mut state.accessibility.voice_speed,
                AccessibilitySetting::VibrationIntensity => {
                    &mut state.accessibility.vibration_intensity
                }
            };
            *slider = (*slider as i16 + delta as i16 * 10).clamp(0, 100) as u8;
            (state, vec![])
        }

        Action::TestVoice => (state, vec![Effect::AnnouncePhrase(Phrase::CameraReady)]),

        Action::TestHaptic => {
            let intensity = state.accessibility.vibration_intensity;
            (
                state,
                vec![Effect::Haptic(HapticPattern::alert().scaled(intensity))],
            )
        }
    }
}

/// Map keyboard input to high-level actions. This is where keybindings live.
fn handle_key(state: AppState, key: KeyEvent) -> (AppState, Vec<Effect>) {
    // Global keybindings
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) if state.status != AppStatus::Processing => {
            return reduce(state, Action::Quit);
        }
        (KeyCode::Esc, _) => {
            return reduce(state, Action::GoHome);
        }
        (KeyCode::Char('o'), KeyModifiers::NONE) => {
            return reduce(state, Action::RefreshOnlineStatus);
        }
        _ => {}
    }

    // Screen-specific keybindings
    match state.status {
        AppStatus::Idle => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => reduce(state, Action::StartCamera),
            KeyCode::Char('s') => reduce(state, Action::OpenSettings),
            KeyCode::Char('a') => reduce(state, Action::OpenAccessibility),
            _ => (state, vec![]),
        },

        AppStatus::Camera => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => reduce(state, Action::CaptureRequested),
            KeyCode::Char('r') if state.camera_error.is_some() => {
                reduce(state, Action::RetryCapture)
            }
            _ => (state, vec![]),
        },

        AppStatus::Result => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => reduce(state, Action::StartCamera),
            KeyCode::Char('r') => reduce(state, Action::SpeakResult),
            KeyCode::Char('m') => reduce(state, Action::StopSpeech),
            _ => (state, vec![]),
        },

        AppStatus::Error => match key.code {
            KeyCode::Char('r') | KeyCode::Enter => reduce(state, Action::StartCamera),
            _ => (state, vec![]),
        },

        AppStatus::Settings => match key.code {
            KeyCode::Char('m') => {
                let next = match state.mode {
                    AppMode::Mobile => AppMode::Wearable,
                    AppMode::Wearable => AppMode::Mobile,
                };
                reduce(state, Action::SetMode(next))
            }
            KeyCode::Char('l') => {
                let next = next_language(state.language);
                reduce(state, Action::SetLanguage(next))
            }
            KeyCode::Char('d') => reduce(state, Action::ToggleDarkMode),
            _ => (state, vec![]),
        },

        AppStatus::Accessibility => match key.code {
            KeyCode::Down => reduce(state, Action::SelectNextSetting),
            KeyCode::Up => reduce(state, Action::SelectPrevSetting),
            KeyCode::Right => reduce(state, Action::AdjustSelected(1)),
            KeyCode::Left => reduce(state, Action::AdjustSelected(-1)),
            KeyCode::Char('t') => reduce(state, Action::TestVoice),
            KeyCode::Char('b') => reduce(state, Action::TestHaptic),
            _ => (state, vec![]),
        },

        AppStatus::Processing => (state, vec![]),
    }
}

/// Cycle to the next announcement language.
fn next_language(current: AppLanguage) -> AppLanguage {
    let all = AppLanguage::ALL;
    let index = all.iter().position(|l| *l == current).unwrap_or(0);
    all[(index + 1) % all.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use libvaani::types::CapturedImage;

    fn frame() -> CapturedImage {
        CapturedImage::from_jpeg_bytes(&[0xFF, 0xD8])
    }

    #[test]
    fn test_reducer_is_pure() {
        let state = AppState::new();
        let state_clone = state.clone();

        let (new_state, _) = reduce(state_clone.clone(), Action::StartCamera);

        // Original state unchanged
        assert_eq!(state_clone.status, AppStatus::Idle);
        assert_eq!(new_state.status, AppStatus::Camera);
    }

    #[test]
    fn test_start_camera_clears_session_fields() {
        let mut state = AppState::new();
        state.status = AppStatus::Result;
        state.result = Some("500 rupees".to_string());
        state.image = Some(frame());

        let (state, effects) = reduce(state, Action::StartCamera);

        assert_eq!(state.status, AppStatus::Camera);
        assert!(state.result.is_none());
        assert!(state.image.is_none());
        assert!(matches!(effects[0], Effect::OpenCamera));
        assert!(matches!(
            effects[1],
            Effect::AnnouncePhrase(Phrase::CameraReady)
        ));
    }

    #[test]
    fn test_start_camera_is_idempotent() {
        let mut state = AppState::new();
        state.status = AppStatus::Camera;

        let (state, effects) = reduce(state, Action::StartCamera);
        assert_eq!(state.status, AppStatus::Camera);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_go_home_resets_to_initial_state() {
        let initial = AppState::new();

        let (state, _) = reduce(initial.clone(), Action::StartCamera);
        let (state, _) = reduce(state, Action::GoHome);

        assert_eq!(state.status, AppStatus::Idle);
        assert!(state.result.is_none());
        assert!(state.error.is_none());
        assert!(state.image.is_none());
        assert!(state.camera_error.is_none());
    }

    #[test]
    fn test_full_scan_flow() {
        let state = AppState::new();

        let (state, _) = reduce(state, Action::StartCamera);
        assert_eq!(state.status, AppStatus::Camera);

        let (state, effects) = reduce(
            state,
            Action::CaptureSucceeded { image: frame() },
        );
        assert_eq!(state.status, AppStatus::Processing);
        assert!(state.image.is_some());
        assert!(matches!(effects[0], Effect::ReleaseCamera));
        assert!(matches!(
            effects[1],
            Effect::AnnouncePhrase(Phrase::Processing)
        ));
        assert!(matches!(effects[2], Effect::BeginIdentification(_)));

        let (state, effects) = reduce(
            state,
            Action::IdentificationSucceeded {
                label: "500 rupees".to_string(),
            },
        );
        assert_eq!(state.status, AppStatus::Result);
        assert_eq!(state.result.as_deref(), Some("500 rupees"));
        assert_eq!(effects.len(), 1);
        match &effects[0] {
            Effect::AnnounceResult(label) => assert_eq!(label, "500 rupees"),
            other => panic!("unexpected effect: {:?}", other),
        }
    }

    #[test]
    fn test_identification_failure_enters_error_screen() {
        let mut state = AppState::new();
        state.status = AppStatus::Processing;

        let (state, effects) = reduce(
            state,
            Action::IdentificationFailed {
                error: "blurry frame".to_string(),
            },
        );

        assert_eq!(state.status, AppStatus::Error);
        assert_eq!(state.error.as_deref(), Some("blurry frame"));
        assert!(matches!(
            effects[0],
            Effect::AnnouncePhrase(Phrase::GenericError)
        ));
        assert!(matches!(effects[1], Effect::Haptic(_)));
    }

    #[test]
    fn test_stale_result_after_go_home_is_dropped() {
        let state = AppState::new();
        let (state, _) = reduce(state, Action::StartCamera);
        let (state, _) = reduce(state, Action::CaptureSucceeded { image: frame() });
        let (state, _) = reduce(state, Action::GoHome);

        // Identification finishes after the user already left
        let (state, effects) = reduce(
            state,
            Action::IdentificationSucceeded {
                label: "100 rupees".to_string(),
            },
        );

        assert_eq!(state.status, AppStatus::Idle);
        assert!(state.result.is_none());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_illegal_transition_is_rejected() {
        let state = AppState::new();

        // idle -> result is not an edge
        let (state, effects) = reduce(
            state,
            Action::IdentificationSucceeded {
                label: "50 rupees".to_string(),
            },
        );

        assert_eq!(state.status, AppStatus::Idle);
        assert!(state.result.is_none());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_camera_permission_denied_keeps_camera_status() {
        let state = AppState::new();
        let (state, _) = reduce(state, Action::StartCamera);

        let (state, _) = reduce(
            state,
            Action::CameraOpenFailed {
                message: "camera access denied".to_string(),
            },
        );
        assert_eq!(state.status, AppStatus::Camera);
        assert!(state.camera_error.is_some());

        // Retry re-requests the device without leaving the screen
        let (state, effects) = reduce(state, Action::RetryCapture);
        assert_eq!(state.status, AppStatus::Camera);
        assert!(state.camera_error.is_none());
        assert!(matches!(effects[0], Effect::OpenCamera));
    }

    #[test]
    fn test_capture_blocked_while_camera_errored() {
        let state = AppState::new();
        let (state, _) = reduce(state, Action::StartCamera);
        let (state, _) = reduce(
            state,
            Action::CameraOpenFailed {
                message: "denied".to_string(),
            },
        );

        let (_, effects) = reduce(state, Action::CaptureRequested);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_offline_announces_once_and_refresh_probes() {
        let state = AppState::new();
        assert!(state.online);

        let (state, effects) = reduce(state, Action::ConnectivityChanged { online: false });
        assert!(!state.online);
        assert!(matches!(
            effects[0],
            Effect::AnnouncePhrase(Phrase::Offline)
        ));

        let (state, effects) = reduce(state, Action::RefreshOnlineStatus);
        assert!(matches!(effects[0], Effect::ProbeConnectivity));

        // Coming back online while idle stays quiet
        let (state, effects) = reduce(state, Action::ConnectivityChanged { online: true });
        assert!(state.online);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_back_online_mid_task_is_announced() {
        let state = AppState::new();
        let (state, _) = reduce(state, Action::StartCamera);
        let (state, _) = reduce(state, Action::ConnectivityChanged { online: false });

        let (_, effects) = reduce(state, Action::ConnectivityChanged { online: true });
        assert!(matches!(
            effects[0],
            Effect::AnnouncePhrase(Phrase::BackOnline)
        ));
    }

    #[test]
    fn test_preference_changes_persist() {
        let state = AppState::new();

        let (state, effects) = reduce(state, Action::SetLanguage(AppLanguage::Tamil));
        assert_eq!(state.language, AppLanguage::Tamil);
        match &effects[0] {
            Effect::PersistPreferences(prefs) => {
                assert_eq!(prefs.language, AppLanguage::Tamil)
            }
            other => panic!("unexpected effect: {:?}", other),
        }

        let (state, effects) = reduce(state, Action::ToggleDarkMode);
        assert!(state.dark_mode);
        assert!(matches!(effects[0], Effect::PersistPreferences(_)));
    }

    #[test]
    fn test_accessibility_sliders_clamp() {
        let mut state = AppState::new();
        state.accessibility.selected = AccessibilitySetting::VoiceVolume;
        state.accessibility.voice_volume = 95;

        let (state, _) = reduce(state, Action::AdjustSelected(1));
        assert_eq!(state.accessibility.voice_volume, 100);

        let mut state = state;
        state.accessibility.voice_volume = 5;
        let (state, _) = reduce(state, Action::AdjustSelected(-1));
        assert_eq!(state.accessibility.voice_volume, 0);
    }

    #[test]
    fn test_quit_blocked_while_processing() {
        let mut state = AppState::new();
        state.status = AppStatus::Processing;

        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        let (state, _) = reduce(state, Action::Key(key));
        assert!(!state.should_quit);
    }

    #[test]
    fn test_transition_table_shape() {
        use AppStatus::*;

        // Spot-check the documented edges
        assert!(transition_allowed(Idle, Camera));
        assert!(transition_allowed(Camera, Processing));
        assert!(transition_allowed(Processing, Result));
        assert!(transition_allowed(Processing, Error));
        assert!(transition_allowed(Result, Camera));
        assert!(transition_allowed(Error, Camera));
        assert!(transition_allowed(Idle, Settings));
        assert!(transition_allowed(Settings, Idle));

        // Everything can reset
        for status in [Idle, Camera, Processing, Result, Error, Settings, Accessibility] {
            assert!(transition_allowed(status, Idle));
        }

        // And the jumps that used to be possible are not
        assert!(!transition_allowed(Idle, Result));
        assert!(!transition_allowed(Camera, Result));
        assert!(!transition_allowed(Settings, Camera));
        assert!(!transition_allowed(Result, Processing));
    }
}
