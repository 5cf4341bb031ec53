//! View router
//!
//! Pure mapping from `{status, mode}` to the screen that renders. The mode
//! axis only simplifies the idle screen; every other status shows its
//! normal screen regardless of mode, so the transition graph is identical
//! on a wearable.

use libvaani::types::{AppMode, AppStatus};

/// Screen identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Full home screen with scan/settings controls
    Home,

    /// Reduced high-contrast home: one giant scan control
    HomeWearable,

    Camera,

    Processing,

    Result,

    Error,

    Settings,

    Accessibility,
}

/// Resolve which screen renders for the given status and mode.
pub fn screen_for(status: AppStatus, mode: AppMode) -> Screen {
    match (status, mode) {
        (AppStatus::Idle, AppMode::Wearable) => Screen::HomeWearable,
        (AppStatus::Idle, AppMode::Mobile) => Screen::Home,
        (AppStatus::Camera, _) => Screen::Camera,
        (AppStatus::Processing, _) => Screen::Processing,
        (AppStatus::Result, _) => Screen::Result,
        (AppStatus::Error, _) => Screen::Error,
        (AppStatus::Settings, _) => Screen::Settings,
        (AppStatus::Accessibility, _) => Screen::Accessibility,
    }
}
