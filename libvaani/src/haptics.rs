//! Haptic feedback
//!
//! Vibration is strictly best-effort: [`HapticDevice::trigger`] reports
//! whether anything buzzed, and callers are expected to ignore the answer.
//! There is no queue; an overlapping trigger replaces whatever pattern the
//! hardware was playing.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use crate::config::HapticsConfig;

/// Full-scale vibration duration for intensity 100.
const MAX_PULSE_MS: u64 = 200;

/// A vibration request: one pulse, or vibrate/pause segments in
/// alternation (starting with vibrate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HapticPattern {
    Duration(u64),
    Sequence(Vec<u64>),
}

impl HapticPattern {
    /// Single pulse scaled from a 0-100 intensity.
    pub fn from_intensity(intensity: u8) -> Self {
        let intensity = intensity.min(100) as u64;
        HapticPattern::Duration(intensity * MAX_PULSE_MS / 100)
    }

    /// Short-pause-long: the confirmation buzz after a successful scan.
    pub fn success() -> Self {
        HapticPattern::Sequence(vec![30, 30, 100])
    }

    /// Long-pause-long: something went wrong.
    pub fn error() -> Self {
        HapticPattern::Sequence(vec![100, 30, 100])
    }

    /// Three short pulses: attention without alarm.
    pub fn alert() -> Self {
        HapticPattern::Sequence(vec![30, 30, 30, 30, 30])
    }

    /// Scale every segment by a 0-100 intensity.
    pub fn scaled(&self, intensity: u8) -> Self {
        let factor = intensity.min(100) as u64;
        match self {
            HapticPattern::Duration(ms) => HapticPattern::Duration(ms * factor / 100),
            HapticPattern::Sequence(segments) => {
                HapticPattern::Sequence(segments.iter().map(|ms| ms * factor / 100).collect())
            }
        }
    }
}

/// A vibration backend.
pub trait HapticDevice: Send + Sync {
    /// Play `pattern`; returns whether the device executed it.
    fn trigger(&self, pattern: &HapticPattern) -> bool;

    fn is_supported(&self) -> bool;
}

/// Vibrator driven through a timed-output sysfs node (the Android
/// convention: writing a millisecond count starts a pulse of that length).
pub struct SysfsHaptics {
    node: Option<PathBuf>,
}

/// Device nodes probed in order.
const KNOWN_NODES: [&str; 2] = [
    "/sys/class/timed_output/vibrator/enable",
    "/sys/class/leds/vibrator/duration",
];

impl SysfsHaptics {
    /// Probe for a vibrator node, honoring an explicit override.
    pub fn detect(config: &HapticsConfig) -> Self {
        if !config.enabled {
            debug!("haptics disabled by configuration");
            return Self { node: None };
        }

        let candidates: Vec<PathBuf> = config
            .device
            .iter()
            .map(PathBuf::from)
            .chain(KNOWN_NODES.iter().map(PathBuf::from))
            .collect();

        let node = candidates.into_iter().find(|p| p.exists());
        match &node {
            Some(node) => debug!(node = %node.display(), "vibrator detected"),
            None => debug!("no vibrator node found; haptics unavailable"),
        }
        Self { node }
    }

    fn write_pulse(node: &PathBuf, ms: u64) -> bool {
        match std::fs::write(node, ms.to_string()) {
            Ok(()) => true,
            Err(e) => {
                warn!(node = %node.display(), error = %e, "vibrator write failed");
                false
            }
        }
    }
}

impl HapticDevice for SysfsHaptics {
    fn trigger(&self, pattern: &HapticPattern) -> bool {
        let Some(node) = &self.node else {
            return false;
        };

        match pattern {
            HapticPattern::Duration(ms) => Self::write_pulse(node, *ms),
            HapticPattern::Sequence(segments) => {
                // Even indices vibrate, odd indices pause. Played out on a
                // detached thread so the caller never waits.
                let node = node.clone();
                let segments = segments.clone();
                std::thread::spawn(move || {
                    for (i, ms) in segments.iter().enumerate() {
                        if i % 2 == 0 {
                            Self::write_pulse(&node, *ms);
                        }
                        std::thread::sleep(std::time::Duration::from_millis(*ms));
                    }
                });
                true
            }
        }
    }

    fn is_supported(&self) -> bool {
        self.node.is_some()
    }
}

/// Recording device for tests.
pub struct MockHaptics {
    supported: bool,
    triggered: Arc<Mutex<Vec<HapticPattern>>>,
}

impl MockHaptics {
    pub fn new() -> Self {
        Self {
            supported: true,
            triggered: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn unsupported() -> Self {
        Self {
            supported: false,
            triggered: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn triggered_handle(&self) -> Arc<Mutex<Vec<HapticPattern>>> {
        Arc::clone(&self.triggered)
    }

    pub fn triggered(&self) -> Vec<HapticPattern> {
        self.triggered.lock().unwrap().clone()
    }
}

impl Default for MockHaptics {
    fn default() -> Self {
        Self::new()
    }
}

impl HapticDevice for MockHaptics {
    fn trigger(&self, pattern: &HapticPattern) -> bool {
        if !self.supported {
            return false;
        }
        self.triggered.lock().unwrap().push(pattern.clone());
        true
    }

    fn is_supported(&self) -> bool {
        self.supported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_maps_to_duration() {
        assert_eq!(
            HapticPattern::from_intensity(100),
            HapticPattern::Duration(200)
        );
        assert_eq!(
            HapticPattern::from_intensity(50),
            HapticPattern::Duration(100)
        );
        assert_eq!(HapticPattern::from_intensity(0), HapticPattern::Duration(0));
        // Values above 100 clamp rather than overdrive
        assert_eq!(
            HapticPattern::from_intensity(250),
            HapticPattern::Duration(200)
        );
    }

    #[test]
    fn test_preset_shapes() {
        assert_eq!(
            HapticPattern::success(),
            HapticPattern::Sequence(vec![30, 30, 100])
        );
        assert_eq!(
            HapticPattern::error(),
            HapticPattern::Sequence(vec![100, 30, 100])
        );
        assert_eq!(
            HapticPattern::alert(),
            HapticPattern::Sequence(vec![30, 30, 30, 30, 30])
        );
    }

    #[test]
    fn test_scaling_applies_to_each_segment() {
        let scaled = HapticPattern::success().scaled(50);
        assert_eq!(scaled, HapticPattern::Sequence(vec![15, 15, 50]));
    }

    #[test]
    fn test_mock_records_patterns() {
        let device = MockHaptics::new();
        assert!(device.trigger(&HapticPattern::success()));
        assert!(device.trigger(&HapticPattern::Duration(80)));

        let triggered = device.triggered();
        assert_eq!(triggered.len(), 2);
        assert_eq!(triggered[1], HapticPattern::Duration(80));
    }

    #[test]
    fn test_unsupported_device_reports_false() {
        let device = MockHaptics::unsupported();
        assert!(!device.is_supported());
        assert!(!device.trigger(&HapticPattern::alert()));
        assert!(device.triggered().is_empty());
    }

    #[test]
    fn test_sysfs_detection_without_device() {
        let config = HapticsConfig {
            enabled: true,
            device: Some("/nonexistent/vibrator".to_string()),
        };
        // No node on the test machine: detection succeeds, support is off
        let device = SysfsHaptics::detect(&config);
        assert!(!device.is_supported());
        assert!(!device.trigger(&HapticPattern::Duration(100)));
    }
}
