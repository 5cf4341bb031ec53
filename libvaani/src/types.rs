//! Core types for Vaani

use serde::{Deserialize, Serialize};

/// Which screen family the application is in.
///
/// Exactly one status is active at a time. It is owned by the TUI state
/// machine and only changes through validated transitions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AppStatus {
    Idle,
    Camera,
    Processing,
    Result,
    Error,
    Settings,
    Accessibility,
}

impl AppStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppStatus::Idle => "idle",
            AppStatus::Camera => "camera",
            AppStatus::Processing => "processing",
            AppStatus::Result => "result",
            AppStatus::Error => "error",
            AppStatus::Settings => "settings",
            AppStatus::Accessibility => "accessibility",
        }
    }
}

impl std::fmt::Display for AppStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UI variant: the full mobile layout or the reduced wearable layout.
///
/// Orthogonal to [`AppStatus`]; it changes what renders, never which
/// transitions are legal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    Mobile,
    Wearable,
}

impl Default for AppMode {
    fn default() -> Self {
        AppMode::Mobile
    }
}

impl std::str::FromStr for AppMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mobile" => Ok(AppMode::Mobile),
            "wearable" => Ok(AppMode::Wearable),
            _ => Err(format!(
                "Invalid mode: '{}'. Valid options: mobile, wearable",
                s
            )),
        }
    }
}

impl std::fmt::Display for AppMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppMode::Mobile => write!(f, "mobile"),
            AppMode::Wearable => write!(f, "wearable"),
        }
    }
}

/// Announcement language.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppLanguage {
    English,
    Hindi,
    Tamil,
    Telugu,
    Bengali,
}

impl AppLanguage {
    pub const ALL: [AppLanguage; 5] = [
        AppLanguage::English,
        AppLanguage::Hindi,
        AppLanguage::Tamil,
        AppLanguage::Telugu,
        AppLanguage::Bengali,
    ];

    /// Locale prefix used to filter synthesis voices.
    pub fn locale_code(&self) -> &'static str {
        match self {
            AppLanguage::English => "en",
            AppLanguage::Hindi => "hi",
            AppLanguage::Tamil => "ta",
            AppLanguage::Telugu => "te",
            AppLanguage::Bengali => "bn",
        }
    }
}

impl Default for AppLanguage {
    fn default() -> Self {
        AppLanguage::English
    }
}

impl std::str::FromStr for AppLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" => Ok(AppLanguage::English),
            "hindi" => Ok(AppLanguage::Hindi),
            "tamil" => Ok(AppLanguage::Tamil),
            "telugu" => Ok(AppLanguage::Telugu),
            "bengali" => Ok(AppLanguage::Bengali),
            _ => Err(format!(
                "Invalid language: '{}'. Valid options: english, hindi, tamil, telugu, bengali",
                s
            )),
        }
    }
}

impl std::fmt::Display for AppLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppLanguage::English => write!(f, "english"),
            AppLanguage::Hindi => write!(f, "hindi"),
            AppLanguage::Tamil => write!(f, "tamil"),
            AppLanguage::Telugu => write!(f, "telugu"),
            AppLanguage::Bengali => write!(f, "bengali"),
        }
    }
}

/// One encoded camera frame.
///
/// Held in session state from capture until the next return to idle, then
/// discarded. Never written to durable storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    /// `data:` URI containing the encoded frame
    pub data: String,
    /// MIME type of the encoded payload
    pub mime: String,
}

impl CapturedImage {
    /// Wrap raw JPEG bytes as a data URI payload.
    pub fn from_jpeg_bytes(bytes: &[u8]) -> Self {
        use base64::Engine;

        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self {
            data: format!("data:image/jpeg;base64,{}", encoded),
            mime: "image/jpeg".to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Outcome of one identification.
///
/// The label is a ready-to-display denomination string; nothing validates
/// its shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentificationResult {
    pub label: String,
    pub identified_at: i64,
}

impl IdentificationResult {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            identified_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// The only durable entity: user preferences surviving restarts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Preferences {
    pub mode: AppMode,
    pub language: AppLanguage,
    pub dark_mode: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_locale_codes() {
        assert_eq!(AppLanguage::English.locale_code(), "en");
        assert_eq!(AppLanguage::Hindi.locale_code(), "hi");
        assert_eq!(AppLanguage::Tamil.locale_code(), "ta");
        assert_eq!(AppLanguage::Telugu.locale_code(), "te");
        assert_eq!(AppLanguage::Bengali.locale_code(), "bn");
    }

    #[test]
    fn test_mode_round_trip() {
        for mode in [AppMode::Mobile, AppMode::Wearable] {
            let parsed: AppMode = mode.to_string().parse().unwrap();
            assert_eq!(parsed, mode);
        }
    }

    #[test]
    fn test_language_parse_is_case_insensitive() {
        let parsed: AppLanguage = "Tamil".parse().unwrap();
        assert_eq!(parsed, AppLanguage::Tamil);
        assert!("klingon".parse::<AppLanguage>().is_err());
    }

    #[test]
    fn test_preferences_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.mode, AppMode::Mobile);
        assert_eq!(prefs.language, AppLanguage::English);
        assert!(!prefs.dark_mode);
    }

    #[test]
    fn test_captured_image_data_uri() {
        let image = CapturedImage::from_jpeg_bytes(&[0xFF, 0xD8, 0xFF]);
        assert!(image.data.starts_with("data:image/jpeg;base64,"));
        assert_eq!(image.mime, "image/jpeg");
        assert!(!image.is_empty());
    }

    #[test]
    fn test_status_serde_lowercase() {
        let json = serde_json::to_string(&AppStatus::Accessibility).unwrap();
        assert_eq!(json, "\"accessibility\"");
        let back: AppStatus = serde_json::from_str("\"camera\"").unwrap();
        assert_eq!(back, AppStatus::Camera);
    }
}
