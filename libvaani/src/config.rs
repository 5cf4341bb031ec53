//! Configuration management for Vaani

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};
use crate::types::{AppLanguage, AppMode};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub haptics: HapticsConfig,
    #[serde(default)]
    pub connectivity: ConnectivityConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    pub enabled: bool,
    /// Explicit synthesizer command; auto-detected from PATH when absent
    pub synthesizer: Option<String>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            synthesizer: None,
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HapticsConfig {
    pub enabled: bool,
    /// Timed-output device node; auto-detected when absent
    pub device: Option<String>,
}

impl Default for HapticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            device: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectivityConfig {
    /// Same-origin resource answered with a cheap HEAD
    pub probe_url: String,
    pub timeout_ms: u64,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            probe_url: "https://vaani.app/favicon.ico".to_string(),
            timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Still image standing in for a live camera frame
    pub image: Option<String>,
    pub width: u32,
    pub height: u32,
    pub jpeg_quality: f32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            image: None,
            width: 1280,
            height: 720,
            jpeg_quality: 0.8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// First-run preferences, used only while the store is empty
    pub mode: AppMode,
    pub language: AppLanguage,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// A missing config file is not an error: preferences are best-effort,
    /// so startup falls back to the default configuration.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            return Ok(Self::default_config());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self {
            storage: StorageConfig {
                path: "~/.local/share/vaani/preferences.db".to_string(),
            },
            speech: SpeechConfig::default(),
            haptics: HapticsConfig::default(),
            connectivity: ConnectivityConfig::default(),
            capture: CaptureConfig::default(),
            defaults: DefaultsConfig::default(),
        }
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("VAANI_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("vaani").join("config.toml"))
}

/// Resolve the data directory path following XDG Base Directory spec
pub fn resolve_data_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| ConfigError::MissingField("data directory".to_string()))?;

    Ok(data_dir.join("vaani"))
}
