//! Error types for Vaani

use thiserror::Error;

pub type Result<T> = std::result::Result<T, VaaniError>;

#[derive(Error, Debug)]
pub enum VaaniError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Identification error: {0}")]
    Identify(#[from] IdentifyError),

    #[error("Output device error: {0}")]
    Device(#[from] DeviceError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl VaaniError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            VaaniError::InvalidInput(_) => 3,
            VaaniError::Capture(CaptureError::PermissionDenied(_)) => 2,
            VaaniError::Capture(_) => 1,
            VaaniError::Identify(_) => 1,
            VaaniError::Device(_) => 1,
            VaaniError::Config(_) => 1,
            VaaniError::Store(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage operation failed: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Failures raised by frame sources.
///
/// Permission denial is kept distinct: the camera screen surfaces it with a
/// retry action instead of leaving the capture flow.
#[derive(Error, Debug, Clone)]
pub enum CaptureError {
    #[error("Camera access denied: {0}")]
    PermissionDenied(String),

    #[error("Failed to open capture source: {0}")]
    Acquire(String),

    #[error("Failed to capture frame: {0}")]
    Frame(String),
}

#[derive(Error, Debug, Clone)]
pub enum IdentifyError {
    #[error("Identifier unavailable: {0}")]
    Unavailable(String),

    #[error("Identification failed: {0}")]
    Failed(String),
}

/// Failures inside the speech/haptic backends.
///
/// These never reach the user: the announcer and signaler catch them at the
/// boundary and degrade to a logged no-op.
#[derive(Error, Debug, Clone)]
pub enum DeviceError {
    #[error("No speech synthesizer available: {0}")]
    SpeechUnavailable(String),

    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("Haptic device error: {0}")]
    Haptics(String),
}
