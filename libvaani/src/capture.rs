//! Frame acquisition
//!
//! Abstraction over "get me one encoded frame". The lifetime rule is the
//! one discipline every implementation must honor: a source opened with
//! [`FrameSource::open`] is released on every exit path - after a capture,
//! on navigation away, and on error.
//!
//! Real camera I/O is out of scope; the shipped source reads a still image
//! from disk, which is enough to exercise the whole scan pipeline.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::config::CaptureConfig;
use crate::error::{CaptureError, Result};
use crate::types::CapturedImage;

/// A camera-like producer of encoded frames.
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Acquire the underlying device. May fail with
    /// [`CaptureError::PermissionDenied`].
    async fn open(&mut self) -> Result<()>;

    /// Grab one frame. Requires a prior successful [`FrameSource::open`].
    async fn capture(&mut self) -> Result<CapturedImage>;

    /// Release the underlying device. Safe to call repeatedly.
    async fn release(&mut self);

    fn is_open(&self) -> bool;
}

/// Frame source that serves a configured still image.
pub struct StillFrameSource {
    path: Option<String>,
    open: bool,
}

impl StillFrameSource {
    pub fn new(config: &CaptureConfig) -> Self {
        Self {
            path: config.image.clone(),
            open: false,
        }
    }

    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            open: false,
        }
    }
}

#[async_trait]
impl FrameSource for StillFrameSource {
    async fn open(&mut self) -> Result<()> {
        let Some(path) = &self.path else {
            return Err(CaptureError::Acquire("no capture image configured".to_string()).into());
        };

        let expanded = shellexpand::tilde(path).to_string();
        if !std::path::Path::new(&expanded).is_file() {
            return Err(CaptureError::Acquire(format!("image not found: {}", expanded)).into());
        }

        self.open = true;
        debug!(path = %expanded, "still frame source opened");
        Ok(())
    }

    async fn capture(&mut self) -> Result<CapturedImage> {
        let path = match (&self.path, self.open) {
            (Some(path), true) => path.clone(),
            _ => return Err(CaptureError::Frame("source not open".to_string()).into()),
        };
        let expanded = shellexpand::tilde(&path).to_string();
        let bytes = tokio::fs::read(&expanded)
            .await
            .map_err(|e| CaptureError::Frame(format!("{}: {}", expanded, e)))?;

        Ok(CapturedImage::from_jpeg_bytes(&bytes))
    }

    async fn release(&mut self) {
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

/// Scripted frame source for tests, with open/release accounting.
pub struct MockFrameSource {
    /// Number of upcoming `open` calls that fail with permission denial
    deny_opens: Arc<Mutex<usize>>,
    frame: CapturedImage,
    open: bool,
    opens: Arc<Mutex<usize>>,
    releases: Arc<Mutex<usize>>,
}

impl MockFrameSource {
    pub fn success() -> Self {
        Self {
            deny_opens: Arc::new(Mutex::new(0)),
            frame: CapturedImage::from_jpeg_bytes(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]),
            open: false,
            opens: Arc::new(Mutex::new(0)),
            releases: Arc::new(Mutex::new(0)),
        }
    }

    /// Denies the first `n` open attempts, then succeeds (the
    /// permission-retry scenario).
    pub fn deny_first_opens(n: usize) -> Self {
        let source = Self::success();
        *source.deny_opens.lock().unwrap() = n;
        source
    }

    pub fn open_count(&self) -> usize {
        *self.opens.lock().unwrap()
    }

    pub fn release_count(&self) -> usize {
        *self.releases.lock().unwrap()
    }
}

#[async_trait]
impl FrameSource for MockFrameSource {
    async fn open(&mut self) -> Result<()> {
        *self.opens.lock().unwrap() += 1;

        let mut deny = self.deny_opens.lock().unwrap();
        if *deny > 0 {
            *deny -= 1;
            return Err(
                CaptureError::PermissionDenied("camera access denied".to_string()).into(),
            );
        }

        self.open = true;
        Ok(())
    }

    async fn capture(&mut self) -> Result<CapturedImage> {
        if !self.open {
            return Err(CaptureError::Frame("source not open".to_string()).into());
        }
        Ok(self.frame.clone())
    }

    async fn release(&mut self) {
        if self.open {
            *self.releases.lock().unwrap() += 1;
        }
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
