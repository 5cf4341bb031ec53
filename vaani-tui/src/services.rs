//! Service layer adapter for the TUI
//!
//! Bridges the async `VaaniService` into the synchronous event loop. The
//! main loop hands [`Effect`]s to [`ServiceHandle::execute`]; each effect
//! runs on the handle's tokio runtime and reports back as an [`Action`]
//! through a crossbeam channel the loop drains every tick.
//!
//! The frame source lives behind an async mutex here because open, capture
//! and release arrive as separate effects and must serialize against each
//! other.

use std::future::Future;
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;

use libvaani::capture::{FrameSource, StillFrameSource};
use libvaani::service::{AnnounceTuning, VaaniService};
use libvaani::types::{AppLanguage, Preferences};

use crate::app::{Action, Effect};
use crate::error::Result;

/// Sync/async bridge owning the runtime, the service and the frame source.
pub struct ServiceHandle {
    service: Arc<VaaniService>,
    runtime: tokio::runtime::Runtime,
    source: Arc<AsyncMutex<Box<dyn FrameSource>>>,
    action_tx: Sender<Action>,
    action_rx: Receiver<Action>,
}

impl ServiceHandle {
    /// Create the handle with detected devices and configuration.
    pub fn new() -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        let service = runtime.block_on(VaaniService::new())?;
        let source: Box<dyn FrameSource> =
            Box::new(StillFrameSource::new(&service.config().capture));

        Ok(Self::assemble(runtime, service, source))
    }

    /// Create the handle from an async service factory (tests inject mock
    /// devices this way; the factory runs on the handle's runtime so the
    /// store pool is bound correctly).
    pub fn with_service_factory<F, Fut>(factory: F, source: Box<dyn FrameSource>) -> Result<Self>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = libvaani::Result<VaaniService>>,
    {
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        let service = runtime.block_on(factory())?;
        Ok(Self::assemble(runtime, service, source))
    }

    fn assemble(
        runtime: tokio::runtime::Runtime,
        service: VaaniService,
        source: Box<dyn FrameSource>,
    ) -> Self {
        let (action_tx, action_rx) = unbounded();
        Self {
            service: Arc::new(service),
            runtime,
            source: Arc::new(AsyncMutex::new(source)),
            action_tx,
            action_rx,
        }
    }

    /// Channel on which completed effects report back as actions.
    pub fn actions(&self) -> Receiver<Action> {
        self.action_rx.clone()
    }

    /// Load stored preferences (blocking; called once at startup).
    pub fn load_preferences(&self) -> Preferences {
        self.runtime.block_on(self.service.load_preferences())
    }

    pub fn speech_available(&self) -> bool {
        self.service.speech_available()
    }

    pub fn haptics_supported(&self) -> bool {
        self.service.haptics_supported()
    }

    /// Run one side-effect command.
    ///
    /// Never blocks the caller: device work is spawned onto the runtime and
    /// reports back through the action channel.
    pub fn execute(&self, effect: Effect, language: AppLanguage, tuning: AnnounceTuning) {
        debug!(?effect, "executing effect");

        match effect {
            Effect::OpenCamera => {
                let source = Arc::clone(&self.source);
                let tx = self.action_tx.clone();
                self.runtime.spawn(async move {
                    let action = match source.lock().await.open().await {
                        Ok(()) => Action::CameraOpened,
                        Err(e) => Action::CameraOpenFailed {
                            message: e.to_string(),
                        },
                    };
                    let _ = tx.send(action);
                });
            }

            Effect::CaptureFrame => {
                let source = Arc::clone(&self.source);
                let tx = self.action_tx.clone();
                self.runtime.spawn(async move {
                    let action = match source.lock().await.capture().await {
                        Ok(image) => Action::CaptureSucceeded { image },
                        Err(e) => Action::CaptureFailed {
                            message: e.to_string(),
                        },
                    };
                    let _ = tx.send(action);
                });
            }

            Effect::ReleaseCamera => {
                let source = Arc::clone(&self.source);
                self.runtime.spawn(async move {
                    source.lock().await.release().await;
                });
            }

            Effect::BeginIdentification(image) => {
                let service = Arc::clone(&self.service);
                let tx = self.action_tx.clone();
                self.runtime.spawn(async move {
                    let action = match service.scan(&image).await {
                        Ok(response) => Action::IdentificationSucceeded {
                            label: response.result.label,
                        },
                        Err(e) => Action::IdentificationFailed {
                            error: e.to_string(),
                        },
                    };
                    let _ = tx.send(action);
                });
            }

            Effect::AnnouncePhrase(phrase) => {
                let service = Arc::clone(&self.service);
                self.runtime.spawn(async move {
                    service.announce_phrase(phrase, language, tuning).await;
                });
            }

            Effect::AnnounceResult(label) => {
                let service = Arc::clone(&self.service);
                self.runtime.spawn(async move {
                    service.announce_result(&label, language, tuning).await;
                });
            }

            Effect::StopSpeech => {
                let service = Arc::clone(&self.service);
                self.runtime.spawn(async move {
                    service.stop_speech().await;
                });
            }

            Effect::Haptic(pattern) => {
                // Cheap fire-and-forget; no need to go async
                self.service.trigger_haptic(&pattern);
            }

            Effect::ProbeConnectivity => {
                let service = Arc::clone(&self.service);
                let tx = self.action_tx.clone();
                self.runtime.spawn(async move {
                    let online = service.refresh_online_status().await;
                    let _ = tx.send(Action::ConnectivityChanged { online });
                });
            }

            Effect::PersistPreferences(prefs) => {
                let service = Arc::clone(&self.service);
                self.runtime.spawn(async move {
                    service.save_preferences(&prefs).await;
                });
            }
        }
    }
}
