//! Terminal event polling
//!
//! Turns crossterm input into [`Action`]s, generating a tick when nothing
//! arrives within the tick rate. Service results reach the reducer through
//! a separate channel owned by the service bridge.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent};

use crate::app::Action;

/// Event handler that polls for terminal events
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next action, blocking up to the tick rate.
    pub fn next(&self) -> std::io::Result<Action> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) => Ok(Action::Key(key)),
                CrosstermEvent::Resize(w, h) => Ok(Action::Resize(w, h)),
                _ => Ok(Action::Tick),
            }
        } else {
            Ok(Action::Tick)
        }
    }
}
