//! vaani-tui - scan a banknote, hear its denomination
//!
//! Interactive terminal front end for Vaani. Keyboard-driven with spoken
//! feedback throughout, a reduced wearable layout, and dark/light theming.

use vaani_tui::{
    app::{event::EventHandler, reduce, Action, AppState, Effect},
    error::Result,
    services::ServiceHandle,
    terminal::{install_panic_hook, restore_terminal, setup_terminal},
    ui,
};

use libvaani::logging::{LogFormat, LoggingConfig};
use libvaani::types::Preferences;

fn main() -> Result<()> {
    // Logs go to a file: stderr belongs to the alternate screen. The guard
    // must outlive the event loop or buffered lines are dropped.
    let _log_guard = init_file_logging();

    install_panic_hook();

    // Bring services up before touching the terminal so startup errors
    // print normally
    let services = ServiceHandle::new()?;
    let prefs = services.load_preferences();

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &services, prefs);
    restore_terminal(terminal)?;

    result
}

fn init_file_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let dir = libvaani::config::resolve_data_path().ok()?.join("logs");
    std::fs::create_dir_all(&dir).ok()?;

    let format = std::env::var("VAANI_LOG_FORMAT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(LogFormat::Text);
    let level = std::env::var("VAANI_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    LoggingConfig::new(format, level).with_file_dir(dir).init()
}

fn run_app(
    terminal: &mut vaani_tui::terminal::Tui,
    services: &ServiceHandle,
    prefs: Preferences,
) -> Result<()> {
    let mut state = AppState::from_preferences(prefs);
    let actions_rx = services.actions();
    let event_handler = EventHandler::new(state.config.tick_rate_ms);

    // Establish reachability once at startup; afterwards the user drives
    // re-probing from the banner
    services.execute(Effect::ProbeConnectivity, state.language, state.tuning());

    loop {
        terminal.draw(|frame| ui::render(frame, &state))?;

        // Terminal input (or a tick)
        let action = event_handler.next()?;
        state = apply(state, action, services);

        // Results of previously spawned effects
        while let Ok(action) = actions_rx.try_recv() {
            state = apply(state, action, services);
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Reduce one action and hand the requested effects to the service layer.
fn apply(state: AppState, action: Action, services: &ServiceHandle) -> AppState {
    let (state, effects) = reduce(state, action);
    for effect in effects {
        services.execute(effect, state.language, state.tuning());
    }
    state
}
