//! UI rendering
//!
//! Pure rendering: state in, widgets out, no side effects. Which screen
//! draws is decided by the view router; this module owns the shared chrome
//! (theme, offline banner, key hints).

pub mod screens;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{screen_for, AppState, Screen};

/// Resolved color palette for the current theme axis.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub muted: Color,
    pub danger: Color,
}

impl Theme {
    pub fn of(dark_mode: bool) -> Self {
        if dark_mode {
            Self {
                fg: Color::White,
                bg: Color::Black,
                accent: Color::Yellow,
                muted: Color::DarkGray,
                danger: Color::LightRed,
            }
        } else {
            Self {
                fg: Color::Black,
                bg: Color::White,
                accent: Color::Blue,
                muted: Color::Gray,
                danger: Color::Red,
            }
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

/// Render the application UI.
pub fn render(frame: &mut Frame, state: &AppState) {
    let theme = Theme::of(state.dark_mode);
    let area = frame.size();

    // Paint the theme background across the whole terminal
    frame.render_widget(Block::default().style(theme.base()), area);

    let screen = screen_for(state.status, state.mode);

    // The wearable home is deliberately chromeless: one giant control
    if screen == Screen::HomeWearable {
        screens::render_home_wearable(frame, area, state, &theme);
        return;
    }

    let banner_height = if state.online { 0 } else { 3 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    if !state.online {
        render_offline_banner(frame, chunks[0], &theme);
    }

    match screen {
        Screen::Home => screens::render_home(frame, chunks[1], state, &theme),
        Screen::Camera => screens::render_camera(frame, chunks[1], state, &theme),
        Screen::Processing => screens::render_processing(frame, chunks[1], state, &theme),
        Screen::Result => screens::render_result(frame, chunks[1], state, &theme),
        Screen::Error => screens::render_error(frame, chunks[1], state, &theme),
        Screen::Settings => screens::render_settings(frame, chunks[1], state, &theme),
        Screen::Accessibility => screens::render_accessibility(frame, chunks[1], state, &theme),
        Screen::HomeWearable => unreachable!("handled above"),
    }

    render_hints(frame, chunks[2], screen, state, &theme);
}

/// Persistent banner shown whenever the last probe said offline.
fn render_offline_banner(frame: &mut Frame, area: Rect, theme: &Theme) {
    let banner = Paragraph::new(Line::from(vec![
        Span::styled(
            "Offline - identification may be limited. ",
            Style::default().fg(Color::White),
        ),
        Span::styled(
            "[o] refresh status",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(theme.danger)),
    );

    frame.render_widget(banner, area);
}

/// Bottom bar with the keys that do something on this screen.
fn render_hints(frame: &mut Frame, area: Rect, screen: Screen, state: &AppState, theme: &Theme) {
    let hints = match screen {
        Screen::Home => "Enter: scan | s: settings | a: accessibility | q: quit",
        Screen::Camera => {
            if state.camera_error.is_some() {
                "r: try again | Esc: home"
            } else {
                "Enter: capture | Esc: cancel"
            }
        }
        Screen::Processing => "identifying...",
        Screen::Result => "Enter: scan another | r: speak result | m: mute | Esc: home",
        Screen::Error => "r: retry | Esc: home",
        Screen::Settings => "m: mode | l: language | d: dark mode | Esc: back",
        Screen::Accessibility => "Up/Down: select | Left/Right: adjust | t: test voice | b: test vibration | Esc: back",
        Screen::HomeWearable => "",
    };

    let bar = Paragraph::new(hints)
        .style(Style::default().fg(theme.muted).bg(theme.bg))
        .block(Block::default().borders(Borders::ALL).style(theme.base()));

    frame.render_widget(bar, area);
}
