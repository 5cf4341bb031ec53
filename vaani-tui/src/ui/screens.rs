//! Per-screen rendering functions

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use libvaani::types::AppMode;

use super::Theme;
use crate::app::state::{AccessibilitySetting, AppState};

fn titled_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .style(theme.base())
}

/// Center `height` lines vertically inside `area`.
fn centered(area: Rect, height: u16) -> Rect {
    let pad = area.height.saturating_sub(height) / 2;
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(pad),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area)[1]
}

pub fn render_home(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let lines = vec![
        Line::from(Span::styled(
            "Currency Identification",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Scan any Indian banknote to hear its denomination."),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to scan",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "language: {} | mode: {} | theme: {}",
                state.language,
                state.mode,
                if state.dark_mode { "dark" } else { "light" }
            ),
            Style::default().fg(theme.muted),
        )),
    ];

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(titled_block("Vaani", theme));

    frame.render_widget(body, area);
}

/// Reduced high-contrast idle screen: a single scan control.
pub fn render_home_wearable(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let symbol = if state.config.unicode_enabled {
        "◉"
    } else {
        "(*)"
    };

    let lines = vec![
        Line::from(Span::styled(
            symbol,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "SCAN",
            Style::default()
                .fg(theme.fg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "press Enter",
            Style::default().fg(theme.muted),
        )),
    ];

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().style(theme.base()));

    frame.render_widget(body, centered(area, 5));
}

pub fn render_camera(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    if let Some(error) = &state.camera_error {
        let lines = vec![
            Line::from(Span::styled(
                "Camera unavailable",
                Style::default()
                    .fg(theme.danger)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(error.as_str()),
            Line::from(""),
            Line::from(Span::styled(
                "[r] try again",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];

        let body = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(titled_block("Camera", theme));
        frame.render_widget(body, area);
        return;
    }

    let frame_glyph = if state.config.unicode_enabled {
        "┌──────────────┐\n│              │\n│   banknote   │\n│              │\n└──────────────┘"
    } else {
        "+--------------+\n|              |\n|   banknote   |\n|              |\n+--------------+"
    };

    let lines = vec![
        Line::from("Position the banknote in the frame"),
        Line::from(""),
    ]
    .into_iter()
    .chain(frame_glyph.lines().map(|l| {
        Line::from(Span::styled(
            l.to_string(),
            Style::default().fg(theme.accent),
        ))
    }))
    .chain([
        Line::from(""),
        Line::from(Span::styled(
            "press Enter to capture",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ])
    .collect::<Vec<_>>();

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(titled_block("Camera", theme));
    frame.render_widget(body, area);
}

pub fn render_processing(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let spinner = if state.config.unicode_enabled {
        "◌ ◍ ◉"
    } else {
        ". o O"
    };

    let lines = vec![
        Line::from(Span::styled(
            spinner,
            Style::default().fg(theme.accent),
        )),
        Line::from(""),
        Line::from("Identifying the banknote..."),
        Line::from(Span::styled(
            "please wait",
            Style::default().fg(theme.muted),
        )),
    ];

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(titled_block("Processing", theme));
    frame.render_widget(body, area);
}

pub fn render_result(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let label = state.result.as_deref().unwrap_or("unknown");

    let denomination_style = if state.mode == AppMode::Wearable {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        Line::from("Banknote identified"),
        Line::from(""),
        Line::from(Span::styled(label.to_uppercase(), denomination_style)),
        Line::from(""),
        Line::from(Span::styled(
            "[r] speak again   [Enter] scan another",
            Style::default().fg(theme.muted),
        )),
    ];

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(titled_block("Result", theme));
    frame.render_widget(body, area);
}

pub fn render_error(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let detail = state.error.as_deref().unwrap_or("unknown error");

    let lines = vec![
        Line::from(Span::styled(
            "Something went wrong",
            Style::default()
                .fg(theme.danger)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(detail),
        Line::from(""),
        Line::from(Span::styled(
            "[r] retry capture   [Esc] home",
            Style::default().fg(theme.muted),
        )),
    ];

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(titled_block("Error", theme));
    frame.render_widget(body, area);
}

pub fn render_settings(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let rows = [
        ("m", "Mode", state.mode.to_string()),
        ("l", "Language", state.language.to_string()),
        (
            "d",
            "Dark mode",
            if state.dark_mode { "on" } else { "off" }.to_string(),
        ),
    ];

    let lines: Vec<Line> = rows
        .iter()
        .flat_map(|(key, name, value)| {
            vec![
                Line::from(vec![
                    Span::styled(
                        format!("[{}] ", key),
                        Style::default().fg(theme.accent),
                    ),
                    Span::styled(
                        format!("{:<12}", name),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(value.clone()),
                ]),
                Line::from(""),
            ]
        })
        .collect();

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(titled_block("Settings", theme));
    frame.render_widget(body, area);
}

pub fn render_accessibility(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = titled_block("Accessibility", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let sliders = [
        (
            AccessibilitySetting::VoiceVolume,
            "Voice volume",
            state.accessibility.voice_volume,
        ),
        (
            AccessibilitySetting::VoiceSpeed,
            "Speech rate",
            state.accessibility.voice_speed,
        ),
        (
            AccessibilitySetting::VibrationIntensity,
            "Vibration intensity",
            state.accessibility.vibration_intensity,
        ),
    ];

    for (i, (setting, name, value)) in sliders.iter().enumerate() {
        let selected = state.accessibility.selected == *setting;
        let marker = if selected { "> " } else { "  " };

        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(format!("{}{}", marker, name))
                    .borders(Borders::ALL)
                    .style(if selected {
                        Style::default().fg(theme.accent).bg(theme.bg)
                    } else {
                        theme.base()
                    }),
            )
            .gauge_style(Style::default().fg(theme.accent).bg(theme.muted))
            .percent(*value as u16);

        frame.render_widget(gauge, chunks[i]);
    }
}
