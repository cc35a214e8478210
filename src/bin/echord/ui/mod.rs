//! TUI module for echord
//!
//! Draws the player state published by the voice actor. Nothing here touches
//! audio; the app feeds in a fresh `DisplayState` every frame.

mod keyboard;
mod now_playing;

use std::path::Path;

use echord::{dsp::Waveform, DisplayState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use keyboard::render_keyboard;
use now_playing::render_now_playing;

/// Static facts shown in the header and help bar.
pub struct StatusInfo<'a> {
    pub waveform: Waveform,
    /// Releases are inferred from missing auto-repeats.
    pub hold_timeout: bool,
    pub log_file: &'a Path,
}

/// Render the whole screen
pub fn render(frame: &mut Frame, display: &DisplayState, status: &StatusInfo) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(5), // Now playing
            Constraint::Min(6),    // Keys
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], display, status);
    render_now_playing(frame, chunks[1], display);
    render_keyboard(frame, chunks[2], display);
    render_help(frame, chunks[3], status);
}

fn render_header(frame: &mut Frame, area: Rect, display: &DisplayState, status: &StatusInfo) {
    let block = Block::default().title(" echord ").borders(Borders::ALL);

    let (audio, audio_color) = if display.audio_ready {
        ("● audio on", Color::Green)
    } else {
        ("○ audio starts on first key", Color::Yellow)
    };

    let line = Line::from(vec![
        Span::styled(
            " Key: C Major  ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("Wave: {}  ", status.waveform),
            Style::default().fg(Color::White),
        ),
        Span::styled(audio, Style::default().fg(audio_color)),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_help(frame: &mut Frame, area: Rect, status: &StatusInfo) {
    let release = if status.hold_timeout {
        "release: hold timeout"
    } else {
        "release: key up"
    };
    let help = Paragraph::new(format!(
        " [1-7] Hold to play  [Q] Quit  {release}  log: {}",
        status.log_file.display()
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
