//! Now-playing panel - the chord most recently pressed and still held

use echord::DisplayState;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_now_playing(frame: &mut Frame, area: Rect, display: &DisplayState) {
    let block = Block::default()
        .title(" Now Playing ")
        .borders(Borders::ALL);

    let lines = match display.now_playing {
        Some(chord) => {
            let notes = chord
                .pitches
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            vec![
                Line::from(Span::styled(
                    chord.name,
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("{}  ·  {}", chord.numeral, notes),
                    Style::default().fg(Color::Gray),
                )),
            ]
        }
        None => vec![Line::from(Span::styled(
            "Press 1-7 to play chords",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}
