//! Chord keyboard widget - one cell per key, lit while the key is held

use echord::{ChordKey, DisplayState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub fn render_keyboard(frame: &mut Frame, area: Rect, display: &DisplayState) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(ChordKey::ALL.map(|_| Constraint::Ratio(1, ChordKey::ALL.len() as u32)))
        .split(area);

    for (key, cell) in ChordKey::ALL.iter().zip(cells.iter()) {
        render_key(frame, *cell, *key, display.is_active(*key));
    }
}

fn render_key(frame: &mut Frame, area: Rect, key: ChordKey, active: bool) {
    let chord = key.chord();

    let (border, text) = if active {
        (
            Style::default().fg(Color::Green),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::White),
        )
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if active {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(border);

    let lines = vec![
        Line::from(key.to_string()).style(text.add_modifier(Modifier::BOLD)),
        Line::from(chord.name).style(text),
        Line::from(chord.numeral).style(text),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}
