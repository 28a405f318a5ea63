use crate::state::State;
use ratatui::{layout::Alignment, text::Line, widgets::Paragraph};

/// Braille spinner animation frames.
///
pub const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Return the current spinner frame for the state.
///
pub fn frame(state: &State) -> &'static str {
    FRAMES[state.spinner_index() % FRAMES.len()]
}

/// Return a vertically centered spinner paragraph for loading panes.
///
pub fn widget(state: &State, height: u16) -> Paragraph<'static> {
    let mut lines: Vec<Line> = vec![];
    for _ in 0..height.saturating_sub(2) / 2 {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(frame(state)));
    Paragraph::new(lines).alignment(Alignment::Center)
}
