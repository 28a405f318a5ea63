mod character;
mod create;
mod footer;
mod log;
mod popup;
mod quests;

use super::theme::Theme;
use super::Frame;
use crate::state::{State, View};
use ratatui::layout::{Constraint, Direction, Layout};

/// Render the full interface for the current state.
///
pub fn render(frame: &mut Frame, state: &mut State) {
    let theme = Theme::default();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    character::header(frame, rows[0], state, &theme);

    let body = if state.is_log_visible() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);
        log::log(frame, columns[1], &theme);
        columns[0]
    } else {
        rows[1]
    };

    match state.current_view() {
        View::Quests => quests::quests(frame, body, state, &theme),
        View::CreateQuest | View::EditQuest => create::form(frame, body, state, &theme),
    }

    footer::footer(frame, rows[2], state, &theme);
    popup::error(frame, state, &theme);
}
