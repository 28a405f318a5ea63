use super::Frame;
use crate::state::State;
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Render the error popup for the front of the error queue, if any.
///
pub fn error(frame: &mut Frame, state: &State, theme: &Theme) {
    let Some(message) = state.current_error() else {
        return;
    };

    let title = if state.error_count() > 1 {
        format!("Error (1 of {})", state.error_count())
    } else {
        "Error".to_string()
    };

    let area = centered_rect(60, 20, frame.size());
    frame.render_widget(Clear, area);
    let popup = Paragraph::new(message.to_string())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.warning))
                .title(title),
        );
    frame.render_widget(popup, area);
}

/// Return a centered rect using percentages of the available rect.
///
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
