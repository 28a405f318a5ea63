use super::Frame;
use crate::state::{State, View};
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render footer widget with key hints for the current mode.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let (mode, hints) = if state.current_error().is_some() {
        ("ERROR:", " enter/esc: dismiss".to_string())
    } else {
        match state.current_view() {
            View::Quests => (
                "QUESTS:",
                " j/k: select, tab: quest tab, s: status, c: complete, +/-: progress, \
                 1-9: toggle task, n: new, e: edit, r: refresh, d: log, q: quit"
                    .to_string(),
            ),
            View::CreateQuest => (
                "NEW:",
                " tab: next field, space/enter: toggle or add, +/-: adjust, ctrl+s: save, esc: cancel"
                    .to_string(),
            ),
            View::EditQuest => (
                "EDIT:",
                " tab: next field, space/enter: toggle, +/-: adjust, ctrl+s: save, esc: cancel"
                    .to_string(),
            ),
        }
    };

    let controls_content = Line::from(vec![
        Span::styled(
            mode,
            Style::default()
                .fg(theme.text)
                .bg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(hints, Style::default().fg(theme.warning)),
    ]);
    let controls_widget = Paragraph::new(controls_content).alignment(Alignment::Left);

    let right_content = Line::from(vec![Span::styled(
        format!(" {}", env!("CARGO_PKG_VERSION")),
        Style::default().fg(theme.secondary),
    )]);
    let right_content_width = right_content.width();
    let right_widget = Paragraph::new(right_content).alignment(Alignment::Right);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(right_content_width.try_into().unwrap_or(0)),
        ])
        .split(size);

    frame.render_widget(controls_widget, columns[0]);
    frame.render_widget(right_widget, columns[1]);
}
