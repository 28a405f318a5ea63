use super::Frame;
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
};
use tui_logger::TuiLoggerWidget;

/// Render the in-app log pane.
///
pub fn log(frame: &mut Frame, size: Rect, theme: &Theme) {
    let widget = TuiLoggerWidget::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styling::normal_block_border_style(theme))
                .title("Log"),
        )
        .style(styling::normal_text_style(theme));
    frame.render_widget(widget, size);
}
