use super::Frame;
use crate::state::State;
use crate::store::EXPERIENCE_PER_LEVEL;
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Gauge, Paragraph},
};

/// Render the character header with class, weapon, level, and the
/// experience gauge towards the next level.
///
pub fn header(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme))
        .title("Character");

    match state.profile() {
        Some(profile) => {
            let label = format!(
                "{} · {} · Lv {} · {} xp",
                profile.class.label(),
                profile.weapon.label(),
                profile.level(),
                profile.experience
            );
            let gauge = Gauge::default()
                .block(block)
                .gauge_style(Style::default().fg(theme.success).bg(theme.border_normal))
                .ratio(f64::from(profile.level_progress()) / f64::from(EXPERIENCE_PER_LEVEL))
                .label(label);
            frame.render_widget(gauge, size);
        }
        None => {
            let paragraph =
                Paragraph::new("No character yet").style(styling::muted_text_style(theme));
            frame.render_widget(paragraph.block(block), size);
        }
    }
}
