use super::Frame;
use crate::state::State;
use crate::store::{Quest, Repeat};
use crate::ui::theme::Theme;
use crate::ui::widgets::{spinner, styling};
use crate::utils::text;
use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

const PROGRESS_BAR_WIDTH: usize = 20;

/// Render the quest list view: tabs, the filtered list, and the detail
/// pane for the selected quest.
///
pub fn quests(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(9),
        ])
        .split(size);

    tabs(frame, rows[0], state, theme);
    list(frame, rows[1], state, theme);
    detail(frame, rows[2], state, theme);
}

fn tabs(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let titles: Vec<Line> = crate::state::QuestTab::ALL
        .iter()
        .map(|t| Line::from(t.name()))
        .collect();
    let selected = crate::state::QuestTab::ALL
        .iter()
        .position(|t| *t == state.selected_tab())
        .unwrap_or(0);

    let widget = Tabs::new(titles)
        .select(selected)
        .style(styling::muted_text_style(theme))
        .highlight_style(styling::selected_list_item_style(theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styling::normal_block_border_style(theme))
                .title(format!("Quests · status: {}", state.status_filter().name())),
        );
    frame.render_widget(widget, size);
}

fn list(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme));

    let visible = state.visible_quests();
    if visible.is_empty() {
        if state.is_fetching() {
            frame.render_widget(spinner::widget(state, size.height).block(block), size);
        } else {
            let empty = Paragraph::new("No quests here. Press 'n' to begin one.")
                .style(styling::muted_text_style(theme));
            frame.render_widget(empty.block(block), size);
        }
        return;
    }

    let now = Utc::now();
    let items: Vec<ListItem> = visible.iter().map(|q| list_item(q, theme, now)).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(styling::selected_list_item_style(theme))
        .highlight_symbol("❯ ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected_index()));
    frame.render_stateful_widget(list, size, &mut list_state);
}

fn list_item<'a>(quest: &'a Quest, theme: &Theme, now: chrono::DateTime<Utc>) -> ListItem<'a> {
    let marker = if quest.is_main_quest { "▲" } else { "▽" };
    let check = if quest.is_completed { " ✓" } else { "" };
    let title_line = Line::from(vec![
        Span::styled(
            format!("{} {}{}", marker, text::truncate_with_ellipsis(&quest.title, 40), check),
            styling::normal_text_style(theme),
        ),
        Span::raw("  "),
        Span::styled(
            text::difficulty_stars(quest.difficulty),
            Style::default().fg(theme.warning),
        ),
        Span::raw("  "),
        Span::styled(
            text::format_due(quest.due_date, now),
            styling::muted_text_style(theme),
        ),
    ]);
    let status = if quest.is_active { "active" } else { "inactive" };
    let progress_line = Line::from(vec![
        Span::styled(
            format!("  {}", text::progress_bar(quest.progress, PROGRESS_BAR_WIDTH)),
            styling::normal_text_style(theme),
        ),
        Span::styled(format!("  {}", status), styling::muted_text_style(theme)),
    ]);
    ListItem::new(vec![title_line, progress_line])
}

fn detail(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme))
        .title("Details");

    let Some(quest) = state.selected_quest() else {
        frame.render_widget(block, size);
        return;
    };

    let mut lines: Vec<Line> = vec![];
    if !quest.info.is_empty() {
        lines.push(Line::styled(
            quest.info.clone(),
            styling::normal_text_style(theme),
        ));
    }
    let repeat = match quest.repeat {
        Repeat::OneTime => "one-time".to_string(),
        Repeat::EveryWeeks { interval } => format!("repeats every {} week(s)", interval),
    };
    lines.push(Line::styled(repeat, styling::muted_text_style(theme)));
    for (index, task) in quest.tasks.iter().enumerate() {
        let check = if task.is_completed { "[x]" } else { "[ ]" };
        lines.push(Line::styled(
            format!("{} {}. {}", check, index + 1, task.title),
            styling::normal_text_style(theme),
        ));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, size);
}
