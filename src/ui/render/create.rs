use super::Frame;
use crate::state::{FormField, RepeatKind, State};
use crate::ui::theme::Theme;
use crate::ui::widgets::{spinner, styling};
use crate::utils::text;
use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the quest creation/edit form.
///
pub fn form(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let form = state.form();
    let mut title = if form.editing.is_some() {
        "Edit Quest".to_string()
    } else {
        "New Quest".to_string()
    };
    if form.is_saving {
        title = format!("{} {}", title, spinner::frame(state));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme))
        .title(Span::styled(title, styling::active_block_title_style()));
    let inner = block.inner(size);
    frame.render_widget(block, size);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(5),
            Constraint::Min(3),
        ])
        .split(inner);

    fields(frame, rows[0], state, theme);
    description(frame, rows[1], state, theme);
    tasks(frame, rows[2], state, theme);
}

fn fields(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let form = state.form();
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    let line = |field: FormField, label: &str, value: String| {
        let value_style = if form.selected_field == field {
            styling::selected_list_item_style(theme)
        } else {
            styling::normal_text_style(theme)
        };
        Line::from(vec![
            Span::styled(format!(" {:<12}", label), styling::muted_text_style(theme)),
            Span::styled(value, value_style),
        ])
    };

    let repeat = match form.repeat_kind {
        RepeatKind::OneTime => "one-time".to_string(),
        RepeatKind::EveryWeeks => format!("every {} week(s)", form.repeat_interval_weeks),
    };
    let lines = vec![
        line(FormField::Title, "Title", form.title.clone()),
        line(
            FormField::DueDate,
            "Due",
            format!(
                "{} ({})",
                form.due_date.format("%Y-%m-%d"),
                text::format_due(form.due_date, Utc::now())
            ),
        ),
        line(
            FormField::Difficulty,
            "Difficulty",
            text::difficulty_stars(form.difficulty),
        ),
        line(
            FormField::MainQuest,
            "Main quest",
            yes_no(form.is_main_quest).to_string(),
        ),
        line(
            FormField::Active,
            "Active",
            yes_no(form.is_active).to_string(),
        ),
        line(FormField::Repeat, "Repeat", repeat),
        line(
            FormField::NotifyMe,
            "Notify me",
            yes_no(form.notify_me).to_string(),
        ),
    ];
    frame.render_widget(Paragraph::new(lines), size);
}

fn description(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let form = state.form();
    let border = if form.selected_field == FormField::Info {
        styling::active_block_border_style(theme)
    } else {
        styling::normal_block_border_style(theme)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title("Description");
    let inner = block.inner(size);
    frame.render_widget(block, size);
    frame.render_widget(&form.info, inner);
}

fn tasks(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let form = state.form();
    let selected = form.selected_field == FormField::Tasks;
    let border = if selected {
        styling::active_block_border_style(theme)
    } else {
        styling::normal_block_border_style(theme)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title("Sub-tasks");

    let mut lines: Vec<Line> = form
        .tasks
        .iter()
        .map(|t| Line::styled(format!("• {}", t), styling::normal_text_style(theme)))
        .collect();
    let input_style = if selected {
        styling::selected_list_item_style(theme)
    } else {
        styling::muted_text_style(theme)
    };
    lines.push(Line::styled(format!("> {}", form.task_input), input_style));

    frame.render_widget(Paragraph::new(lines).block(block), size);
}
