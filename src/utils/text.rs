//! Text formatting helpers for the views.

use crate::store::{MAX_DIFFICULTY, MAX_PROGRESS};
use chrono::{DateTime, Utc};

/// Render a difficulty as filled and hollow stars, e.g. `★★★☆☆`.
///
pub fn difficulty_stars(difficulty: u8) -> String {
    let filled = difficulty.min(MAX_DIFFICULTY) as usize;
    let mut stars = "★".repeat(filled);
    stars.push_str(&"☆".repeat(MAX_DIFFICULTY as usize - filled));
    stars
}

/// Render a progress percentage as a fixed-width textual bar.
///
pub fn progress_bar(progress: u8, width: usize) -> String {
    let progress = progress.min(MAX_PROGRESS) as usize;
    let filled = progress * width / MAX_PROGRESS as usize;
    format!(
        "[{}{}] {:>3}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        progress
    )
}

/// Truncate text to a maximum character width, appending an ellipsis when
/// anything was cut.
///
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// Render a due date relative to now, e.g. `due in 3d` or `overdue 2d`.
///
pub fn format_due(due: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (due.date_naive() - now.date_naive()).num_days();
    match days {
        0 => "due today".to_string(),
        d if d > 0 => format!("due in {}d", d),
        d => format!("overdue {}d", -d),
    }
}
