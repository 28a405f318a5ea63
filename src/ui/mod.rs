//! User interface module.
//!
//! This module handles all UI rendering using the `ratatui` library,
//! including terminal layout, widget components (spinner, styling), and
//! view rendering (quest list, forms, log pane).

type Frame<'a> = ratatui::Frame<'a>;

mod render;
mod theme;
mod widgets;

pub const SPINNER_FRAME_COUNT: usize = widgets::spinner::FRAMES.len();

pub use render::render;
