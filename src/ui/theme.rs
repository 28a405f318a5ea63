//! Color theme for the interface.

use ratatui::style::Color;

/// Named colors used across the views.
///
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub text: Color,
    pub text_muted: Color,
    pub border_normal: Color,
    pub border_active: Color,
    pub warning: Color,
    pub success: Color,
}

/// Tokyo-night flavored defaults.
///
impl Default for Theme {
    fn default() -> Theme {
        Theme {
            primary: Color::Rgb(122, 162, 247),
            secondary: Color::Rgb(187, 154, 247),
            text: Color::Rgb(192, 202, 245),
            text_muted: Color::Rgb(86, 95, 137),
            border_normal: Color::Rgb(59, 66, 97),
            border_active: Color::Rgb(122, 162, 247),
            warning: Color::Rgb(224, 175, 104),
            success: Color::Rgb(158, 206, 106),
        }
    }
}
