use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

// Dracula palette (https://draculatheme.com/contribute)
pub const BACKGROUND: Color = Color::Rgb(0x28, 0x2A, 0x36);
pub const CURRENT_LINE: Color = Color::Rgb(0x44, 0x47, 0x5A);
pub const FOREGROUND: Color = Color::Rgb(0xF8, 0xF8, 0xF2);
pub const COMMENT: Color = Color::Rgb(0x62, 0x72, 0xA4);

pub const CYAN: Color = Color::Rgb(0x8B, 0xE9, 0xFD);
pub const GREEN: Color = Color::Rgb(0x50, 0xFA, 0x7B);
pub const ORANGE: Color = Color::Rgb(0xFF, 0xB8, 0x6C);
pub const PINK: Color = Color::Rgb(0xFF, 0x79, 0xC6);
pub const RED: Color = Color::Rgb(0xFF, 0x55, 0x55);

pub const MODAL_OVERLAY: Color = Color::Rgb(0x1D, 0x1F, 0x27);

/// Default theme, tuned for dark terminals.
#[derive(Debug, Clone)]
pub struct DraculaTheme {
    roles: ThemeRoles,
}

impl DraculaTheme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: BACKGROUND,
                surface: BACKGROUND,
                surface_muted: CURRENT_LINE,
                border: CURRENT_LINE,

                text: FOREGROUND,
                text_secondary: COMMENT,
                text_muted: COMMENT,

                // pink marks interactive controls, cyan marks focus
                accent_primary: PINK,
                accent_secondary: CYAN,

                info: CYAN,
                success: GREEN,
                warning: ORANGE,
                error: RED,

                selection_bg: CURRENT_LINE,
                selection_fg: FOREGROUND,
                focus: CYAN,
                modal_bg: MODAL_OVERLAY,
            },
        }
    }
}

impl Default for DraculaTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme for DraculaTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
