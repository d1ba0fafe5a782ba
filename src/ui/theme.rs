//! Colors for dicebox
//!
//! Three palettes ship built in. Gruvbox and Nord use true color, while
//! Transparent sticks to the terminal's own ANSI colors.

use crate::config::ThemeName;
use ratatui::style::{Color, Modifier, Style};

/// Palette plus the styles derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,
    pub accent: Color,
    pub success: Color,
    pub error: Color,
    pub border: Color,
    pub border_focused: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    /// Rolled values in the results row
    pub die_face: Color,
    pub sum: Color,
}

/// `0xRRGGBB` to a true color
const fn hex(rgb: u32) -> Color {
    Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

const GRUVBOX: Theme = Theme {
    bg: hex(0x282828),
    fg: hex(0xebdbb2),
    fg_dim: hex(0x928374),
    accent: hex(0xfe8019),
    success: hex(0xb8bb26),
    error: hex(0xfb4934),
    border: hex(0x504945),
    border_focused: hex(0xa89984),
    selection_bg: hex(0x504945),
    selection_fg: hex(0xebdbb2),
    die_face: hex(0x83a598),
    sum: hex(0xfabd2f),
};

const NORD: Theme = Theme {
    bg: hex(0x2e3440),
    fg: hex(0xeceff4),
    fg_dim: hex(0x4c566a),
    accent: hex(0x88c0d0),
    success: hex(0xa3be8c),
    error: hex(0xbf616a),
    border: hex(0x3b4252),
    border_focused: hex(0x88c0d0),
    selection_bg: hex(0x4c566a),
    selection_fg: hex(0xeceff4),
    die_face: hex(0x81a1c1),
    sum: hex(0xebcb8b),
};

const TRANSPARENT: Theme = Theme {
    bg: Color::Reset,
    fg: Color::Reset,
    fg_dim: Color::DarkGray,
    accent: Color::Cyan,
    success: Color::Green,
    error: Color::Red,
    border: Color::DarkGray,
    border_focused: Color::Cyan,
    selection_bg: Color::DarkGray,
    selection_fg: Color::White,
    die_face: Color::Blue,
    sum: Color::Yellow,
};

impl Theme {
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Gruvbox => Self::gruvbox(),
            ThemeName::Nord => Self::nord(),
            ThemeName::Transparent => Self::transparent(),
        }
    }

    /// Default palette
    pub fn gruvbox() -> Self {
        GRUVBOX
    }

    pub fn nord() -> Self {
        NORD
    }

    pub fn transparent() -> Self {
        TRANSPARENT
    }

    /// `color` on the panel background
    fn on_bg(&self, color: Color) -> Style {
        Style::new().fg(color).bg(self.bg)
    }

    fn strong(&self, color: Color) -> Style {
        self.on_bg(color).add_modifier(Modifier::BOLD)
    }

    pub fn block_style(&self) -> Style {
        Style::new().bg(self.bg)
    }

    pub fn text(&self) -> Style {
        self.on_bg(self.fg)
    }

    pub fn text_dim(&self) -> Style {
        self.on_bg(self.fg_dim)
    }

    pub fn title(&self) -> Style {
        self.strong(self.accent)
    }

    /// Highlighted row in a dropdown list, or a focused control
    pub fn selected(&self) -> Style {
        Style::new()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        self.on_bg(self.border)
    }

    pub fn border_focused(&self) -> Style {
        self.on_bg(self.border_focused)
    }

    pub fn button(&self) -> Style {
        self.on_bg(self.accent)
    }

    /// Clear before the first store, and the sum checkbox while rolling
    pub fn button_disabled(&self) -> Style {
        self.text_dim().add_modifier(Modifier::DIM)
    }

    pub fn success(&self) -> Style {
        self.on_bg(self.success)
    }

    pub fn error(&self) -> Style {
        self.on_bg(self.error)
    }

    pub fn die_face(&self) -> Style {
        self.strong(self.die_face)
    }

    pub fn sum(&self) -> Style {
        self.strong(self.sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name() {
        let gruvbox = Theme::from_name(ThemeName::Gruvbox);
        assert_eq!(gruvbox.bg, Color::Rgb(40, 40, 40));

        let nord = Theme::from_name(ThemeName::Nord);
        assert_eq!(nord.bg, Color::Rgb(46, 52, 64));

        let transparent = Theme::from_name(ThemeName::Transparent);
        assert_eq!(transparent.bg, Color::Reset);
    }

    #[test]
    fn test_hex_splits_channels() {
        assert_eq!(hex(0xfe8019), Color::Rgb(254, 128, 25));
        assert_eq!(hex(0x000000), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_error_style_is_red_family() {
        let theme = Theme::transparent();
        assert_eq!(theme.error().fg, Some(Color::Red));
    }

    #[test]
    fn test_rolled_values_stand_out() {
        let theme = Theme::nord();
        assert!(theme.die_face().add_modifier.contains(Modifier::BOLD));
        assert!(theme.sum().add_modifier.contains(Modifier::BOLD));
        assert!(!theme.text().add_modifier.contains(Modifier::BOLD));
        assert_eq!(theme.sum().bg, Some(theme.bg));
    }
}
