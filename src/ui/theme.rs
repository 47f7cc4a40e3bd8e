//! Theme definitions for tempconv
//!
//! Provides three built-in themes: Gruvbox, Nord, and Transparent.
//! Each theme defines colors for all UI elements.

use crate::config::ThemeName;
use ratatui::style::{Color, Modifier, Style};

/// Complete theme with all required colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,

    // Accent colors
    pub accent: Color,
    pub accent_dim: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,

    // Form colors
    pub input: Color,
    pub placeholder: Color,
    pub result: Color,
    pub formula: Color,
}

impl Theme {
    /// Create a theme from a theme name
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Gruvbox => Self::gruvbox(),
            ThemeName::Nord => Self::nord(),
            ThemeName::Transparent => Self::transparent(),
        }
    }

    /// Gruvbox dark theme (default)
    pub fn gruvbox() -> Self {
        Self {
            // Base
            bg: Color::Rgb(40, 40, 40),           // #282828
            fg: Color::Rgb(235, 219, 178),        // #ebdbb2
            fg_dim: Color::Rgb(146, 131, 116),    // #928374

            // Accent (orange)
            accent: Color::Rgb(254, 128, 25),     // #fe8019
            accent_dim: Color::Rgb(214, 93, 14),  // #d65d0e

            // Status
            success: Color::Rgb(184, 187, 38),    // #b8bb26
            warning: Color::Rgb(250, 189, 47),    // #fabd2f
            error: Color::Rgb(251, 73, 52),       // #fb4934

            // UI elements
            border: Color::Rgb(80, 73, 69),       // #504945
            border_focused: Color::Rgb(168, 153, 132), // #a89984
            selection_bg: Color::Rgb(80, 73, 69), // #504945
            selection_fg: Color::Rgb(235, 219, 178), // #ebdbb2

            // Form
            input: Color::Rgb(235, 219, 178),     // #ebdbb2
            placeholder: Color::Rgb(146, 131, 116), // #928374
            result: Color::Rgb(131, 165, 152),    // #83a598 (blue)
            formula: Color::Rgb(211, 134, 155),   // #d3869b (purple)
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            // Base (Polar Night)
            bg: Color::Rgb(46, 52, 64),           // #2e3440
            fg: Color::Rgb(236, 239, 244),        // #eceff4
            fg_dim: Color::Rgb(76, 86, 106),      // #4c566a

            // Accent (Frost - blue)
            accent: Color::Rgb(136, 192, 208),    // #88c0d0
            accent_dim: Color::Rgb(94, 129, 172), // #5e81ac

            // Status (Aurora)
            success: Color::Rgb(163, 190, 140),   // #a3be8c (green)
            warning: Color::Rgb(235, 203, 139),   // #ebcb8b (yellow)
            error: Color::Rgb(191, 97, 106),      // #bf616a (red)

            // UI elements
            border: Color::Rgb(59, 66, 82),       // #3b4252
            border_focused: Color::Rgb(136, 192, 208), // #88c0d0
            selection_bg: Color::Rgb(76, 86, 106),    // #4c566a
            selection_fg: Color::Rgb(236, 239, 244),  // #eceff4

            // Form
            input: Color::Rgb(236, 239, 244),     // #eceff4
            placeholder: Color::Rgb(76, 86, 106), // #4c566a
            result: Color::Rgb(129, 161, 193),    // #81a1c1 (blue)
            formula: Color::Rgb(180, 142, 173),   // #b48ead (purple)
        }
    }

    /// Transparent theme (uses terminal colors)
    pub fn transparent() -> Self {
        Self {
            // Base - use terminal defaults
            bg: Color::Reset,
            fg: Color::Reset,
            fg_dim: Color::DarkGray,

            // Accent
            accent: Color::Cyan,
            accent_dim: Color::Blue,

            // Status
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,

            // UI elements
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            selection_bg: Color::DarkGray,
            selection_fg: Color::White,

            // Form
            input: Color::Reset,
            placeholder: Color::DarkGray,
            result: Color::Blue,
            formula: Color::Magenta,
        }
    }

    // Style helpers for common UI patterns

    /// Base block style (background fill)
    pub fn block_style(&self) -> Style {
        Style::default().bg(self.bg)
    }

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Dimmed text style
    pub fn text_dim(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    /// Title/header style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected item style
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Border style (unfocused)
    pub fn border(&self) -> Style {
        Style::default().fg(self.border).bg(self.bg)
    }

    /// Border style (focused)
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused).bg(self.bg)
    }

    /// Tab style (inactive)
    pub fn tab_inactive(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    /// Tab style (active)
    pub fn tab_active(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Success message style
    pub fn success(&self) -> Style {
        Style::default().fg(self.success).bg(self.bg)
    }

    /// Warning message style
    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning).bg(self.bg)
    }

    /// Error message style
    pub fn error(&self) -> Style {
        Style::default().fg(self.error).bg(self.bg)
    }

    /// Typed value in the input field
    pub fn input(&self) -> Style {
        Style::default().fg(self.input).bg(self.bg)
    }

    /// Placeholder text in an empty input field
    pub fn placeholder(&self) -> Style {
        Style::default()
            .fg(self.placeholder)
            .bg(self.bg)
            .add_modifier(Modifier::ITALIC)
    }

    /// Converted result value
    pub fn result(&self) -> Style {
        Style::default()
            .fg(self.result)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Formula text under the result
    pub fn formula(&self) -> Style {
        Style::default()
            .fg(self.formula)
            .bg(self.bg)
            .add_modifier(Modifier::ITALIC)
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
}
