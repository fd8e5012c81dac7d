//! Theme and styling definitions for the equipHelper TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color palette for the TUI.
pub struct Palette;

impl Palette {
    // Base colors
    pub const BG: Color = Color::Rgb(28, 24, 20);
    pub const FG: Color = Color::Rgb(225, 220, 210);
    pub const DIM: Color = Color::Rgb(150, 140, 130);

    // Sender colors, matching the exported document
    pub const USER: Color = Color::Rgb(0, 102, 204);
    pub const ASSISTANT: Color = Color::Rgb(255, 165, 0);

    // Status colors
    pub const SUCCESS: Color = Color::Rgb(130, 220, 130);
    pub const ERROR: Color = Color::Rgb(240, 100, 100);

    // Border colors
    pub const BORDER: Color = Color::Rgb(90, 80, 70);
    pub const BORDER_ACTIVE: Color = Color::Rgb(255, 165, 0);
}

/// Spinner frames for the loading indicator.
pub struct Symbols;

impl Symbols {
    pub const SPINNER: [&'static str; 4] = ["|", "/", "-", "\\"];
}

/// Common styles used throughout the TUI.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::BG)
    }

    /// Dimmed text for secondary information.
    pub fn dim() -> Style {
        Style::default().fg(Palette::DIM).bg(Palette::BG)
    }

    /// User-authored text.
    pub fn user() -> Style {
        Style::default().fg(Palette::USER).bg(Palette::BG)
    }

    /// Assistant-authored text.
    pub fn assistant() -> Style {
        Style::default().fg(Palette::ASSISTANT).bg(Palette::BG)
    }

    /// Highlighted/selected item.
    pub fn highlight() -> Style {
        Style::default()
            .fg(Palette::ASSISTANT)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Success notification.
    pub fn success() -> Style {
        Style::default().fg(Palette::SUCCESS).bg(Palette::BG)
    }

    /// Error notification.
    pub fn error() -> Style {
        Style::default().fg(Palette::ERROR).bg(Palette::BG)
    }

    /// Border of an unfocused pane.
    pub fn border() -> Style {
        Style::default().fg(Palette::BORDER)
    }

    /// Border of the focused pane.
    pub fn border_active() -> Style {
        Style::default().fg(Palette::BORDER_ACTIVE)
    }
}
