//! Color themes for the terminal browser
//!
//! Two palettes, dark and light. `ThemeMode::System` uses the dark one since
//! terminals don't report their background reliably.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeMode;

/// Colors of one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub text: Color,
    pub dim: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub border: Color,
}

impl Palette {
    /// Dark palette: TMDB navy with teal/green accents
    pub const DARK: Palette = Palette {
        background: Color::Rgb(0x0d, 0x25, 0x3f),
        surface: Color::Rgb(0x13, 0x31, 0x52),
        primary: Color::Rgb(0x01, 0xb4, 0xe4),
        secondary: Color::Rgb(0x90, 0xce, 0xa1),
        accent: Color::Rgb(0xf5, 0xc5, 0x18),
        text: Color::Rgb(0xe8, 0xee, 0xf4),
        dim: Color::Rgb(0x8a, 0x9b, 0xb0),
        success: Color::Rgb(0x21, 0xd0, 0x7a),
        warning: Color::Rgb(0xf5, 0xa6, 0x23),
        error: Color::Rgb(0xff, 0x5a, 0x5f),
        border: Color::Rgb(0x2c, 0x5a, 0x80),
    };

    /// Light palette
    pub const LIGHT: Palette = Palette {
        background: Color::Rgb(0xfa, 0xfa, 0xfa),
        surface: Color::Rgb(0xe9, 0xee, 0xf2),
        primary: Color::Rgb(0x03, 0x5e, 0x85),
        secondary: Color::Rgb(0x1b, 0x6b, 0x3a),
        accent: Color::Rgb(0x8a, 0x4b, 0x00),
        text: Color::Rgb(0x1a, 0x1a, 0x1a),
        dim: Color::Rgb(0x5c, 0x66, 0x70),
        success: Color::Rgb(0x14, 0x6c, 0x2e),
        warning: Color::Rgb(0x8a, 0x4b, 0x00),
        error: Color::Rgb(0xb0, 0x00, 0x20),
        border: Color::Rgb(0x9a, 0xa8, 0xb4),
    };
}

/// Style helpers over the active palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    mode: ThemeMode,
    pub palette: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_mode(ThemeMode::default())
    }
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        let palette = match mode {
            ThemeMode::Light => Palette::LIGHT,
            ThemeMode::Dark | ThemeMode::System => Palette::DARK,
        };
        Self { mode, palette }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Screen background
    pub fn base(&self) -> Style {
        Style::default().fg(self.palette.text).bg(self.palette.background)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.palette.text)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.palette.dim)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected list row
    pub fn highlighted(&self) -> Style {
        Style::default()
            .fg(self.palette.background)
            .bg(self.palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected filter chip / active tab
    pub fn chip_selected(&self) -> Style {
        Style::default()
            .fg(self.palette.background)
            .bg(self.palette.secondary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn chip(&self) -> Style {
        Style::default().fg(self.palette.dim).bg(self.palette.surface)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.palette.border)
    }

    pub fn border_focused(&self) -> Style {
        Style::default()
            .fg(self.palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent(&self) -> Style {
        Style::default()
            .fg(self.palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn year(&self) -> Style {
        Style::default().fg(self.palette.secondary)
    }

    pub fn keybind(&self) -> Style {
        Style::default().fg(self.palette.accent)
    }

    pub fn loading(&self) -> Style {
        Style::default()
            .fg(self.palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.palette.error)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.palette.text).bg(self.palette.surface)
    }

    /// Rating color: green from 7, amber from 5, dim below
    pub fn rating(&self, vote_average: f32) -> Style {
        if vote_average >= 7.0 {
            Style::default().fg(self.palette.success)
        } else if vote_average >= 5.0 {
            Style::default().fg(self.palette.warning)
        } else {
            self.dimmed()
        }
    }
}

// =============================================================================
// Color Utilities
// =============================================================================

/// WCAG relative luminance
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn linear(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b)
}

/// Contrast ratio between 1 (same color) and 21 (black on white)
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let a = relative_luminance(fg.0, fg.1, fg.2);
    let b = relative_luminance(bg.0, bg.1, bg.2);
    let (hi, lo) = if a > b { (a, b) } else { (b, a) };
    (hi + 0.05) / (lo + 0.05)
}

pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}
