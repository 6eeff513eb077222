// SPDX-License-Identifier: MPL-2.0
//! Light, dark and system-following color schemes.

use crate::ui::design_tokens::{opacity, palette};
use iced::{Color, Theme};
use serde::{Deserialize, Serialize};

/// Color palette for a theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    /// Window background around the book.
    pub desk: Color,

    // Book surfaces
    pub paper: Color,
    pub paper_back: Color,
    pub page_edge: Color,
    pub spine: Color,

    // Text colors
    pub ink: Color,
    pub ink_muted: Color,
    pub chrome_text: Color,

    /// Veil over the placeholder panel.
    pub placeholder: Color,

    pub error: Color,
}

impl ColorScheme {
    /// Light theme (Light mode).
    #[must_use]
    pub fn light() -> Self {
        Self {
            desk: palette::DESK_LIGHT,
            paper: palette::PAPER,
            paper_back: palette::PAPER_DIM,
            page_edge: palette::PAGE_EDGE,
            spine: palette::SPINE,
            ink: palette::INK,
            ink_muted: palette::INK_MUTED,
            chrome_text: palette::GRAY_700,
            placeholder: Color {
                a: opacity::OVERLAY_SUBTLE,
                ..palette::GRAY_400
            },
            error: palette::ERROR_500,
        }
    }

    /// Dark theme (Dark mode). Pages stay paper-colored; only the desk dims.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            desk: palette::DESK_DARK,
            chrome_text: palette::GRAY_200,
            ..Self::light()
        }
    }

    /// Detects the system theme and returns the appropriate `ColorScheme`.
    #[must_use]
    pub fn from_system() -> Self {
        if let Ok(dark_light::Mode::Light) = dark_light::detect() {
            Self::light()
        } else {
            Self::dark() // Default to dark for Dark mode or on error
        }
    }
}

/// Resolved theme: the colors plus the mode they came from.
#[derive(Debug, Clone)]
pub struct AppTheme {
    pub colors: ColorScheme,
    pub mode: ThemeMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Returns true if the effective theme is dark.
    /// For System mode, detects the actual system theme.
    #[must_use]
    pub fn is_dark(self) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::System => !matches!(dark_light::detect(), Ok(dark_light::Mode::Light)),
        }
    }
}

impl AppTheme {
    #[must_use]
    pub fn new(mode: ThemeMode) -> Self {
        let colors = match mode {
            ThemeMode::Light => ColorScheme::light(),
            ThemeMode::Dark => ColorScheme::dark(),
            ThemeMode::System => ColorScheme::from_system(),
        };

        Self { colors, mode }
    }

    /// Built-in iced theme for the chrome around the book.
    #[must_use]
    pub fn iced_theme(&self) -> Theme {
        if self.colors.desk == palette::DESK_DARK {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

impl Default for AppTheme {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}
