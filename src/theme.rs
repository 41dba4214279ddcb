//! Light and dark color schemes.
//!
//! The active scheme lives in a [`ThemeContext`] that is handed to every
//! renderer explicitly; nothing here is global.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Used for the delete marker in both schemes
pub const PERU: Color = Color::Rgb(205, 133, 63);

/// Which palette is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ColorScheme {
    pub fn toggled(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }
}

/// Configured scheme preference, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemePreference {
    #[default]
    System,
    Light,
    Dark,
}

impl SchemePreference {
    /// Resolve the preference, consulting the terminal for `System`.
    pub fn resolve(self) -> ColorScheme {
        match self {
            SchemePreference::Light => ColorScheme::Light,
            SchemePreference::Dark => ColorScheme::Dark,
            SchemePreference::System => {
                scheme_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
            }
        }
    }
}

/// Read the `COLORFGBG` hint (`"fg;bg"`). A white background means light.
pub fn scheme_from_colorfgbg(value: Option<&str>) -> ColorScheme {
    let bg = value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match bg {
        Some(7) | Some(15) => ColorScheme::Light,
        _ => ColorScheme::Dark,
    }
}

/// Colors consumed by the screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub button: Color,
}

impl Theme {
    pub fn light() -> Self {
        Theme {
            background: Color::Rgb(255, 255, 255),
            text: Color::Rgb(17, 24, 28),
            button: Color::Rgb(17, 24, 28),
        }
    }

    pub fn dark() -> Self {
        Theme {
            background: Color::Rgb(0, 0, 0),
            text: Color::Rgb(236, 237, 238),
            button: Color::Rgb(255, 255, 255),
        }
    }

    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Theme::light(),
            ColorScheme::Dark => Theme::dark(),
        }
    }

    /// Base style for a screen.
    pub fn base(&self) -> Style {
        Style::default().bg(self.background).fg(self.text)
    }

    /// Completed tasks: gray and struck through.
    pub fn muted(&self) -> Style {
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::CROSSED_OUT)
    }

    /// Primary action button.
    pub fn button_style(&self) -> Style {
        Style::default()
            .bg(self.button)
            .fg(self.background)
            .add_modifier(Modifier::BOLD)
    }

    /// Destructive or cancel action.
    pub fn danger(&self) -> Style {
        Style::default().bg(Color::Red).fg(Color::White)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(Color::Gray)
    }
}

/// The active scheme plus its resolved colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeContext {
    color_scheme: ColorScheme,
    theme: Theme,
}

impl ThemeContext {
    pub fn new(color_scheme: ColorScheme) -> Self {
        ThemeContext {
            color_scheme,
            theme: Theme::for_scheme(color_scheme),
        }
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.color_scheme
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        self.color_scheme = scheme;
        self.theme = Theme::for_scheme(scheme);
        tracing::debug!(scheme = scheme.label(), "color scheme changed");
    }

    pub fn toggle(&mut self) {
        self.set_color_scheme(self.color_scheme.toggled());
    }

    /// Glyph shown on the theme toggle.
    pub fn toggle_icon(&self) -> &'static str {
        match self.color_scheme {
            ColorScheme::Dark => "☾",
            ColorScheme::Light => "☀",
        }
    }
}

impl Default for ThemeContext {
    fn default() -> Self {
        ThemeContext::new(ColorScheme::Dark)
    }
}
