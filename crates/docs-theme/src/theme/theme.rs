//! The light/dark theme value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThemeParseError;

/// The visual mode applied to the page.
///
/// Serializes as the lowercase names stored in preferences and written to the
/// document root attribute.
///
/// # Example
///
/// ```rust
/// use docs_theme::Theme;
///
/// let theme: Theme = "dark".parse().unwrap();
/// assert_eq!(theme.opposite(), Theme::Light);
/// assert_eq!(theme.to_string(), "dark");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Both themes, light first.
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    /// Returns the stored/attribute name of the theme.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Returns the other theme; toggling always moves here.
    pub fn opposite(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Maps the OS "prefers dark color scheme" signal to a theme.
    pub fn from_prefers_dark(prefers_dark: bool) -> Theme {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ThemeParseError::new(other)),
        }
    }
}
