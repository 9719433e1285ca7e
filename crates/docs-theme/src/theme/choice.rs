//! Initial theme selection.

use super::theme::Theme;

/// Which input decided the theme applied at page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    /// A previously persisted preference.
    Stored,
    /// The OS "prefers dark" signal.
    System,
    /// Neither was available; light is used.
    Default,
}

impl ThemeSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeSource::Stored => "stored",
            ThemeSource::System => "system",
            ThemeSource::Default => "default",
        }
    }
}

/// Resolves the theme to apply before the page finishes loading.
///
/// A stored preference always wins. Otherwise the OS signal decides, and an
/// unavailable signal counts as "prefers light".
///
/// # Example
///
/// ```rust
/// use docs_theme::{resolve_initial_theme, Theme, ThemeSource};
///
/// assert_eq!(
///     resolve_initial_theme(Some(Theme::Light), Some(true)),
///     (Theme::Light, ThemeSource::Stored),
/// );
/// assert_eq!(
///     resolve_initial_theme(None, Some(true)),
///     (Theme::Dark, ThemeSource::System),
/// );
/// ```
pub fn resolve_initial_theme(
    stored: Option<Theme>,
    prefers_dark: Option<bool>,
) -> (Theme, ThemeSource) {
    match (stored, prefers_dark) {
        (Some(theme), _) => (theme, ThemeSource::Stored),
        (None, Some(prefers_dark)) => (Theme::from_prefers_dark(prefers_dark), ThemeSource::System),
        (None, None) => (Theme::Light, ThemeSource::Default),
    }
}
