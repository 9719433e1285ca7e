//! Theme values and initial theme resolution.
//!
//! This module provides:
//!
//! - [`Theme`]: The light or dark mode applied to the page
//! - [`resolve_initial_theme`]: Stored preference, then OS signal, then light
//! - [`ThemeSource`]: Which of those decided the initial theme
//! - [`detect_system_theme`]: OS detection for native hosts, overridable
//!   through [`set_theme_detector`]

mod adaptive;
mod choice;
#[allow(clippy::module_inception)]
mod theme;

pub use adaptive::{detect_system_theme, reset_theme_detector, set_theme_detector};
pub use choice::{resolve_initial_theme, ThemeSource};
pub use theme::Theme;
