//! OS color scheme detection for native hosts.

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;
use std::sync::Mutex;

use super::theme::Theme;

type ThemeDetector = fn() -> Theme;

static THEME_DETECTOR: Lazy<Mutex<ThemeDetector>> = Lazy::new(|| Mutex::new(os_theme_detector));

/// Overrides the detector used to determine whether the OS prefers a light or dark theme.
///
/// This is useful for testing or when you want to force a specific theme.
pub fn set_theme_detector(detector: ThemeDetector) {
    let mut guard = THEME_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = detector;
}

/// Restores detection through the operating system.
pub fn reset_theme_detector() {
    set_theme_detector(os_theme_detector);
}

/// Returns the theme the OS currently prefers.
pub fn detect_system_theme() -> Theme {
    let detector = THEME_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    (*detector)()
}

fn os_theme_detector() -> Theme {
    match detect_os_theme() {
        OsThemeMode::Dark => Theme::Dark,
        OsThemeMode::Light => Theme::Light,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial(theme_detector)]
    fn test_detector_override_is_used() {
        set_theme_detector(|| Theme::Dark);
        assert_eq!(detect_system_theme(), Theme::Dark);

        set_theme_detector(|| Theme::Light);
        assert_eq!(detect_system_theme(), Theme::Light);

        reset_theme_detector();
    }
}
