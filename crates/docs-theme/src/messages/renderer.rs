//! Pre-compiled message templates.

use minijinja::{context, Environment, Error};

use super::filters::register_filters;
use crate::config::ThemeConfig;
use crate::theme::Theme;

const TOGGLE_LABEL: &str = "toggle_label";
const ANNOUNCEMENT: &str = "announcement";

/// Renders the user-facing strings of the toggle.
///
/// Both templates see `theme` (the active theme name) and `next` (the theme a
/// click would switch to). Templates are compiled once, when the controller is
/// installed, so syntax errors surface as configuration errors.
///
/// # Example
///
/// ```rust
/// use docs_theme::{Messages, Theme};
///
/// let messages = Messages::new(
///     "Passer en mode {{ next }}",
///     "Mode {{ theme }} activé",
/// ).unwrap();
/// assert_eq!(messages.toggle_label(Theme::Dark), "Passer en mode light");
/// assert_eq!(messages.announcement(Theme::Dark), "Mode dark activé");
/// ```
pub struct Messages {
    env: Environment<'static>,
}

impl Messages {
    /// Compiles the label and announcement templates.
    ///
    /// # Errors
    ///
    /// Returns an error if either template has invalid syntax.
    pub fn new(toggle_label: &str, announcement: &str) -> Result<Self, Error> {
        let mut env = Environment::new();
        register_filters(&mut env);
        env.add_template_owned(TOGGLE_LABEL, toggle_label.to_string())?;
        env.add_template_owned(ANNOUNCEMENT, announcement.to_string())?;
        Ok(Self { env })
    }

    pub fn from_config(config: &ThemeConfig) -> Result<Self, Error> {
        Self::new(&config.toggle_label, &config.announcement)
    }

    /// Label naming the action a click performs while `current` is active.
    pub fn toggle_label(&self, current: Theme) -> String {
        self.render(TOGGLE_LABEL, current)
            .unwrap_or_else(|| format!("Switch to {} mode", current.opposite()))
    }

    /// Text announced after switching to `theme`.
    pub fn announcement(&self, theme: Theme) -> String {
        self.render(ANNOUNCEMENT, theme)
            .unwrap_or_else(|| format!("Switched to {} mode", theme))
    }

    fn render(&self, name: &str, theme: Theme) -> Option<String> {
        let result = self.env.get_template(name).and_then(|tmpl| {
            tmpl.render(context! {
                theme => theme.as_str(),
                next => theme.opposite().as_str(),
            })
        });
        match result {
            Ok(text) => Some(text),
            Err(err) => {
                tracing::warn!(template = name, error = %err, "message template failed; using built-in text");
                None
            }
        }
    }
}

impl std::fmt::Debug for Messages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Messages").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Messages {
        Messages::from_config(&ThemeConfig::default()).unwrap()
    }

    #[test]
    fn test_default_label_names_the_next_action() {
        let messages = defaults();
        assert_eq!(messages.toggle_label(Theme::Dark), "Switch to light mode");
        assert_eq!(messages.toggle_label(Theme::Light), "Switch to dark mode");
    }

    #[test]
    fn test_default_announcement() {
        let messages = defaults();
        assert_eq!(messages.announcement(Theme::Dark), "Switched to dark mode");
        assert_eq!(messages.announcement(Theme::Light), "Switched to light mode");
    }

    #[test]
    fn test_invalid_syntax_is_rejected() {
        assert!(Messages::new("{{ theme", "ok").is_err());
        assert!(Messages::new("ok", "{% if %}").is_err());
    }

    #[test]
    fn test_render_failure_falls_back_to_builtin_text() {
        let messages = Messages::new("{{ theme | no_such_filter }}", "{{ theme | no_such_filter }}");
        // Unknown filters are reported either at compile or render time.
        if let Ok(messages) = messages {
            assert_eq!(messages.toggle_label(Theme::Light), "Switch to dark mode");
            assert_eq!(messages.announcement(Theme::Light), "Switched to light mode");
        }
    }
}
