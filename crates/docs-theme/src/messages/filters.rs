//! MiniJinja filter registration.

use minijinja::{Environment, Value};

use crate::theme::Theme;

/// Registers the message filters on a minijinja environment.
pub(crate) fn register_filters(env: &mut Environment<'static>) {
    // Maps a theme name to the other theme; unknown names pass through.
    // Usage: {{ theme | opposite }} renders "light" for "dark"
    env.add_filter("opposite", |value: Value| -> String {
        let name = value.to_string();
        match name.parse::<Theme>() {
            Ok(theme) => theme.opposite().to_string(),
            Err(_) => name,
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(source: &str, theme: &str) -> String {
        let mut env = Environment::new();
        register_filters(&mut env);
        env.render_str(source, minijinja::context! { theme => theme })
            .unwrap()
    }

    #[test]
    fn test_opposite_filter_flips_theme_names() {
        assert_eq!(render("{{ theme | opposite }}", "dark"), "light");
        assert_eq!(render("{{ theme | opposite }}", "light"), "dark");
    }

    #[test]
    fn test_opposite_filter_passes_unknown_names() {
        assert_eq!(render("{{ theme | opposite }}", "sepia"), "sepia");
    }
}
