//! Command definitions and handlers for the `docs-theme` binary.
//!
//! Each command runs a headless [`ThemeController`] against the JSON
//! preference file, so the file ends up exactly as a browser toggle would
//! leave its `localStorage`.

use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use console::Style;
use docs_theme::platform::memory::{ManualTimer, MemoryPage};
use docs_theme::platform::native::{JsonFileStore, SystemColorScheme};
use docs_theme::{
    Capabilities, ColorSchemeSource, PreferenceStore, Theme, ThemeConfig, ThemeController,
    ThemeParseError,
};

#[derive(Debug, Parser)]
#[command(name = "docs-theme", author, version, about)]
pub struct Cli {
    /// JSON file holding the persisted preference.
    #[arg(long, global = true, default_value = "docs-theme.json")]
    pub store: PathBuf,

    /// JSON configuration (storage keys, messages, shortcut).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the stored preference, the OS preference and the resulting theme.
    Status,
    /// Switch to the opposite theme, as the page button does.
    Toggle,
    /// Switch to the given theme unless it is already active.
    Set {
        #[arg(value_parser = parse_theme)]
        theme: Theme,
    },
}

fn parse_theme(value: &str) -> Result<Theme, ThemeParseError> {
    value.parse()
}

/// A controller mounted on an in-memory page backed by the preference file.
struct Session {
    page: Rc<MemoryPage>,
    timer: Rc<ManualTimer>,
    store: Rc<JsonFileStore>,
    controller: ThemeController,
}

impl Session {
    fn open(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => ThemeConfig::load(path)?,
            None => ThemeConfig::default(),
        };
        let page = Rc::new(MemoryPage::new());
        let timer = Rc::new(ManualTimer::new());
        let store = Rc::new(JsonFileStore::new(&cli.store));

        // Surface storage problems here; the controller itself only logs them.
        store
            .get(&config.storage_key)
            .with_context(|| format!("cannot use preference file {}", cli.store.display()))?;

        let caps = Capabilities::new(page.clone(), timer.clone())
            .with_store(store.clone())
            .with_color_scheme(Rc::new(SystemColorScheme));
        let controller = ThemeController::install(config, caps)?;
        Ok(Self {
            page,
            timer,
            store,
            controller,
        })
    }

    /// Toggles and returns the announcement a screen reader would hear.
    fn toggle(&self) -> Result<String> {
        let theme = self.controller.toggle();
        let key = &self.controller.config().storage_key;
        if self.store.get(key)?.as_deref() != Some(theme.as_str()) {
            bail!("failed to persist theme to {}", self.store.path().display());
        }

        let announcement = self
            .page
            .find_in_body("aria-live", "polite")
            .into_iter()
            .filter_map(|node| self.page.element(node))
            .map(|element| element.text)
            .last()
            .unwrap_or_default();
        self.timer.advance(self.controller.config().announcement_delay());
        Ok(announcement)
    }
}

/// Runs a parsed command, writing human-readable output to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let session = Session::open(cli)?;
    match &cli.command {
        Command::Status => status(&session, out),
        Command::Toggle => {
            let announcement = session.toggle()?;
            writeln!(out, "{}", announcement)?;
            Ok(())
        }
        Command::Set { theme } => {
            if session.controller.theme() == *theme {
                writeln!(out, "Already in {} mode", theme)?;
                return Ok(());
            }
            let announcement = session.toggle()?;
            writeln!(out, "{}", announcement)?;
            Ok(())
        }
    }
}

fn status(session: &Session, out: &mut impl Write) -> Result<()> {
    let label = Style::new().dim();
    let value = Style::new().bold();
    let none = Style::new().dim().italic();

    let config = session.controller.config();
    let stored = session.store.get(&config.storage_key)?;
    let manual = session.controller.is_manual();
    let system = SystemColorScheme.prefers_dark().map(Theme::from_prefers_dark);

    let stored_text = match stored {
        Some(theme) if manual => format!("{} {}", value.apply_to(theme), label.apply_to("(manual)")),
        Some(theme) => value.apply_to(theme).to_string(),
        None => none.apply_to("none").to_string(),
    };
    let system_text = match system {
        Some(theme) => value.apply_to(theme).to_string(),
        None => none.apply_to("unknown").to_string(),
    };

    writeln!(out, "{} {}", label.apply_to("stored:"), stored_text)?;
    writeln!(out, "{} {}", label.apply_to("system:"), system_text)?;
    writeln!(
        out,
        "{} {} {}",
        label.apply_to("active:"),
        value.apply_to(session.controller.theme()),
        label.apply_to(format!("({})", session.controller.source().as_str())),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docs_theme::set_theme_detector;
    use std::path::Path;

    fn cli(store: &Path, command: Command) -> Cli {
        Cli {
            store: store.to_path_buf(),
            config: None,
            command,
        }
    }

    fn run_to_string(cli: &Cli) -> Result<String> {
        console::set_colors_enabled(false);
        set_theme_detector(|| Theme::Light);
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_status_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = run_to_string(&cli(&dir.path().join("prefs.json"), Command::Status)).unwrap();

        assert!(output.contains("stored: none"));
        assert!(output.contains("system: light"));
        assert!(output.contains("active: light (system)"));
    }

    #[test]
    fn test_toggle_persists_and_announces() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("prefs.json");

        let output = run_to_string(&cli(&store, Command::Toggle)).unwrap();
        assert_eq!(output.trim(), "Switched to dark mode");

        let status = run_to_string(&cli(&store, Command::Status)).unwrap();
        assert!(status.contains("stored: dark (manual)"));
        assert!(status.contains("active: dark (stored)"));
    }

    #[test]
    fn test_set_is_noop_when_already_active() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("prefs.json");

        let output = run_to_string(&cli(&store, Command::Set { theme: Theme::Light })).unwrap();
        assert_eq!(output.trim(), "Already in light mode");
        assert!(!store.exists());

        let output = run_to_string(&cli(&store, Command::Set { theme: Theme::Dark })).unwrap();
        assert_eq!(output.trim(), "Switched to dark mode");
    }

    #[test]
    fn test_malformed_store_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("prefs.json");
        std::fs::write(&store, "not json").unwrap();

        let err = run_to_string(&cli(&store, Command::Toggle)).unwrap_err();
        assert!(format!("{:#}", err).contains("malformed preference file"));
    }

    #[test]
    fn test_parse_theme_argument() {
        let parsed = Cli::try_parse_from(["docs-theme", "set", "dark"]).unwrap();
        assert!(matches!(parsed.command, Command::Set { theme: Theme::Dark }));

        assert!(Cli::try_parse_from(["docs-theme", "set", "sepia"]).is_err());
    }
}
