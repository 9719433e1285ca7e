//! Controller configuration.
//!
//! Every field has a default, so an empty JSON object (or [`ThemeConfig::default`])
//! gives the stock behavior: `theme` / `theme-manual` storage keys, the
//! `data-theme` root attribute, a `theme-toggle` button and a one second
//! announcement.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const DEFAULT_TOGGLE_LABEL: &str = "Switch to {{ theme | opposite }} mode";
pub const DEFAULT_ANNOUNCEMENT: &str = "Switched to {{ theme }} mode";

/// Settings for a [`ThemeController`](crate::ThemeController).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Storage key holding the persisted theme.
    pub storage_key: String,

    /// Storage key whose presence marks a manual choice.
    pub manual_key: String,

    /// Attribute set on the document root.
    pub attribute: String,

    /// Class applied to the toggle button.
    pub button_class: String,

    /// How long the live-region announcement stays in the page.
    pub announcement_delay_ms: u64,

    /// Letter used with Ctrl/Cmd+Shift for the keyboard shortcut.
    pub shortcut_key: char,

    /// Template for the button's `aria-label` and `title`.
    pub toggle_label: String,

    /// Template for the text read by assistive technology after a toggle.
    pub announcement: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".into(),
            manual_key: "theme-manual".into(),
            attribute: "data-theme".into(),
            button_class: "theme-toggle".into(),
            announcement_delay_ms: 1000,
            shortcut_key: 'D',
            toggle_label: DEFAULT_TOGGLE_LABEL.into(),
            announcement: DEFAULT_ANNOUNCEMENT.into(),
        }
    }
}

impl ThemeConfig {
    /// Parses a configuration from JSON, filling omitted fields with defaults.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn announcement_delay(&self) -> Duration {
        Duration::from_millis(self.announcement_delay_ms)
    }
}
