//! Desktop capabilities: a JSON preference file and OS theme detection.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{ColorSchemeSource, PreferenceStore};
use crate::error::StorageError;
use crate::theme::{detect_system_theme, Theme};

/// Preferences kept as a flat JSON object of strings.
///
/// A missing file reads as empty; writes create the file and its parent
/// directories. The file is re-read on every access so several processes can
/// share it.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|source| StorageError::Format {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let json = serde_json::to_string_pretty(entries).map_err(|source| StorageError::Format {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(io_err)
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }
}

/// The OS color scheme as reported by the detector in [`crate::theme`].
///
/// Native hosts have no change stream, so [`subscribe`](ColorSchemeSource::subscribe)
/// always declines.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemColorScheme;

impl ColorSchemeSource for SystemColorScheme {
    fn prefers_dark(&self) -> Option<bool> {
        Some(detect_system_theme() == Theme::Dark)
    }

    fn subscribe(&self, _listener: Box<dyn Fn(bool)>) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{reset_theme_detector, set_theme_detector};
    use serial_test::serial;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn test_set_creates_parents_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        let store = JsonFileStore::new(&path);

        store.set("theme", "dark").unwrap();
        store.set("theme-manual", "true").unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(reopened.get("theme-manual").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_malformed_file_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "[1, 2").unwrap();

        let err = JsonFileStore::new(&path).get("theme").unwrap_err();
        assert!(matches!(err, StorageError::Format { .. }));
    }

    #[test]
    fn test_blank_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "\n").unwrap();

        assert_eq!(JsonFileStore::new(&path).get("theme").unwrap(), None);
    }

    #[test]
    #[serial(theme_detector)]
    fn test_system_scheme_follows_detector() {
        set_theme_detector(|| Theme::Dark);
        assert_eq!(SystemColorScheme.prefers_dark(), Some(true));

        set_theme_detector(|| Theme::Light);
        assert_eq!(SystemColorScheme.prefers_dark(), Some(false));

        reset_theme_detector();
    }

    #[test]
    fn test_system_scheme_cannot_subscribe() {
        assert!(!SystemColorScheme.subscribe(Box::new(|_| {})));
    }
}
