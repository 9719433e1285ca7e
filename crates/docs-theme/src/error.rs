//! Error types.

use std::path::PathBuf;

/// Error returned when a string is not a theme name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeParseError {
    value: String,
}

impl ThemeParseError {
    pub(crate) fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    /// The rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for ThemeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown theme '{}' (expected 'light' or 'dark')",
            self.value
        )
    }
}

impl std::error::Error for ThemeParseError {}

/// Failure reported by a [`PreferenceStore`](crate::PreferenceStore).
///
/// The controller never propagates these; it logs them and carries on
/// without persistence.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to access preference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed preference file {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while setting up a [`ThemeController`](crate::ThemeController).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid message template: {0}")]
    Template(#[from] minijinja::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("failed to read configuration {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parse_error_display() {
        let err = ThemeParseError::new("sepia");
        let msg = err.to_string();
        assert!(msg.contains("sepia"));
        assert!(msg.contains("light"));
        assert_eq!(err.value(), "sepia");
    }

    #[test]
    fn test_storage_error_display_names_path() {
        let err = StorageError::Io {
            path: PathBuf::from("/tmp/prefs.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/prefs.json"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_error_wraps_storage_transparently() {
        let err: Error = StorageError::Unavailable("private mode".into()).into();
        assert_eq!(err.to_string(), "preference storage unavailable: private mode");
    }
}
