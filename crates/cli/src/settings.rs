use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use transcript_analyzer_core::shared::constants::APP_DIR_NAME;

/// Persistent defaults. Every field is optional and command-line flags win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub service_url: Option<String>,
    pub cache_ttl_secs: Option<u64>,
    pub jobs: Option<usize>,
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// A missing file yields defaults. An unreadable or malformed one is
    /// logged and ignored.
    pub fn load_from(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("Ignoring settings file {}: {e}", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::debug!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings file {}: {e}", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load_from(&dir.path().join("settings.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_reads_all_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"service_url": "https://nlu.example.com", "cache_ttl_secs": 60, "jobs": 3}"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.service_url.as_deref(), Some("https://nlu.example.com"));
        assert_eq!(settings.cache_ttl_secs, Some(60));
        assert_eq!(settings.jobs, Some(3));
    }

    #[test]
    fn test_partial_file_leaves_other_fields_unset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"jobs": 2}"#).unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.jobs, Some(2));
        assert!(settings.service_url.is_none());
        assert!(settings.cache_ttl_secs.is_none());
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(Settings::load_from(&path), Settings::default());
    }
}
