//! User-level settings shared by every skeleton run.
//!
//! Settings are loaded once by the binary and passed down explicitly: the
//! classifier receives the default ignore list, the question collaborator the
//! author/version/license defaults.

use crate::constants::{DEFAULT_IGNORE, SETTINGS_FILE};
use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Patterns ignored in every skeleton, on top of the skeleton's own list.
    pub ignore: Vec<String>,
    /// Default answer for the author question.
    pub author: Option<String>,
    /// Default answer for the version question.
    pub version: Option<String>,
    /// License value preselected in the license question.
    pub license: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ignore: DEFAULT_IGNORE.iter().map(|p| p.to_string()).collect(),
            author: None,
            version: None,
            license: None,
        }
    }
}

impl Settings {
    /// Parses settings from JSON, falling back to YAML.
    pub fn parse(content: &str) -> Result<Self> {
        match serde_json::from_str(content) {
            Ok(settings) => Ok(settings),
            Err(_) => serde_yaml::from_str(content)
                .map_err(|e| Error::ConfigError(format!("invalid settings file: {e}"))),
        }
    }

    /// Reads settings from `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading settings from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("cannot read settings '{}': {e}", path.display()))
        })?;
        Self::parse(&content)
    }

    /// Loads settings from an explicit file, else from `~/.ahoyrc`, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_settings_path() {
            Some(path) if path.is_file() => Self::from_file(path),
            _ => {
                debug!("No settings file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

fn default_settings_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(SETTINGS_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_include_descriptor_dir() {
        let settings = Settings::default();
        assert!(settings.ignore.contains(&".ahoy/**".to_string()));
        assert!(settings.author.is_none());
    }

    #[test]
    fn test_parse_json_and_yaml() {
        let json = Settings::parse(r#"{"author": "Jane", "ignore": ["*.log"]}"#).unwrap();
        assert_eq!(json.author.as_deref(), Some("Jane"));
        assert_eq!(json.ignore, vec!["*.log".to_string()]);

        let yaml = Settings::parse("license: mit\nversion: 0.1.0\n").unwrap();
        assert_eq!(yaml.license.as_deref(), Some("mit"));
        assert_eq!(yaml.version.as_deref(), Some("0.1.0"));
        // Missing keys keep their defaults.
        assert_eq!(yaml.ignore, Settings::default().ignore);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(Settings::parse("- [unclosed"), Err(Error::ConfigError(_))));
    }
}
