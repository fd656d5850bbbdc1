use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::paths;

/// Root configuration structure for renumber.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RenumberConfig {
    #[serde(default)]
    pub defaults: Defaults,
}

/// All configurable defaults that can be overridden via renumber.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    /// Directory scanned when no directory argument is given.
    #[serde(default = "default_directory")]
    pub directory: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            directory: default_directory(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_directory() -> String {
    "./code-atividades".to_string()
}

// =============================================================================
// Loading
// =============================================================================

/// Load defaults, merging file config with built-in defaults.
/// If renumber.json is missing or invalid, silently returns built-in defaults.
pub fn load_defaults() -> Defaults {
    load_config().defaults
}

/// Load the full renumber.json config, falling back to defaults on any error.
pub fn load_config() -> RenumberConfig {
    paths::renumber_json()
        .and_then(|path| load_config_from(&path))
        .unwrap_or_default()
}

/// Load renumber.json, surfacing parse errors instead of hiding them.
/// A missing file is not an error.
pub fn load_config_strict() -> Result<RenumberConfig> {
    load_config_from(&paths::renumber_json()?)
}

/// Load config from an explicit path. Missing file yields built-in defaults.
pub fn load_config_from(path: &Path) -> Result<RenumberConfig> {
    if !path.exists() {
        return Ok(RenumberConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    let config: RenumberConfig = serde_json::from_str(&content)
        .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))?;

    if config.defaults.directory.trim().is_empty() {
        return Err(Error::config_invalid_value(
            "defaults.directory",
            Some(config.defaults.directory),
            "directory must not be empty",
        ));
    }

    Ok(config)
}

/// Check if renumber.json file exists
pub fn config_exists() -> bool {
    paths::renumber_json()
        .map(|p| p.exists())
        .unwrap_or(false)
}

/// Get the path to renumber.json (for display purposes)
pub fn config_path() -> Result<String> {
    Ok(paths::renumber_json()?.display().to_string())
}

/// Get built-in defaults (ignoring any file config)
pub fn builtin_defaults() -> Defaults {
    Defaults::default()
}

/// Pick the directory to scan: explicit argument first, then configured default.
/// A leading `~` is expanded to the home directory.
pub fn resolve_directory(explicit: Option<&str>, defaults: &Defaults) -> PathBuf {
    let raw = explicit.unwrap_or(defaults.directory.as_str());
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_builtin_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config_from(&dir.path().join("renumber.json")).unwrap();
        assert_eq!(config.defaults.directory, "./code-atividades");
    }

    #[test]
    fn file_overrides_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("renumber.json");
        fs::write(&path, r#"{"defaults":{"directory":"/srv/exercises"}}"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.defaults.directory, "/srv/exercises");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("renumber.json");
        fs::write(&path, "{}").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.defaults.directory, "./code-atividades");
    }

    #[test]
    fn invalid_json_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("renumber.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_json");
    }

    #[test]
    fn empty_directory_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("renumber.json");
        fs::write(&path, r#"{"defaults":{"directory":"  "}}"#).unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
    }

    #[test]
    fn explicit_directory_wins() {
        let defaults = builtin_defaults();
        assert_eq!(
            resolve_directory(Some("/tmp/other"), &defaults),
            PathBuf::from("/tmp/other")
        );
        assert_eq!(
            resolve_directory(None, &defaults),
            PathBuf::from("./code-atividades")
        );
    }
}
