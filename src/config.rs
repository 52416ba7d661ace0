use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConventionalError, Result};
use crate::git::DEFAULT_TAG_PREFIX;
use crate::release::DEFAULT_COMMIT_MESSAGE;

/// Configuration file name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "conventional.toml";

/// Represents the complete configuration for conventional-bump.
///
/// Contains tag discovery settings, the version file to edit, and release behavior.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    #[serde(default = "default_version_file")]
    pub version_file: PathBuf,

    #[serde(default = "default_remote")]
    pub remote: String,

    /// Only consider commits touching this path
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub bump: BumpConfig,
}

fn default_tag_prefix() -> String {
    DEFAULT_TAG_PREFIX.to_string()
}

fn default_version_file() -> PathBuf {
    PathBuf::from("Cargo.toml")
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_commit_message() -> String {
    DEFAULT_COMMIT_MESSAGE.to_string()
}

fn default_true() -> bool {
    true
}

/// Configuration for the release step.
///
/// Controls how the bump is recorded without affecting the level decision.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BumpConfig {
    /// Commit message template with a `%{version}` placeholder
    #[serde(default = "default_commit_message")]
    pub message: String,

    #[serde(default = "default_true")]
    pub tag: bool,

    #[serde(default)]
    pub push: bool,
}

impl Default for BumpConfig {
    fn default() -> Self {
        BumpConfig {
            message: default_commit_message(),
            tag: true,
            push: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tag_prefix: default_tag_prefix(),
            version_file: default_version_file(),
            remote: default_remote(),
            path: None,
            bump: BumpConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `conventional.toml` in current directory
/// 3. `conventional.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => match find_config_file() {
            Some(path) => path,
            None => return Ok(Config::default()),
        },
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        ConventionalError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;

    toml::from_str(&config_str)
        .map_err(|e| ConventionalError::config(format!("Invalid {}: {}", path.display(), e)))
}

fn find_config_file() -> Option<PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join(CONFIG_FILE_NAME);
    user.exists().then_some(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tag_prefix, "v");
        assert_eq!(config.version_file, PathBuf::from("Cargo.toml"));
        assert_eq!(config.remote, "origin");
        assert_eq!(config.path, None);
        assert_eq!(config.bump.message, "chore: Release v%{version} [skip ci]");
        assert!(config.bump.tag);
        assert!(!config.bump.push);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_bump_table() {
        let config: Config = toml::from_str("[bump]\npush = true\n").unwrap();
        assert!(config.bump.push);
        assert!(config.bump.tag);
        assert_eq!(config.bump.message, DEFAULT_COMMIT_MESSAGE);
    }
}
