use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::TagPattern;
use crate::error::{Result, VersionError};

/// File name looked up in the repository work tree
pub const CONFIG_FILE_NAME: &str = "gitversion.toml";

/// Represents the complete configuration for git-stable-version.
///
/// Contains the history conventions used to compute the version and the
/// packaging commands chained by `--build` / `--install`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub versioning: VersioningConfig,

    #[serde(default)]
    pub packaging: PackagingConfig,
}

fn default_stable_branch() -> String {
    "main".to_string()
}

fn default_bottom() -> String {
    "versioning-start".to_string()
}

fn default_tag_pattern() -> String {
    "gmic-{version}".to_string()
}

fn default_output_file() -> String {
    "version.txt".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

/// History conventions of the project.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersioningConfig {
    /// Branch designated as the stable line
    #[serde(default = "default_stable_branch")]
    pub stable_branch: String,

    /// Earliest commit that is ever considered
    #[serde(default = "default_bottom")]
    pub bottom: String,

    /// Release tag naming pattern with a `{version}` placeholder
    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,

    /// File written by `--update`, relative to the work tree
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Remote probed when the stable branch has no local counterpart
    #[serde(default = "default_remote")]
    pub remote: String,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        VersioningConfig {
            stable_branch: default_stable_branch(),
            bottom: default_bottom(),
            tag_pattern: default_tag_pattern(),
            output_file: default_output_file(),
            remote: default_remote(),
        }
    }
}

impl VersioningConfig {
    /// Parse and validate the configured tag pattern
    pub fn tag_pattern(&self) -> Result<TagPattern> {
        TagPattern::new(self.tag_pattern.as_str())
    }
}

fn default_build_command() -> Vec<String> {
    vec!["python3".to_string(), "-m".to_string(), "build".to_string()]
}

fn default_install_command() -> Vec<String> {
    vec![
        "python3".to_string(),
        "-m".to_string(),
        "pip".to_string(),
        "install".to_string(),
    ]
}

/// Commands chained after the version file is written.
///
/// Arguments given after `--build` / `--install` are appended to these.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PackagingConfig {
    #[serde(default = "default_build_command")]
    pub build: Vec<String>,

    #[serde(default = "default_install_command")]
    pub install: Vec<String>,
}

impl Default for PackagingConfig {
    fn default() -> Self {
        PackagingConfig {
            build: default_build_command(),
            install: default_install_command(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitversion.toml` in the given work tree
/// 3. `~/.config/.gitversion.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `workdir` - Repository work tree, if known
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>, workdir: Option<&Path>) -> Result<Config> {
    let local = workdir
        .unwrap_or_else(|| Path::new("."))
        .join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if local.exists() {
        fs::read_to_string(&local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| VersionError::config(format!("Invalid configuration: {}", e)))?;
    config.versioning.tag_pattern()?;
    Ok(config)
}
