use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubSettings,
    #[serde(default)]
    pub sync: SyncSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubSettings {
    /// Repository in `owner/name` form
    #[serde(default = "default_repo")]
    pub repo: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// Request timeout; the HTTP client default applies when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncSettings {
    /// Title substring marking module tracker issues (case-sensitive)
    #[serde(default = "default_module_marker")]
    pub module_marker: String,
    /// Compute progress without writing anything back
    #[serde(default)]
    pub dry_run: bool,
}

impl Config {
    /// Load configuration from the default location or a specified path.
    ///
    /// A missing file at the default location falls back to the built-in
    /// defaults; an explicitly given path has to exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default_path = Self::default_config_path()?;
                if !default_path.exists() {
                    debug!("No config at {:?}, using defaults", default_path);
                    return Ok(Config::default());
                }
                default_path
            }
        };

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {:?}", config_path))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {:?}", config_path))?;

        Ok(config)
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("gh-module-sync").join("config.toml"))
    }
}

// Default value functions
fn default_repo() -> String {
    "cafe-sur-cour/AREA".to_string()
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_per_page() -> u32 {
    100
}

fn default_module_marker() -> String {
    "[MODULE]".to_string()
}

impl Default for GitHubSettings {
    fn default() -> Self {
        GitHubSettings {
            repo: default_repo(),
            api_url: default_api_url(),
            per_page: default_per_page(),
            timeout_secs: None,
        }
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        SyncSettings {
            module_marker: default_module_marker(),
            dry_run: false,
        }
    }
}
