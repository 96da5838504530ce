//! CLI configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux: `~/.config/imgdrop/config.toml`
//! - Windows: `%APPDATA%/imgdrop/config.toml`

use std::path::{Path, PathBuf};

use imgdrop_protocol::{DEFAULT_ENDPOINT_URL, DEFAULT_RESPONSE_PATH, DEFAULT_TIMEOUT_MILLIS, UploadConfig};
use serde::{Deserialize, Serialize};

/// Uploader settings as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Upload endpoint; the encoded file name is appended to it.
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    /// Dotted path to the URL in the JSON response. Empty means raw body.
    #[serde(default = "default_response_path")]
    pub response_path: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_millis")]
    pub timeout_millis: u64,
}

fn default_endpoint_url() -> String {
    DEFAULT_ENDPOINT_URL.into()
}

fn default_response_path() -> String {
    DEFAULT_RESPONSE_PATH.into()
}

fn default_timeout_millis() -> u64 {
    DEFAULT_TIMEOUT_MILLIS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            response_path: default_response_path(),
            timeout_millis: default_timeout_millis(),
        }
    }
}

impl Config {
    /// Loads configuration from the default location, creating it if absent.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Loads configuration from `path`.
    ///
    /// A missing file is not an error: defaults are written to `path`
    /// (parent directories included, mode 0600 on Unix) and returned. This
    /// applies to a `--config` path too, so pointing it at a new location
    /// creates a starter file there.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Saves the configuration to `path`.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        // Restrict permissions on Unix.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Converts into the uploader's config. An empty response path selects
    /// raw-body mode.
    pub fn to_upload_config(&self) -> UploadConfig {
        let config = UploadConfig::new(&self.endpoint_url).with_timeout_millis(self.timeout_millis);
        if self.response_path.is_empty() {
            config
        } else {
            config.with_response_path(&self.response_path)
        }
    }
}

/// Returns the platform-specific configuration file path.
pub fn config_path() -> anyhow::Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        Ok(PathBuf::from(home)
            .join(".config")
            .join("imgdrop")
            .join("config.toml"))
    }

    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        Ok(PathBuf::from(appdata).join("imgdrop").join("config.toml"))
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        Ok(PathBuf::from("/tmp/imgdrop/config.toml"))
    }
}
