use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const APP_NAME: &str = "vtemplate";

/// File name of the persisted defaults store
pub const DEFAULTS_FILE_NAME: &str = "defaults.json";

/// File name of the optional configuration file
pub const CONFIG_FILE_NAME: &str = "config.json";

/// File name of the log file inside the data directory
pub const LOG_FILE_NAME: &str = "vtemplate.log";

/// Environment variable holding the log filter directive
pub const LOG_ENV: &str = "VTEMPLATE_LOG";

/// Timeout for HTTP catalog requests in milliseconds (30 seconds)
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {source}")]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Default template catalog: a file path or an http(s) base URL
    pub catalog: Option<String>,
    pub http: HttpConfig,
}

/// HTTP catalog configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpConfig {
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_HTTP_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Load the configuration file from `config_dir`.
    ///
    /// A missing file yields the default configuration.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::Io { path, source }),
        };

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_json::from_str(&content).map_err(|source| ConfigError::Format { path, source })
    }
}

/// Returns the path to the config directory for vtemplate.
/// Uses $XDG_CONFIG_HOME/vtemplate if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/vtemplate,
/// or ./vtemplate if neither is available.
pub fn config_dir() -> PathBuf {
    dir_with_env(
        std::env::var("XDG_CONFIG_HOME").ok(),
        dirs::home_dir(),
        ".config",
    )
}

/// Returns the path to the data directory for vtemplate.
/// Uses $XDG_DATA_HOME/vtemplate if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/vtemplate.
pub fn data_dir() -> PathBuf {
    dir_with_env(
        std::env::var("XDG_DATA_HOME").ok(),
        dirs::home_dir(),
        ".local/share",
    )
}

fn dir_with_env(xdg_home: Option<String>, home_dir: Option<PathBuf>, home_suffix: &str) -> PathBuf {
    let base = xdg_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(home_suffix)))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join(APP_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<Config>(json!({
            "catalog": "https://templates.example.com"
        }))
        .unwrap();

        assert_eq!(
            result.catalog.as_deref(),
            Some("https://templates.example.com")
        );
        assert_eq!(result.http, HttpConfig::default());
    }

    #[test]
    fn config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<Config>(json!({
            "catalog": "/srv/catalog.yaml",
            "http": { "timeoutMs": 500 }
        }))
        .unwrap();

        assert_eq!(
            result,
            Config {
                catalog: Some("/srv/catalog.yaml".to_string()),
                http: HttpConfig { timeout_ms: 500 },
            }
        );
    }

    #[test]
    fn load_returns_default_when_file_missing() {
        let temp_dir = TempDir::new().unwrap();

        let config = Config::load(temp_dir.path()).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_reads_config_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            r#"{"catalog":"catalog.json"}"#,
        )
        .unwrap();

        let config = Config::load(temp_dir.path()).unwrap();

        assert_eq!(config.catalog.as_deref(), Some("catalog.json"));
    }

    #[test]
    fn load_rejects_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "{nope").unwrap();

        let err = Config::load(temp_dir.path()).unwrap_err();

        assert!(matches!(err, ConfigError::Format { .. }));
    }

    #[test]
    fn dir_with_env_uses_xdg_home_when_set() {
        let path = dir_with_env(
            Some("/tmp/test-config".to_string()),
            Some(PathBuf::from("/home/user")),
            ".config",
        );

        assert_eq!(path, PathBuf::from("/tmp/test-config/vtemplate"));
    }

    #[test]
    fn dir_with_env_ignores_empty_xdg_home() {
        let path = dir_with_env(
            Some(String::new()),
            Some(PathBuf::from("/home/user")),
            ".config",
        );

        assert_eq!(path, PathBuf::from("/home/user/.config/vtemplate"));
    }

    #[test]
    fn dir_with_env_falls_back_to_home_suffix() {
        let path = dir_with_env(None, Some(PathBuf::from("/home/user")), ".local/share");

        assert_eq!(path, PathBuf::from("/home/user/.local/share/vtemplate"));
    }

    #[test]
    fn dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = dir_with_env(None, None, ".config");

        assert_eq!(path, PathBuf::from("./vtemplate"));
    }
}
