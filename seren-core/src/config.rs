//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/seren/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/seren/` (~/.config/seren/)
//! - Data: `$XDG_DATA_HOME/seren/` (~/.local/share/seren/)
//! - State/Logs: `$XDG_STATE_HOME/seren/` (~/.local/state/seren/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Hosted AI configuration (optional; rules-only when absent)
    #[serde(default)]
    pub ai: Option<AiConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Hosted reply strategy configuration.
///
/// The strategy only activates when an `api_key` is present; an `[ai]`
/// section without a key falls back to the rule-based responder.
#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// API endpoint base URL (OpenAI-compatible)
    #[serde(default = "default_ai_endpoint")]
    pub endpoint: String,

    /// Model to request
    #[serde(default = "default_ai_model")]
    pub model: String,

    /// API key; also read from the SEREN_API_KEY env var
    pub api_key: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_ai_timeout")]
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_ai_endpoint(),
            model: default_ai_model(),
            api_key: None,
            timeout_secs: default_ai_timeout(),
        }
    }
}

impl AiConfig {
    /// Resolve the API key from config or the environment.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("SEREN_API_KEY").ok().filter(|k| !k.is_empty()))
    }

    /// Check if the hosted strategy can be used.
    pub fn is_ready(&self) -> bool {
        self.resolved_api_key().is_some()
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(Error::Config("ai.endpoint must not be empty".to_string()));
        }
        if self.model.is_empty() {
            return Err(Error::Config("ai.model must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config(
                "ai.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_ai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_ai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_ai_timeout() -> u64 {
    30
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        if let Some(ai) = &config.ai {
            ai.validate()?;
        }

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/seren/config.toml` (~/.config/seren/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("seren").join("config.toml")
    }

    /// Returns the data directory path (for the journal database)
    ///
    /// `$XDG_DATA_HOME/seren/` (~/.local/share/seren/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("seren")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/seren/` (~/.local/state/seren/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("seren")
    }

    /// Returns the journal database file path
    ///
    /// `$XDG_DATA_HOME/seren/journal.db` (~/.local/share/seren/journal.db)
    pub fn database_path() -> PathBuf {
        Self::data_dir().join("journal.db")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/seren/seren.log` (~/.local/state/seren/seren.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("seren.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.ai.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[ai]
model = "gpt-4o-mini"
api_key = "sk-test"

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        let ai = config.ai.unwrap();
        assert_eq!(ai.model, "gpt-4o-mini");
        assert_eq!(ai.endpoint, "https://api.openai.com/v1");
        assert_eq!(ai.timeout_secs, 30);
        assert!(ai.is_ready());
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_ai_config_without_key_is_not_ready() {
        let toml = r#"
[ai]
model = "gpt-4o-mini"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let ai = config.ai.unwrap();
        if std::env::var("SEREN_API_KEY").is_err() {
            assert!(!ai.is_ready());
        }
    }

    #[test]
    fn test_ai_config_validation() {
        let ai = AiConfig::default();
        assert!(ai.validate().is_ok());

        let ai = AiConfig {
            endpoint: String::new(),
            ..Default::default()
        };
        assert!(ai.validate().is_err());

        let ai = AiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(ai.validate().is_err());
    }
}
