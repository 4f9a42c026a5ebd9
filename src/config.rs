//! Configuration loading and management for archlens.
//!
//! Loads settings from an optional `archlens.toml`. The Gemini credential is only ever
//! taken from the environment, once, at load time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable carrying the Gemini API key
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Older dashboard builds exported the key under this name
const LEGACY_API_KEY_VAR: &str = "VITE_GOOGLE_API_KEY";

const CONFIG_FILE: &str = "archlens.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Gemini endpoint and model selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Base URL of the generative language API
    pub endpoint: String,
    /// Model used for schema-constrained architecture generation
    pub architect_model: String,
    /// Model used for search-grounded trend digests
    pub trends_model: String,
    /// Reasoning budget hint passed with architecture requests
    pub thinking_budget: u32,
}

/// Prompt wording
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Framework the architect designs for
    pub framework: String,
    /// Fixed query sent for trend digests
    pub trends_query: String,
}

/// Settings that only concern the command-line caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Deadline applied around each call; unset means wait indefinitely
    pub request_timeout_secs: Option<u64>,
}

/// Root configuration structure
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub prompts: PromptConfig,
    pub cli: CliConfig,
    #[serde(skip)]
    api_key: String,
}

impl Config {
    /// Load configuration from the default location, falling back to built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::find_config_file() {
            Some(path) => Self::parse_file(&path)?,
            None => Config::default(),
        };
        config.api_key = api_key_from_env();
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::parse_file(path)?;
        config.api_key = api_key_from_env();
        Ok(config)
    }

    /// Parse configuration from TOML text without touching the environment
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Replace the credential
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    /// The Gemini API key; empty when none was configured
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Instruction sent to the architect model for a user prompt
    pub fn architecture_prompt(&self, prompt: &str) -> String {
        format!(
            "Design a professional {} architecture for: {}",
            self.prompts.framework, prompt
        )
    }

    fn parse_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let local_config = PathBuf::from(CONFIG_FILE);
        if local_config.exists() {
            return Some(local_config);
        }

        let home_config = dirs::home_dir()?
            .join(".config")
            .join("archlens")
            .join(CONFIG_FILE);
        home_config.exists().then_some(home_config)
    }
}

/// An empty variable counts as unset, so it falls through to the legacy name
fn api_key_from_env() -> String {
    let read = |name: &str| std::env::var(name).ok().filter(|key| !key.is_empty());
    read(API_KEY_VAR)
        .or_else(|| read(LEGACY_API_KEY_VAR))
        .unwrap_or_default()
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() { "<unset>" } else { "<redacted>" };
        f.debug_struct("Config")
            .field("gemini", &self.gemini)
            .field("prompts", &self.prompts)
            .field("cli", &self.cli)
            .field("api_key", &api_key)
            .finish()
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            architect_model: "gemini-3-pro-preview".to_string(),
            trends_model: "gemini-3-flash-preview".to_string(),
            thinking_budget: 4000,
        }
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            framework: "Next.js".to_string(),
            trends_query: "What are the top 5 trending technologies and patterns in the Next.js \
                           ecosystem for 2024? Include real sources."
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    /// Held by every test that mutates the credential variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn load_with_env(primary: Option<&str>, legacy: Option<&str>) -> Config {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for (name, value) in [(API_KEY_VAR, primary), (LEGACY_API_KEY_VAR, legacy)] {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }

        let file = tempfile::NamedTempFile::new().unwrap();
        let config = Config::load_from(file.path()).unwrap();

        std::env::remove_var(API_KEY_VAR);
        std::env::remove_var(LEGACY_API_KEY_VAR);
        config
    }

    #[test]
    fn missing_credential_is_empty_string() {
        assert_eq!(load_with_env(None, None).api_key(), "");
    }

    #[test]
    fn legacy_credential_is_fallback() {
        assert_eq!(load_with_env(None, Some("legacy")).api_key(), "legacy");
    }

    #[test]
    fn primary_credential_wins() {
        let config = load_with_env(Some("primary"), Some("legacy"));
        assert_eq!(config.api_key(), "primary");
    }

    #[test]
    fn empty_primary_falls_through_to_legacy() {
        assert_eq!(load_with_env(Some(""), Some("legacy")).api_key(), "legacy");
        assert_eq!(load_with_env(Some(""), None).api_key(), "");
    }

    #[test]
    fn debug_output_redacts_credential() {
        let config = Config::default().with_api_key("AIza-secret");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("AIza-secret"));
        assert!(printed.contains("<redacted>"));
        assert!(printed.contains("gemini-3-pro-preview"));
    }

    #[test]
    fn defaults_match_hosted_models() {
        let config = Config::default();
        assert_eq!(config.gemini.architect_model, "gemini-3-pro-preview");
        assert_eq!(config.gemini.trends_model, "gemini-3-flash-preview");
        assert_eq!(config.gemini.thinking_budget, 4000);
        assert!(config.prompts.trends_query.contains("Include real sources."));
        assert_eq!(config.cli.request_timeout_secs, None);
        assert_eq!(config.api_key(), "");
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config = Config::from_toml(
            r#"
            [gemini]
            trends_model = "gemini-2.5-flash"

            [cli]
            request_timeout_secs = 45
            "#,
        )
        .unwrap();

        assert_eq!(config.gemini.trends_model, "gemini-2.5-flash");
        assert_eq!(config.gemini.architect_model, "gemini-3-pro-preview");
        assert_eq!(config.prompts.framework, "Next.js");
        assert_eq!(config.cli.request_timeout_secs, Some(45));
    }

    #[test]
    fn api_key_is_never_read_from_file() {
        let config = Config::from_toml("api_key = \"leaked\"\n").unwrap();
        assert_eq!(config.api_key(), "");
    }

    #[test]
    fn load_from_reads_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[prompts]\nframework = \"Remix\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(
            config.architecture_prompt("a blog with comments"),
            "Design a professional Remix architecture for: a blog with comments"
        );
    }

    #[test]
    fn load_from_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = Config::from_toml("[gemini\nendpoint = 3").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
