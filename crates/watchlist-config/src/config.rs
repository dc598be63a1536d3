use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_OMDB_URL: &str = "https://www.omdbapi.com";

/// Environment variable that overrides `omdb.api_key`
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

const PLACEHOLDER_API_KEY: &str = "your-api-key";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("OMDb API key is not set (set omdb.api_key in config.toml or {API_KEY_ENV})")]
    MissingApiKey,
    #[error("render.max_concurrent_fetches must be at least 1")]
    InvalidConcurrency,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OmdbConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout. None leaves it to the HTTP client.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RenderConfig {
    /// Upper bound on detail fetches in flight during one render pass.
    /// None issues every fetch at once.
    #[serde(default)]
    pub max_concurrent_fetches: Option<usize>,
}

fn default_base_url() -> String {
    DEFAULT_OMDB_URL.to_string()
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            omdb: OmdbConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load the file if it exists, otherwise start from defaults.
    /// The environment override is applied either way.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Some(key) = pick_api_key(std::env::var(API_KEY_ENV).ok(), &self.omdb.api_key) {
            self.omdb.api_key = key;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.has_api_key() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.render.max_concurrent_fetches == Some(0) {
            return Err(ConfigError::InvalidConcurrency);
        }
        Ok(())
    }

    pub fn has_api_key(&self) -> bool {
        let key = self.omdb.api_key.trim();
        !key.is_empty() && key != PLACEHOLDER_API_KEY
    }
}

/// Environment value wins when it is non-blank
fn pick_api_key(env_value: Option<String>, file_value: &str) -> Option<String> {
    match env_value {
        Some(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ if file_value.is_empty() => None,
        _ => Some(file_value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            omdb: OmdbConfig {
                api_key: "abc123".to_string(),
                base_url: "http://localhost:8080".to_string(),
                timeout_secs: Some(5),
            },
            render: RenderConfig {
                max_concurrent_fetches: Some(4),
            },
        };

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.omdb.api_key, "abc123");
        assert_eq!(loaded.omdb.base_url, "http://localhost:8080");
        assert_eq!(loaded.omdb.timeout_secs, Some(5));
        assert_eq!(loaded.render.max_concurrent_fetches, Some(4));
    }

    #[test]
    fn test_minimal_file_uses_defaults() {
        let config: Config = toml::from_str("[omdb]\napi_key = \"k\"\n").unwrap();
        assert_eq!(config.omdb.base_url, DEFAULT_OMDB_URL);
        assert_eq!(config.omdb.timeout_secs, None);
        assert_eq!(config.render.max_concurrent_fetches, None);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert_eq!(config.validate(), Err(ConfigError::MissingApiKey));

        config.omdb.api_key = "your-api-key".to_string();
        assert_eq!(config.validate(), Err(ConfigError::MissingApiKey));

        config.omdb.api_key = "real-key".to_string();
        assert!(config.validate().is_ok());

        config.render.max_concurrent_fetches = Some(0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidConcurrency));
    }

    #[test]
    fn test_pick_api_key() {
        assert_eq!(pick_api_key(Some("env".to_string()), "file"), Some("env".to_string()));
        assert_eq!(pick_api_key(Some("  ".to_string()), "file"), Some("file".to_string()));
        assert_eq!(pick_api_key(None, "file"), Some("file".to_string()));
        assert_eq!(pick_api_key(None, ""), None);
    }
}
