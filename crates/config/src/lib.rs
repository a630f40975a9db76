//! Configuration for the Paperhound assistant.
//!
//! Configuration is loaded from a TOML file, then overridden by
//! `PAPERHOUND_*` environment variables. The API key never appears in
//! `Debug` output.

use std::fmt;
use std::path::{Path, PathBuf};

use paperhound_core::error::{Error, Result};
use serde::Deserialize;
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "paperhound.toml";

/// Top-level application configuration.
#[derive(Clone, Deserialize)]
pub struct AppConfig {
    /// API key for the model provider.
    #[serde(default)]
    pub api_key: String,
    /// Base URL of an OpenAI-compatible endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Directory where session files are written.
    #[serde(default = "default_session_dir")]
    pub session_dir: PathBuf,
    /// Directory where tool logs are written.
    #[serde(default = "default_logs_dir")]
    pub logs_dir: PathBuf,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_session_dir() -> PathBuf {
    PathBuf::from("data/sessions")
}

fn default_logs_dir() -> PathBuf {
    PathBuf::from("data/logs")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            request_timeout_secs: default_request_timeout_secs(),
            session_dir: default_session_dir(),
            logs_dir: default_logs_dir(),
        }
    }
}

// Redacts the API key.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("session_dir", &self.session_dir)
            .field("logs_dir", &self.logs_dir)
            .finish()
    }
}

impl AppConfig {
    /// Load from a TOML file, then apply environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        let mut config: AppConfig = toml::from_str(&text).map_err(|e| Error::Config {
            message: format!("failed to parse {}: {e}", path.display()),
        })?;
        config.apply_env_overrides();
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load `paperhound.toml` if present, otherwise defaults plus
    /// environment overrides.
    pub fn load_default() -> Result<Self> {
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::load(DEFAULT_CONFIG_PATH)
        } else {
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Environment variables take precedence over file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("PAPERHOUND_API_KEY") {
            if !key.is_empty() {
                self.api_key = key;
            }
        }
        if let Ok(url) = std::env::var("PAPERHOUND_BASE_URL") {
            if !url.is_empty() {
                self.base_url = url;
            }
        }
        if let Ok(model) = std::env::var("PAPERHOUND_MODEL") {
            if !model.is_empty() {
                self.model = model;
            }
        }
    }

    /// Validate values that would otherwise fail deep inside a request.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(Error::Config {
                message: "api_key is not set; set PAPERHOUND_API_KEY or add it to the config file"
                    .into(),
            });
        }
        if self.base_url.is_empty() {
            return Err(Error::Config {
                message: "base_url must not be empty".into(),
            });
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(Error::Config {
                message: format!("temperature {} is outside [0.0, 2.0]", self.temperature),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config {
                message: "request_timeout_secs must be positive".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sensible() {
        let config = AppConfig::default();
        assert_eq!(config.temperature, 0.1);
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.session_dir, PathBuf::from("data/sessions"));
    }

    #[test]
    fn loads_partial_toml_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key = \"sk-test\"\nmodel = \"test-model\"").unwrap();
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.model, "test-model");
        assert_eq!(config.temperature, 0.1);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = AppConfig::load("/nonexistent/paperhound.toml").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn validate_rejects_empty_api_key() {
        let config = AppConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_temperature() {
        let config = AppConfig {
            api_key: "sk-test".into(),
            temperature: 3.5,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = AppConfig {
            api_key: "sk-secret".into(),
            ..AppConfig::default()
        };
        let dbg = format!("{config:?}");
        assert!(!dbg.contains("sk-secret"));
        assert!(dbg.contains("<redacted>"));
    }
}
