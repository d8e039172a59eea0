use std::path::PathBuf;

use eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub channel_id: Option<String>,
    pub default_lang: Option<String>,
    pub throttle_ms: Option<u64>,
}

impl Config {
    /// Load config from ~/.config/ytrank/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytrank")
        .join("config.toml")
}

/// API credential and channel resolved at startup. Environment variables take
/// priority over the config file; either one missing is a fatal error.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub channel_id: String,
}

impl Credentials {
    pub fn resolve(config: &Config) -> Result<Self> {
        let api_key = std::env::var("YOUTUBE_API_KEY")
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| config.api_key.clone())
            .ok_or_else(|| {
                eyre::eyre!(
                    "YOUTUBE_API_KEY not set (export it or add api_key to {})",
                    config_path().display()
                )
            })?;

        let channel_id = std::env::var("CHANNEL_ID")
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| config.channel_id.clone())
            .ok_or_else(|| {
                eyre::eyre!(
                    "CHANNEL_ID not set (export it or add channel_id to {})",
                    config_path().display()
                )
            })?;

        Ok(Credentials { api_key, channel_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
api_key = "AIzaSyTest"
channel_id = "UC1234567890"
default_lang = "ja"
throttle_ms = 250
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("AIzaSyTest"));
        assert_eq!(config.channel_id.as_deref(), Some("UC1234567890"));
        assert_eq!(config.default_lang.as_deref(), Some("ja"));
        assert_eq!(config.throttle_ms, Some(250));
    }

    #[test]
    fn test_parse_empty_config() {
        let toml_str = "";
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.api_key.is_none());
        assert!(config.channel_id.is_none());
        assert!(config.throttle_ms.is_none());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_str = r#"default_lang = "fr""#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_lang.as_deref(), Some("fr"));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_credentials_from_config() {
        let config = Config {
            api_key: Some("key-from-file".to_string()),
            channel_id: Some("UCfile".to_string()),
            ..Config::default()
        };
        // Only meaningful when the env vars are not set in the test environment
        if std::env::var("YOUTUBE_API_KEY").is_err() && std::env::var("CHANNEL_ID").is_err() {
            let creds = Credentials::resolve(&config).unwrap();
            assert_eq!(creds.api_key, "key-from-file");
            assert_eq!(creds.channel_id, "UCfile");
        }
    }

    #[test]
    fn test_credentials_missing_is_error() {
        if std::env::var("YOUTUBE_API_KEY").is_err() {
            assert!(Credentials::resolve(&Config::default()).is_err());
        }
    }
}
