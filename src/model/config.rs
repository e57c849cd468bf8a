use serde::Deserialize;
use std::fs;
use std::path::Path;

const ENV_CONFIG_PATH: &str = "SAFECLICK_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const DEFAULT_UPSTREAM_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_UPSTREAM_MODEL: &str = "gemini-pro";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 5;

/// Upstream generative provider configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the provider API (override for proxies or test doubles)
    pub base_url: String,
    /// Model identifier appended to the generateContent path
    pub model: String,
    /// Hard deadline for a single provider call
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            model: DEFAULT_UPSTREAM_MODEL.to_string(),
            timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
        }
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub upstream: UpstreamConfig,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upstream: UpstreamConfig::default(),
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and optional config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let upstream = Self::load_config_file(&config_path)
            .map(|cf| cf.upstream)
            .unwrap_or_default();

        Self {
            upstream,
            port,
            host,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_defaults() {
        let upstream = UpstreamConfig::default();
        assert_eq!(upstream.base_url, DEFAULT_UPSTREAM_BASE_URL);
        assert_eq!(upstream.model, "gemini-pro");
        assert_eq!(upstream.timeout_secs, 5);
    }

    #[test]
    fn config_file_parses_partial_overrides() {
        let cf: ConfigFile =
            serde_yaml::from_str("upstream:\n  model: gemini-1.5-flash\n").unwrap();
        assert_eq!(cf.upstream.model, "gemini-1.5-flash");
        assert_eq!(cf.upstream.base_url, DEFAULT_UPSTREAM_BASE_URL);
    }
}
