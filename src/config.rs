//! Configuration management for Octodrop Server

use serde::Deserialize;
use std::env;

/// Default GitHub REST API base URL
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default request body limit: 25MB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub backend: BackendConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the contents API, without trailing slash
    pub api_url: String,
    /// Sent only when the caller supplied no User-Agent of its own
    pub default_user_agent: String,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8787,
                max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            },
            backend: BackendConfig {
                api_url: DEFAULT_API_URL.to_string(),
                default_user_agent: default_user_agent(),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Ok(Config {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_var(&lookup, "SERVER_PORT", defaults.server.port)?,
                max_upload_bytes: parse_var(
                    &lookup,
                    "MAX_UPLOAD_BYTES",
                    defaults.server.max_upload_bytes,
                )?,
            },
            backend: BackendConfig {
                api_url: lookup("GITHUB_API_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.backend.api_url),
                default_user_agent: lookup("DEFAULT_USER_AGENT")
                    .unwrap_or(defaults.backend.default_user_agent),
            },
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}

fn default_user_agent() -> String {
    format!("octodrop-server/{}", env!("CARGO_PKG_VERSION"))
}
