//! Server configuration from the environment

use std::net::SocketAddr;

use forecast::{validate_horizon, DEFAULT_HORIZON};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default upload cap: 10 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
/// Rows shown in the upload preview
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Invalid configuration value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} has invalid value '{value}': {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub preview_rows: usize,
    pub default_horizon: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            default_horizon: DEFAULT_HORIZON,
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `MAX_UPLOAD_BYTES`, `PREVIEW_ROWS` and
    /// `DEFAULT_HORIZON`; unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ServerConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = parse_var(&lookup, "PORT", defaults.port)?;
        let max_upload_bytes = parse_var(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?;
        let preview_rows = parse_var(&lookup, "PREVIEW_ROWS", defaults.preview_rows)?;
        let default_horizon = parse_var(&lookup, "DEFAULT_HORIZON", defaults.default_horizon)?;

        if max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                name: "MAX_UPLOAD_BYTES",
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        validate_horizon(default_horizon).map_err(|e| ConfigError::InvalidValue {
            name: "DEFAULT_HORIZON",
            value: default_horizon.to_string(),
            reason: e.to_string(),
        })?;

        let config = Self {
            host,
            port,
            max_upload_bytes,
            preview_rows,
            default_horizon,
        };
        config.socket_addr()?;
        Ok(config)
    }

    /// Address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                name: "HOST",
                value: self.host.clone(),
                reason: e.to_string(),
            })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
