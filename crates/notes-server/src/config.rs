//! Server configuration from environment variables.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: IpAddr,
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            log_level: "info".to_string(),
            cors_allowed_origins: "*".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `HOST`: Bind address (default: 0.0.0.0)
    /// - `PORT`: Server port (default: 8000)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `CORS_ALLOWED_ORIGINS`: Allowed CORS origins (default: "*")
    ///
    /// Database settings are read separately by `notes_store::StoreConfig`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = match lookup("HOST") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "HOST".to_string(),
                reason: format!("{:?} is not an IP address", raw),
            })?,
            None => defaults.host,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT".to_string(),
                reason: format!("{:?} is not a port number", raw),
            })?,
            None => defaults.port,
        };

        let log_level = lookup("LOG_LEVEL").unwrap_or(defaults.log_level);

        let cors_allowed_origins =
            lookup("CORS_ALLOWED_ORIGINS").unwrap_or(defaults.cors_allowed_origins);

        Ok(Self {
            host,
            port,
            log_level,
            cors_allowed_origins,
        })
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}
