//! Start-up configuration read from the environment.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `TODO_BIND` | full listen address, overrides `PORT` | unset |
//! | `PORT` | port on `127.0.0.1` | `3000` |
//! | `TODO_CORS_ORIGINS` | comma-separated origins, `*` for any | `*` |
//! | `TODO_LOG_JSON` | emit JSON log lines | `false` |

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub cors_origins: Vec<String>,
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            cors_origins: vec!["*".to_string()],
            log_json: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBind(String),
    InvalidPort(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBind(v) => write!(f, "TODO_BIND is not a socket address: {v}"),
            ConfigError::InvalidPort(v) => write!(f, "PORT is not a valid port: {v}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any variable source; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(bind) = lookup("TODO_BIND").filter(|v| !v.trim().is_empty()) {
            config.bind_addr = bind
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidBind(bind.clone()))?;
        } else if let Some(port) = lookup("PORT").filter(|v| !v.trim().is_empty()) {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
            config.bind_addr.set_port(port);
        }

        if let Some(origins) = lookup("TODO_CORS_ORIGINS") {
            let origins: Vec<String> = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
            if !origins.is_empty() {
                config.cors_origins = origins;
            }
        }

        config.log_json = lookup("TODO_LOG_JSON")
            .map(|v| env_bool(&v))
            .unwrap_or(false);

        Ok(config)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn env_bool(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "TRUE" | "yes" | "YES")
}
