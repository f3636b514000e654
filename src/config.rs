use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_POOL_SIZE: u32 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Process configuration, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub api_key: String,
    pub bind_addr: SocketAddr,
    pub pool_size: u32,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("api_key", &"<redacted>")
            .field("bind_addr", &self.bind_addr)
            .field("pool_size", &self.pool_size)
            .finish()
    }
}

impl Config {
    /// Reads the configuration from the process environment. Call
    /// `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        if database_url.trim().is_empty() {
            return Err(ConfigError::Empty("DATABASE_URL"));
        }

        let api_key = lookup("API_KEY").ok_or(ConfigError::Missing("API_KEY"))?;
        if api_key.is_empty() {
            return Err(ConfigError::Empty("API_KEY"));
        }

        let bind_addr = match lookup("BIND_ADDR") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "BIND_ADDR",
                value,
            })?,
            None => DEFAULT_BIND_ADDR
                .parse()
                .map_err(|_| ConfigError::Invalid {
                    name: "BIND_ADDR",
                    value: DEFAULT_BIND_ADDR.to_string(),
                })?,
        };

        let pool_size = match lookup("DATABASE_POOL_SIZE") {
            Some(value) => match value.parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "DATABASE_POOL_SIZE",
                        value,
                    })
                }
            },
            None => DEFAULT_POOL_SIZE,
        };

        Ok(Self {
            database_url,
            api_key,
            bind_addr,
            pool_size,
        })
    }
}
