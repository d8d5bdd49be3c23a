// src/config.rs

use std::env;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Server settings, read from the environment (and `.env` if present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` selects the in-memory store.
    pub database_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(host) = lookup("PORTAL_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORTAL_PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "PORTAL_PORT",
                value: port.clone(),
            })?;
        }
        config.database_url = lookup("PORTAL_DATABASE_URL").filter(|url| !url.trim().is_empty());

        Ok(config)
    }

    /// Host and port as handed to `TcpListener::bind`, which resolves names
    /// such as `localhost`.
    pub fn bind_target(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

/// Where the client view-models send their requests.
pub fn api_url_from_env() -> String {
    dotenv::dotenv().ok();
    api_url_from_lookup(|key| env::var(key).ok())
}

pub fn api_url_from_lookup<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("PORTAL_API_URL")
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}
