use std::env;

use crate::config::parse_var;
use crate::error::AppError;

const DEFAULT_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Listener and CORS settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = parse_var(&lookup, "BACKEND_HOST", "0.0.0.0".to_string())?;
        let port = parse_var(&lookup, "BACKEND_PORT", 3001u16)?;
        let cors_origins = parse_origins(&lookup("CORS_ALLOWED_ORIGINS").unwrap_or_default());
        Ok(Self {
            host,
            port,
            cors_origins,
        })
    }
}

/// Comma-separated origins, lightly validated. Empty, `null` and non-http
/// entries are dropped; nothing valid falls back to localhost.
pub fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect();

    if origins.is_empty() {
        DEFAULT_ORIGINS.iter().map(|s| s.to_string()).collect()
    } else {
        origins
    }
}
