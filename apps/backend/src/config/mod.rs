//! Environment-driven configuration, read once at startup.

pub mod game;
pub mod server;

pub use game::GameConfig;
pub use server::ServerConfig;

use crate::error::AppError;

/// Parse a variable that may be absent. Unset and blank both mean `None`.
pub(crate) fn parse_opt_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, AppError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_string()) {
        Some(raw) if !raw.is_empty() => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::config(format!("{key} has an invalid value: '{raw}'"))),
        _ => Ok(None),
    }
}

pub(crate) fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    Ok(parse_opt_var(lookup, key)?.unwrap_or(default))
}
