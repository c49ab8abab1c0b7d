//! Configuration management for the Coldtify relay.
//!
//! This module handles loading configuration values from environment variables
//! and `.env` files. Values are read exactly once at startup into an immutable
//! [`Config`] that is handed to every component explicitly.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, fmt, path::PathBuf, time::Duration};

use thiserror::Error;

pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_SCOPE: &str = "user-top-read";
pub const DEFAULT_GENIUS_API_URL: &str = "https://api.genius.com";
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,https://coldtify.vercel.app";
pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8888;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_MAX_BROWSER_SESSIONS: usize = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

/// How lyrics pages are acquired.
///
/// Genius serves the lyrics markup to plain HTTP clients most of the time;
/// when it starts answering with a bot challenge the deployment can switch to
/// rendering through a headless browser instead. One strategy is used for all
/// routes of a running relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Direct,
    Browser,
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchMode::Direct => write!(f, "direct"),
            FetchMode::Browser => write!(f, "browser"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub spotify_redirect_uri: String,
    pub spotify_auth_url: String,
    pub spotify_token_url: String,
    pub spotify_api_url: String,
    pub spotify_scope: String,
    pub frontend_url: String,
    pub genius_token: String,
    pub genius_api_url: String,
    pub database_url: Option<String>,
    pub allowed_origins: Vec<String>,
    pub server_address: String,
    pub port: u16,
    pub fetch_mode: FetchMode,
    pub fetch_timeout: Duration,
    pub max_browser_sessions: usize,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated like unset ones, so `KEY=` in a `.env` file
    /// falls back to the default (or fails for required keys).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let port = match get("PORT") {
            Some(v) => v.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: v,
            })?,
            None => DEFAULT_PORT,
        };

        let fetch_mode = match get("LYRICS_FETCH_MODE") {
            Some(v) => match v.trim().to_lowercase().as_str() {
                "direct" => FetchMode::Direct,
                "browser" => FetchMode::Browser,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "LYRICS_FETCH_MODE",
                        value: v,
                    });
                }
            },
            None => FetchMode::Direct,
        };

        let fetch_timeout_secs = match get("LYRICS_FETCH_TIMEOUT_SECS") {
            Some(v) => v.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                key: "LYRICS_FETCH_TIMEOUT_SECS",
                value: v,
            })?,
            None => DEFAULT_FETCH_TIMEOUT_SECS,
        };

        let max_browser_sessions = match get("MAX_BROWSER_SESSIONS") {
            Some(v) => match v.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "MAX_BROWSER_SESSIONS",
                        value: v,
                    });
                }
            },
            None => DEFAULT_MAX_BROWSER_SESSIONS,
        };

        let allowed_origins = or_default("ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS)
            .split(',')
            .map(|o| o.trim().trim_end_matches('/').to_string())
            .filter(|o| !o.is_empty())
            .collect();

        Ok(Config {
            spotify_client_id: required("SPOTIFY_CLIENT_ID")?,
            spotify_client_secret: required("SPOTIFY_CLIENT_SECRET")?,
            spotify_redirect_uri: required("SPOTIFY_REDIRECT_URI")?,
            spotify_auth_url: or_default("SPOTIFY_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL),
            spotify_token_url: or_default("SPOTIFY_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL),
            spotify_api_url: trim_base(or_default("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)),
            spotify_scope: or_default("SPOTIFY_SCOPE", DEFAULT_SPOTIFY_SCOPE),
            frontend_url: trim_base(required("FRONTEND_URL")?),
            genius_token: required("GENIUS_ACCESS_TOKEN")?,
            genius_api_url: trim_base(or_default("GENIUS_API_URL", DEFAULT_GENIUS_API_URL)),
            database_url: get("DATABASE_URL"),
            allowed_origins,
            server_address: or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            port,
            fetch_mode,
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            max_browser_sessions,
        })
    }

    /// Socket address the relay binds to, e.g. `0.0.0.0:8888`.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_address, self.port)
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Loads environment variables from `.env` files.
///
/// The working directory is checked first, then the platform-specific local
/// data directory:
/// - Linux: `~/.local/share/coldtify/.env`
/// - macOS: `~/Library/Application Support/coldtify/.env`
/// - Windows: `%LOCALAPPDATA%/coldtify/.env`
///
/// Variables already present in the environment are never overwritten, and a
/// missing file is not an error: hosted deployments usually configure the
/// process environment directly.
///
/// # Errors
///
/// Returns an error string if a `.env` file exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let local = PathBuf::from(".env");
    if local.is_file() {
        dotenv::from_path(&local).map_err(|e| e.to_string())?;
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("coldtify/.env");
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    Ok(())
}
