//! Coldtify Relay Library
//!
//! This library implements the backend relay behind the Coldtify game. It signs
//! users in with Spotify, keeps a tiny profile/score table, aggregates a user's
//! top tracks and enriches them with lyrics verses scraped from Genius.
//!
//! # Modules
//!
//! - `api` - HTTP handlers mounted by the relay server
//! - `cli` - Command-line entry points (`serve`, `verse`)
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy and its mapping to HTTP responses
//! - `genius` - Genius search, lyrics page acquisition and verse extraction
//! - `management` - User profile and high score persistence
//! - `server` - Router assembly and the listening loop
//! - `spotify` - Spotify accounts and Web API client functions
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod genius;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the process-level plumbing (startup, CLI commands) where the
/// concrete error type does not matter to the caller. Request handling uses
/// [`error::AppError`] instead so that every failure maps to a status code.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for unrecoverable startup failures. Request handlers never call
/// it; they return an [`error::AppError`] instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// This is where upstream failures end up: the status code and body returned
/// by Spotify or Genius are written here and never forwarded to the client.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
