//! # CLI Module
//!
//! Command implementations behind the `coldtify` binary.
//!
//! - [`serve`] - Loads the configuration and runs the HTTP relay
//! - [`verse`] - Extracts a verse from a lyrics page on the command line
//!
//! Commands report progress with the crate's logging macros and terminate the
//! process through [`error!`](crate::error) on unrecoverable failures.

mod serve;
mod verse;

pub use serve::serve;
pub use verse::verse;
