//! # Spotify Integration Module
//!
//! Client functions for the two Spotify services the relay talks to:
//!
//! ```text
//! Relay handlers (api::auth, api::spotify)
//!          ↓
//! Spotify Integration Layer
//!     ├── Accounts (authorize URL, code/refresh exchange, /me)
//!     └── Top items (artists passthrough, 250-track aggregation)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! Every function takes the shared [`reqwest::Client`] and the immutable
//! [`Config`](crate::config::Config) explicitly; base URLs come from the
//! configuration so tests can point them at a local server.
//!
//! ## Error handling
//!
//! Token endpoint failures surface as
//! [`AppError::UpstreamAuth`](crate::error::AppError::UpstreamAuth), Web API
//! failures as [`AppError::Upstream`](crate::error::AppError::Upstream). No
//! request is retried.

pub mod auth;
pub mod top;
