//! # API Module
//!
//! HTTP handlers of the relay. Every handler receives the shared
//! [`AppState`](crate::server::AppState) through an `Extension` layer and
//! returns `Result<_, AppError>`, so failures become a JSON `{ "error": ... }`
//! body with the matching status code.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - Redirects to the Spotify authorization page
//! - [`callback`] - Exchanges the code, registers the user, redirects to the frontend
//! - [`refresh_token`] - Trades a refresh token for a new access token
//!
//! ### Spotify
//!
//! - [`top_artists`] - Raw top artists document
//! - [`top_tracks`] - Up to 250 top tracks, in rank order
//! - [`random_track`] - One random top track with its Genius page URL
//!
//! ### Genius
//!
//! - [`lyrics_first_stanza`] - Searches a song and returns its first stanza
//! - [`first_verse`] - First six-line verse of a lyrics page
//! - [`random_verse`] - A random four-line verse of a lyrics page
//!
//! ### Users
//!
//! - [`update_score`] - Raises the stored high score
//!
//! ### Monitoring
//!
//! - [`health`] - Status and version information
//!
//! Endpoints reading Spotify data expect `Authorization: Bearer <token>` and
//! answer 401 without it.

mod auth;
mod genius;
mod health;
mod spotify;
mod user;

pub use auth::{UNKNOWN_DISPLAY_NAME, callback, login, refresh_token};
pub use genius::{first_verse, lyrics_first_stanza, random_verse};
pub use health::health;
pub use spotify::{random_track, top_artists, top_tracks};
pub use user::update_score;
