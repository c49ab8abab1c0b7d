//! # Genius Integration Module
//!
//! Lyrics lookup for tracks coming out of Spotify.
//!
//! - [`search`] queries the Genius API and picks the hit whose primary artist
//!   matches the requested one.
//! - [`page`] acquires lyrics page HTML, either over plain HTTP or through a
//!   headless browser when Genius puts a bot challenge in front of the page.
//! - [`browser`] holds the browser session abstraction and, with the `chrome`
//!   feature, the Chromium implementation.
//! - [`verse`] turns the page into lyric lines and extracts the first verse,
//!   a random verse or the first stanza.
//!
//! Pages are never cached: every extraction fetches and parses the page again.

pub mod browser;
pub mod page;
pub mod search;
pub mod verse;
