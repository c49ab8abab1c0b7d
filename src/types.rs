use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Token pair returned by the Spotify accounts service.
///
/// Never stored server-side; it is handed to the frontend, which sends the
/// refresh token back when the access token expires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshedToken {
    pub access_token: String,
    pub expires_in: u64,
}

/// Subset of `GET /me` used to identify the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub external_id: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub high_score: i64,
}

/// Result of a high score submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOutcome {
    Raised,
    Kept,
    UnknownUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleArtist {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackAlbum {
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A track object from `GET /me/top/tracks`.
///
/// Only the fields the relay reads are typed; everything else is kept in
/// `extra` so the object serializes back to the client unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTrack {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
    #[serde(default)]
    pub album: TrackAlbum,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SpotifyTrack {
    pub fn artist_name(&self) -> Option<&str> {
        self.artists.first().map(|a| a.name.as_str())
    }

    pub fn album_image_url(&self) -> Option<&str> {
        self.album.images.first().map(|i| i.url.as_str())
    }

    pub fn play_url(&self) -> Option<&str> {
        self.external_urls.spotify.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracksPage {
    pub items: Vec<SpotifyTrack>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomTrack {
    pub title: String,
    pub artist: String,
    pub album_image: Option<String>,
    pub spotify_url: Option<String>,
    pub genius_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeniusSearchResponse {
    pub response: GeniusSearchBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeniusSearchBody {
    #[serde(default)]
    pub hits: Vec<GeniusHit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeniusHit {
    pub result: GeniusSong,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeniusSong {
    pub url: String,
    pub primary_artist: GeniusArtist,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeniusArtist {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateScoreRequest {
    pub spotify_id: String,
    pub score: i64,
}
