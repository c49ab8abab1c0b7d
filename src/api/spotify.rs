use axum::{Extension, Json, http::HeaderMap};
use serde_json::Value;

use crate::{
    error::AppError,
    genius::search::locate_lyrics_url,
    server::SharedState,
    spotify::top::{
        random_track as pick_random_track, top_artists as fetch_top_artists,
        top_tracks as fetch_top_tracks,
    },
    types::{RandomTrack, SpotifyTrack},
    utils,
};

fn require_token(headers: &HeaderMap) -> Result<String, AppError> {
    utils::bearer_token(headers).ok_or(AppError::Unauthorized)
}

pub async fn top_artists(
    headers: HeaderMap,
    Extension(state): Extension<SharedState>,
) -> Result<Json<Value>, AppError> {
    let token = require_token(&headers)?;
    let artists = fetch_top_artists(&state.http, &state.config, &token).await?;
    Ok(Json(artists))
}

pub async fn top_tracks(
    headers: HeaderMap,
    Extension(state): Extension<SharedState>,
) -> Result<Json<Vec<SpotifyTrack>>, AppError> {
    let token = require_token(&headers)?;
    let tracks = fetch_top_tracks(&state.http, &state.config, &token).await?;
    Ok(Json(tracks))
}

/// Picks one of the user's top tracks and looks up its Genius page.
///
/// A search without hits is not an error here: `geniusUrl` is `null`.
pub async fn random_track(
    headers: HeaderMap,
    Extension(state): Extension<SharedState>,
) -> Result<Json<RandomTrack>, AppError> {
    let token = require_token(&headers)?;
    let tracks = fetch_top_tracks(&state.http, &state.config, &token).await?;

    let track = {
        let mut rng = rand::rng();
        pick_random_track(&tracks, &mut rng)?.clone()
    };

    let title = track.name.clone();
    let artist = track.artist_name().unwrap_or_default().to_string();

    let genius_url = match locate_lyrics_url(&state.http, &state.config, &title, &artist).await {
        Ok(url) => Some(url),
        Err(AppError::NotFound(_)) => None,
        Err(e) => return Err(e),
    };

    Ok(Json(RandomTrack {
        album_image: track.album_image_url().map(str::to_string),
        spotify_url: track.play_url().map(str::to_string),
        title,
        artist,
        genius_url,
    }))
}
