use futures_util::future::try_join_all;
use rand::{Rng, seq::IndexedRandom};
use reqwest::Client;
use serde_json::Value;

use crate::{
    config::Config,
    error::{AppError, ensure_success},
    info,
    types::{SpotifyTrack, TopTracksPage},
};

/// Page size used for every top-items request (Spotify's maximum).
pub const TOP_PAGE_SIZE: u32 = 50;

/// Offsets requested by [`top_tracks`]; together they cover the 250 tracks
/// Spotify exposes per time range.
pub const TOP_TRACK_OFFSETS: [u32; 5] = [0, 50, 100, 150, 200];

/// Returns the user's top artists as the raw Spotify JSON document.
pub async fn top_artists(client: &Client, config: &Config, token: &str) -> Result<Value, AppError> {
    let url = format!(
        "{uri}/me/top/artists?limit={limit}",
        uri = config.spotify_api_url,
        limit = TOP_PAGE_SIZE
    );

    let res = client
        .get(&url)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| AppError::upstream("spotify top artists", e))?;

    ensure_success("spotify top artists", res)
        .await?
        .json::<Value>()
        .await
        .map_err(|e| AppError::upstream("spotify top artists", e))
}

/// Fetches one page of the user's top tracks.
pub async fn top_tracks_page(
    client: &Client,
    config: &Config,
    token: &str,
    offset: u32,
) -> Result<Vec<SpotifyTrack>, AppError> {
    let url = format!(
        "{uri}/me/top/tracks?limit={limit}&offset={offset}",
        uri = config.spotify_api_url,
        limit = TOP_PAGE_SIZE,
        offset = offset
    );

    let res = client
        .get(&url)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| AppError::upstream("spotify top tracks", e))?;

    let page = ensure_success("spotify top tracks", res)
        .await?
        .json::<TopTracksPage>()
        .await
        .map_err(|e| AppError::upstream("spotify top tracks", e))?;

    Ok(page.items)
}

/// Retrieves up to 250 top tracks of the user.
///
/// All five pages in [`TOP_TRACK_OFFSETS`] are requested concurrently. The
/// result is concatenated in offset order no matter which page answers
/// first, so the position of a track in the returned vector is its rank.
///
/// # Errors
///
/// Fails as soon as any page fails; partial results are never returned.
pub async fn top_tracks(
    client: &Client,
    config: &Config,
    token: &str,
) -> Result<Vec<SpotifyTrack>, AppError> {
    let pages = try_join_all(
        TOP_TRACK_OFFSETS
            .iter()
            .map(|&offset| top_tracks_page(client, config, token, offset)),
    )
    .await?;

    let tracks: Vec<SpotifyTrack> = pages.into_iter().flatten().collect();
    info!("Aggregated {} top tracks", tracks.len());

    Ok(tracks)
}

/// Picks one track uniformly at random.
pub fn random_track<'a, R: Rng + ?Sized>(
    tracks: &'a [SpotifyTrack],
    rng: &mut R,
) -> Result<&'a SpotifyTrack, AppError> {
    tracks
        .choose(rng)
        .ok_or_else(|| AppError::NotFound("no top tracks available".to_string()))
}
