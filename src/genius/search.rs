use reqwest::Client;

use crate::{
    config::Config,
    error::{AppError, ensure_success},
    types::{GeniusHit, GeniusSearchResponse},
};

/// Runs a Genius search for `"<song> <artist>"` and returns the hit list.
pub async fn search_hits(
    client: &Client,
    config: &Config,
    song: &str,
    artist: &str,
) -> Result<Vec<GeniusHit>, AppError> {
    let query = format!("{} {}", song, artist);
    let url = format!(
        "{uri}/search?q={q}",
        uri = config.genius_api_url,
        q = urlencoding::encode(&query)
    );

    let res = client
        .get(&url)
        .bearer_auth(&config.genius_token)
        .send()
        .await
        .map_err(|e| AppError::upstream("genius search", e))?;

    let body = ensure_success("genius search", res)
        .await?
        .json::<GeniusSearchResponse>()
        .await
        .map_err(|e| AppError::upstream("genius search", e))?;

    Ok(body.response.hits)
}

/// Picks the hit whose primary artist contains `artist` (case-insensitive),
/// falling back to the first hit.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] for an empty hit list.
pub fn select_hit<'a>(hits: &'a [GeniusHit], artist: &str) -> Result<&'a GeniusHit, AppError> {
    let wanted = artist.to_lowercase();
    hits.iter()
        .find(|hit| {
            hit.result
                .primary_artist
                .name
                .to_lowercase()
                .contains(&wanted)
        })
        .or_else(|| hits.first())
        .ok_or_else(|| AppError::NotFound("song not found on Genius".to_string()))
}

/// Searches Genius and returns the lyrics page URL of the best hit.
pub async fn locate_lyrics_url(
    client: &Client,
    config: &Config,
    song: &str,
    artist: &str,
) -> Result<String, AppError> {
    let hits = search_hits(client, config, song, artist).await?;
    let hit = select_hit(&hits, artist)?;
    Ok(hit.result.url.clone())
}
