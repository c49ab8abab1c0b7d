use std::collections::HashMap;

use axum::{Extension, Json, extract::Query};
use serde_json::{Value, json};

use crate::{
    error::AppError,
    genius::{
        search::locate_lyrics_url,
        verse::{
            first_stanza, first_verse as extract_first_verse, lyrics_lines,
            random_verse as extract_random_verse,
        },
    },
    server::SharedState,
};

fn param<'a>(params: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    params.get(name).map(|v| v.trim()).filter(|v| !v.is_empty())
}

async fn page_lines(state: &SharedState, url: &str) -> Result<Vec<String>, AppError> {
    let html = state.pages.fetch_html(url).await?;
    let lines = lyrics_lines(&html);
    if lines.is_empty() {
        return Err(AppError::NotFound("no lyrics found on page".to_string()));
    }

    Ok(lines)
}

pub async fn lyrics_first_stanza(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<SharedState>,
) -> Result<Json<Value>, AppError> {
    let (Some(song), Some(artist)) = (param(&params, "song"), param(&params, "artist")) else {
        return Err(AppError::Validation(
            "'song' and 'artist' parameters are required".to_string(),
        ));
    };

    let url = locate_lyrics_url(&state.http, &state.config, song, artist).await?;
    let html = state.pages.fetch_html(&url).await?;
    let stanza = first_stanza(&html)?;

    Ok(Json(json!({ "firstStanza": stanza })))
}

pub async fn first_verse(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<SharedState>,
) -> Result<Json<Value>, AppError> {
    let url = param(&params, "url")
        .ok_or_else(|| AppError::Validation("missing 'url' parameter".to_string()))?;

    let lines = page_lines(&state, url).await?;
    let verse = extract_first_verse(&lines)?;

    Ok(Json(json!({ "firstVerse": verse })))
}

pub async fn random_verse(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<SharedState>,
) -> Result<Json<Value>, AppError> {
    let url = param(&params, "url")
        .ok_or_else(|| AppError::Validation("missing 'url' parameter".to_string()))?;

    let lines = page_lines(&state, url).await?;
    let verse = {
        let mut rng = rand::rng();
        extract_random_verse(&lines, &mut rng)?
    };

    Ok(Json(json!({ "verse": verse })))
}
