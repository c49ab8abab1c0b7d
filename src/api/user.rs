use axum::{Extension, Json, extract::rejection::JsonRejection};
use serde_json::{Value, json};

use crate::{error::AppError, server::SharedState, types::ScoreOutcome, utils};

/// `POST /user/update-score` with `{ "spotify_id": "...", "score": 42 }`.
///
/// Responds `{ "updated": true }` only when the stored high score was raised.
/// An unknown `spotify_id` is a 404 `{ "error": ... }`, not a server error:
/// scores are only kept for players who completed the login callback.
pub async fn update_score(
    Extension(state): Extension<SharedState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(body) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    let request = utils::parse_score_request(&body)?;

    let updated = match state
        .users
        .raise_high_score(&request.spotify_id, request.score)
        .await?
    {
        ScoreOutcome::Raised => true,
        ScoreOutcome::Kept => false,
        ScoreOutcome::UnknownUser => {
            return Err(AppError::NotFound(format!(
                "unknown user {}",
                request.spotify_id
            )));
        }
    };

    Ok(Json(json!({ "updated": updated })))
}
