use axum::http::{HeaderMap, header::AUTHORIZATION};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::{error::AppError, types::UpdateScoreRequest};

static PARENTHETICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").unwrap());

/// Returns the token part of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split_whitespace();
    let scheme = parts.next()?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    parts.next().map(str::to_string)
}

/// A lyrics line wholly wrapped in square brackets, e.g. `[Chorus]`.
pub fn is_section_marker(line: &str) -> bool {
    line.len() >= 2 && line.starts_with('[') && line.ends_with(']')
}

/// Removes every `( ... )` aside and trims the remainder.
pub fn strip_parentheticals(line: &str) -> String {
    PARENTHETICAL.replace_all(line, "").trim().to_string()
}

pub fn word_count(line: &str) -> usize {
    line.split_whitespace().count()
}

/// Validates the JSON body of `POST /user/update-score`.
///
/// `score` must be a JSON integer; floats, strings and missing values are
/// rejected just like an empty `spotify_id`.
pub fn parse_score_request(body: &Value) -> Result<UpdateScoreRequest, AppError> {
    let spotify_id = body
        .get("spotify_id")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::Validation("missing spotify_id".to_string()))?;

    let score = body
        .get("score")
        .and_then(Value::as_i64)
        .ok_or_else(|| AppError::Validation("score must be an integer".to_string()))?;

    Ok(UpdateScoreRequest {
        spotify_id: spotify_id.to_string(),
        score,
    })
}

/// Builds `base?k1=v1&k2=v2` with every value URL-encoded.
pub fn with_query(base: &str, params: &[(&str, &str)]) -> String {
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", base, query)
}
