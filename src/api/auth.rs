use std::collections::HashMap;

use axum::{Extension, Json, extract::Query, response::Redirect};

use crate::{
    error::AppError,
    info,
    server::SharedState,
    spotify::auth::{authorize_url, current_profile, exchange_code, refresh_access_token},
    success,
    types::RefreshedToken,
    utils,
};

/// Display name stored when the Spotify profile has none.
pub const UNKNOWN_DISPLAY_NAME: &str = "Unknown";

fn required_param<'a>(
    params: &'a HashMap<String, String>,
    name: &str,
) -> Result<&'a str, AppError> {
    params
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("missing '{}' parameter", name)))
}

pub async fn login(Extension(state): Extension<SharedState>) -> Redirect {
    Redirect::to(&authorize_url(&state.config))
}

/// Completes the login: exchanges the code, registers the player on first
/// sight and sends the browser back to the frontend with the tokens.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<SharedState>,
) -> Result<Redirect, AppError> {
    let code = required_param(&params, "code")?;
    info!("Login callback received");

    let token = exchange_code(&state.http, &state.config, code).await?;
    let profile = current_profile(&state.http, &state.config, &token.access_token).await?;
    let display_name = profile
        .display_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_DISPLAY_NAME.to_string());

    if state.users.ensure_user(&profile.id, &display_name).await? {
        success!("Registered new user {}", profile.id);
    } else {
        info!("User {} already registered", profile.id);
    }

    let target = utils::with_query(
        &format!("{}/callback", state.config.frontend_url),
        &[
            ("access_token", &token.access_token),
            ("refresh_token", token.refresh_token.as_deref().unwrap_or_default()),
            ("display_name", &display_name),
        ],
    );

    Ok(Redirect::to(&target))
}

pub async fn refresh_token(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<SharedState>,
) -> Result<Json<RefreshedToken>, AppError> {
    let refresh = required_param(&params, "refresh_token")?;
    let token = refresh_access_token(&state.http, &state.config, refresh).await?;

    Ok(Json(RefreshedToken {
        access_token: token.access_token,
        expires_in: token.expires_in,
    }))
}
