use reqwest::Client;

use crate::{
    config::Config,
    error::{AppError, ensure_success},
    types::{SpotifyProfile, Token},
    utils,
};

/// Builds the Spotify authorization URL the `/login` route redirects to.
///
/// The URL carries `response_type=code`, the client id, the configured scope
/// and the redirect URI, all URL-encoded.
///
/// # Example
///
/// ```
/// let url = authorize_url(&config);
/// // https://accounts.spotify.com/authorize?response_type=code&client_id=...
/// ```
pub fn authorize_url(config: &Config) -> String {
    utils::with_query(
        &config.spotify_auth_url,
        &[
            ("response_type", "code"),
            ("client_id", &config.spotify_client_id),
            ("scope", &config.spotify_scope),
            ("redirect_uri", &config.spotify_redirect_uri),
        ],
    )
}

/// Exchanges an authorization code for a token pair.
///
/// Completes the authorization-code flow started by `/login`. The client
/// secret is sent in the form body together with the client id.
///
/// # Errors
///
/// Returns [`AppError::UpstreamAuth`] when the accounts service cannot be
/// reached or answers with a non-2xx status. The upstream status and body are
/// kept on the error for logging.
pub async fn exchange_code(client: &Client, config: &Config, code: &str) -> Result<Token, AppError> {
    request_token(
        client,
        config,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &config.spotify_redirect_uri),
            ("client_id", &config.spotify_client_id),
            ("client_secret", &config.spotify_client_secret),
        ],
    )
    .await
}

/// Exchanges a refresh token for a fresh access token.
///
/// Spotify may or may not rotate the refresh token; whatever comes back is
/// returned unchanged.
pub async fn refresh_access_token(
    client: &Client,
    config: &Config,
    refresh_token: &str,
) -> Result<Token, AppError> {
    request_token(
        client,
        config,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", &config.spotify_client_id),
            ("client_secret", &config.spotify_client_secret),
        ],
    )
    .await
}

async fn request_token(
    client: &Client,
    config: &Config,
    form: &[(&str, &str)],
) -> Result<Token, AppError> {
    let res = client
        .post(&config.spotify_token_url)
        .form(form)
        .send()
        .await
        .map_err(|e| AppError::UpstreamAuth {
            status: None,
            body: e.to_string(),
        })?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(AppError::UpstreamAuth {
            status: Some(status.as_u16()),
            body,
        });
    }

    res.json::<Token>().await.map_err(|e| AppError::UpstreamAuth {
        status: Some(status.as_u16()),
        body: e.to_string(),
    })
}

/// Reads the profile of the user owning `access_token` (`GET /me`).
pub async fn current_profile(
    client: &Client,
    config: &Config,
    access_token: &str,
) -> Result<SpotifyProfile, AppError> {
    let res = client
        .get(format!("{}/me", config.spotify_api_url))
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| AppError::upstream("spotify profile", e))?;

    ensure_success("spotify profile", res)
        .await?
        .json::<SpotifyProfile>()
        .await
        .map_err(|e| AppError::upstream("spotify profile", e))
}
