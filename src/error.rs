//! Error taxonomy for the relay.
//!
//! Every request handler returns `Result<_, AppError>`. The variant decides
//! the HTTP status; upstream bodies and storage details are logged through
//! [`warning!`](crate::warning) and replaced by a short message in the JSON
//! error body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::warning;

/// Failures raised by a [`UserStore`](crate::management::UserStore).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database query failed: {0}")]
    Query(#[from] sqlx::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed request parameters.
    #[error("{0}")]
    Validation(String),

    #[error("no token provided")]
    Unauthorized,

    /// The accounts service rejected a code or refresh token exchange.
    #[error("token exchange failed")]
    UpstreamAuth { status: Option<u16>, body: String },

    /// Any other third-party call (Spotify Web API, Genius) failed.
    #[error("{service} request failed")]
    Upstream {
        service: &'static str,
        status: Option<u16>,
        body: String,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("storage failure")]
    Storage(#[from] StorageError),

    #[error("browser rendering failed")]
    Browser(String),
}

impl AppError {
    /// Builds an [`AppError::Upstream`] from a transport-level reqwest failure.
    pub fn upstream(service: &'static str, err: reqwest::Error) -> Self {
        AppError::Upstream {
            service,
            status: err.status().map(|s| s.as_u16()),
            body: err.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UpstreamAuth { .. }
            | AppError::Upstream { .. }
            | AppError::Storage(_)
            | AppError::Browser(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        match self {
            AppError::UpstreamAuth { status, body } => {
                warning!("Token exchange failed (status {:?}): {}", status, body)
            }
            AppError::Upstream {
                service,
                status,
                body,
            } => warning!("{} request failed (status {:?}): {}", service, status, body),
            AppError::Storage(e) => warning!("Storage failure: {}", e),
            AppError::Browser(e) => warning!("Browser rendering failed: {}", e),
            _ => {}
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Turns a non-2xx upstream response into an [`AppError::Upstream`], keeping
/// the body for the log line.
pub async fn ensure_success(
    service: &'static str,
    res: reqwest::Response,
) -> Result<reqwest::Response, AppError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    Err(AppError::Upstream {
        service,
        status: Some(status.as_u16()),
        body,
    })
}
