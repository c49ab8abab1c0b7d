use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Extension, Router,
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, post},
};
use reqwest::Client;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{
    Res, api,
    config::{Config, FetchMode},
    genius::{
        browser,
        page::{BrowserPageSource, DirectPageSource, PageSource},
    },
    info,
    management::{MemoryUserStore, PgUserStore, UserStore},
    warning,
};

/// Everything a request handler needs; immutable after startup.
pub struct AppState {
    pub config: Config,
    pub http: Client,
    pub users: Arc<dyn UserStore>,
    pub pages: Arc<dyn PageSource>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Connects the user store and picks the lyrics page source configured
    /// for this deployment.
    pub async fn from_config(config: Config) -> Res<SharedState> {
        let http = Client::builder().build()?;

        let users: Arc<dyn UserStore> = match &config.database_url {
            Some(url) => Arc::new(PgUserStore::connect(url).await?),
            None => {
                warning!("DATABASE_URL is not set, users are kept in memory only");
                Arc::new(MemoryUserStore::new())
            }
        };

        let pages: Arc<dyn PageSource> = match config.fetch_mode {
            FetchMode::Direct => Arc::new(DirectPageSource::new(http.clone(), config.fetch_timeout)),
            FetchMode::Browser => {
                let launcher = browser::default_launcher().ok_or(
                    "LYRICS_FETCH_MODE=browser requires a build with the `chrome` feature",
                )?;
                Arc::new(BrowserPageSource::new(
                    launcher,
                    config.max_browser_sessions,
                    config.fetch_timeout,
                ))
            }
        };

        Ok(Arc::new(AppState {
            config,
            http,
            users,
            pages,
        }))
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warning!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

pub fn router(state: SharedState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/refresh_token", get(api::refresh_token))
        .route("/spotify/top-artists", get(api::top_artists))
        .route("/spotify/top-tracks", get(api::top_tracks))
        .route("/spotify/random-track", get(api::random_track))
        .route("/genius/lyrics-first-stanza", get(api::lyrics_first_stanza))
        .route("/genius/first-verse", get(api::first_verse))
        .route("/genius/random-verse", get(api::random_verse))
        .route("/user/update-score", post(api::update_score))
        .layer(Extension(state))
        .layer(cors)
}

pub async fn start_api_server(config: Config) -> Res<()> {
    let addr = SocketAddr::from_str(&config.server_addr())?;
    info!("Lyrics pages are fetched in {} mode", config.fetch_mode);

    let state = AppState::from_config(config).await?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Relay listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
