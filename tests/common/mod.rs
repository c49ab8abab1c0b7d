#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use coldtify::{
    config::Config,
    genius::page::{DirectPageSource, PageSource},
    management::{MemoryUserStore, UserStore},
    server::{AppState, router},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const CLIENT_ID: &str = "client-123";
pub const CLIENT_SECRET: &str = "secret-456";
pub const FRONTEND_URL: &str = "http://frontend.test";
pub const GENIUS_TOKEN: &str = "genius-token";

pub const LYRICS_PAGE: &str = concat!(
    "<html><head><title>The Band - Morning Lyrics</title></head><body>",
    "<div class=\"SongHeader__Title\">Morning</div>",
    "<div class=\"Lyrics__Container-sc-1ynbvzw-1 kUgSbL\" data-lyrics-container=\"true\">",
    "[Intro]<br>Hey<br>(ooh)<br><br>[Verse 1]<br>",
    "Morning light across the kitchen floor<br>",
    "<a href=\"/annotation\"><span>Coffee cooling by the open door (door)</span></a><br>",
    "Radio is playing something old<br>",
    "Every story that we never told",
    "</div>",
    "<div class=\"RightSidebar__Container\">Ad break</div>",
    "<div class=\"Lyrics__Container-sc-1ynbvzw-1 kUgSbL\" data-lyrics-container=\"true\">",
    "Pack the car and drive into the west<br>",
    "Leave the city sleeping with the rest<br>",
    "[Chorus]<br>",
    "Run run run<br>",
    "We keep running down the line<br>",
    "Nothing stopping us tonight<br>",
    "Until the morning comes again",
    "</div>",
    "</body></html>"
);

/// Section with only five lines of four or more words.
pub const SHORT_VERSE_PAGE: &str = concat!(
    "<html><body>",
    "<div class=\"Lyrics__Container-abc\">",
    "[Chorus]<br>a b c<br>d e f g<br>(note) h i j k<br>l m<br>n o p q<br>r s t u<br>v w x y",
    "</div>",
    "</body></html>"
);

pub const NO_LYRICS_PAGE: &str = "<html><body><div class=\"Other\">Nothing here</div></body></html>";

pub const SONG_FIRST_VERSE: &str = "Morning light across the kitchen floor\n\
Coffee cooling by the open door\n\
Radio is playing something old\n\
Every story that we never told\n\
Pack the car and drive into the west\n\
Leave the city sleeping with the rest";

pub fn song_verse_blocks() -> Vec<String> {
    vec![
        "Morning light across the kitchen floor\n\
Coffee cooling by the open door (door)\n\
Radio is playing something old\n\
Every story that we never told"
            .to_string(),
        "Run run run\n\
We keep running down the line\n\
Nothing stopping us tonight\n\
Until the morning comes again"
            .to_string(),
    ]
}

pub async fn serve(listener: TcpListener, app: Router) {
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
}

fn bearer(headers: &HeaderMap) -> String {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default()
        .to_string()
}

async fn token(Form(form): Form<HashMap<String, String>>) -> Response {
    let client_ok = form.get("client_id").map(String::as_str) == Some(CLIENT_ID)
        && form.get("client_secret").map(String::as_str) == Some(CLIENT_SECRET);
    if !client_ok {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "invalid_client" })))
            .into_response();
    }

    match form.get("grant_type").map(String::as_str) {
        Some("authorization_code") if form.get("code").map(String::as_str) == Some("good-code") => {
            Json(json!({
                "access_token": "access-1",
                "token_type": "Bearer",
                "scope": "user-top-read",
                "expires_in": 3600,
                "refresh_token": "refresh-1"
            }))
            .into_response()
        }
        Some("authorization_code")
            if form.get("code").map(String::as_str) == Some("nameless-code") =>
        {
            Json(json!({
                "access_token": "nameless",
                "token_type": "Bearer",
                "expires_in": 3600,
                "refresh_token": "refresh-2"
            }))
            .into_response()
        }
        Some("refresh_token")
            if form.get("refresh_token").map(String::as_str) == Some("refresh-1") =>
        {
            Json(json!({
                "access_token": "access-2",
                "token_type": "Bearer",
                "scope": "user-top-read",
                "expires_in": 3600
            }))
            .into_response()
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant", "error_description": "Invalid code" })),
        )
            .into_response(),
    }
}

async fn me(headers: HeaderMap) -> Response {
    match bearer(&headers).as_str() {
        "access-1" => Json(json!({ "id": "user-1", "display_name": "Ada", "type": "user" }))
            .into_response(),
        "nameless" => Json(json!({ "id": "user-2", "display_name": null })).into_response(),
        _ => StatusCode::UNAUTHORIZED.into_response(),
    }
}

pub fn top_artists_doc() -> Value {
    json!({
        "items": [
            { "id": "a1", "name": "The Band", "genres": ["indie"] },
            { "id": "a2", "name": "Someone Else", "genres": [] }
        ],
        "total": 2,
        "limit": 50,
        "offset": 0
    })
}

async fn top_artists(headers: HeaderMap) -> Response {
    if bearer(&headers).is_empty() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(top_artists_doc()).into_response()
}

async fn top_tracks(headers: HeaderMap, Query(q): Query<HashMap<String, String>>) -> Response {
    let token = bearer(&headers);
    let offset: u64 = q.get("offset").and_then(|o| o.parse().ok()).unwrap_or(0);
    let limit: u64 = q.get("limit").and_then(|l| l.parse().ok()).unwrap_or(20);
    assert_eq!(limit, 50);

    if token == "broken" && offset == 100 {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }

    // earlier pages answer later, so completion order is the reverse of offset order
    tokio::time::sleep(Duration::from_millis(200 - offset)).await;

    let artist = if token == "lonely" { "Nobody" } else { "The Band" };
    let items: Vec<Value> = (offset..offset + limit)
        .map(|n| {
            json!({
                "id": format!("id-{}", n),
                "name": format!("track-{}", n),
                "popularity": n,
                "artists": [{ "id": "artist-1", "name": artist }],
                "album": {
                    "name": "Album",
                    "images": [{ "url": format!("https://img.test/{}.jpg", n), "height": 640 }]
                },
                "external_urls": { "spotify": format!("https://open.spotify.test/track/{}", n) }
            })
        })
        .collect();

    Json(json!({ "items": items, "total": 250, "limit": limit, "offset": offset })).into_response()
}

async fn genius_search(
    State(base): State<String>,
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    if bearer(&headers) != GENIUS_TOKEN {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let query = q.get("q").cloned().unwrap_or_default();
    let hits = if query.contains("Nobody") {
        json!([])
    } else {
        json!([
            { "result": { "url": format!("{}/lyrics/other", base), "title": "Other", "primary_artist": { "name": "Someone Else" } } },
            { "result": { "url": format!("{}/lyrics/song", base), "title": "Morning", "primary_artist": { "name": "THE BAND feat. Guest" } } }
        ])
    };

    Json(json!({ "meta": { "status": 200 }, "response": { "hits": hits } })).into_response()
}

/// Starts a fake Spotify + Genius upstream and returns its base URL.
pub async fn spawn_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let app = Router::new()
        .route("/api/token", post(token))
        .route("/v1/me", get(me))
        .route("/v1/me/top/artists", get(top_artists))
        .route("/v1/me/top/tracks", get(top_tracks))
        .route("/genius/search", get(genius_search))
        .route("/lyrics/song", get(|| async { Html(LYRICS_PAGE) }))
        .route("/lyrics/other", get(|| async { Html(NO_LYRICS_PAGE) }))
        .route("/lyrics/short", get(|| async { Html(SHORT_VERSE_PAGE) }))
        .route("/lyrics/empty", get(|| async { Html(NO_LYRICS_PAGE) }))
        .route(
            "/lyrics/blocked",
            get(|| async { (StatusCode::FORBIDDEN, "challenge") }),
        )
        .with_state(base.clone());

    serve(listener, app).await;
    base
}

pub fn test_vars(upstream: &str) -> HashMap<&'static str, String> {
    HashMap::from([
        ("SPOTIFY_CLIENT_ID", CLIENT_ID.to_string()),
        ("SPOTIFY_CLIENT_SECRET", CLIENT_SECRET.to_string()),
        (
            "SPOTIFY_REDIRECT_URI",
            "http://localhost:8888/callback".to_string(),
        ),
        ("SPOTIFY_AUTH_URL", format!("{}/authorize", upstream)),
        ("SPOTIFY_TOKEN_URL", format!("{}/api/token", upstream)),
        ("SPOTIFY_API_URL", format!("{}/v1", upstream)),
        ("GENIUS_API_URL", format!("{}/genius", upstream)),
        ("GENIUS_ACCESS_TOKEN", GENIUS_TOKEN.to_string()),
        ("FRONTEND_URL", format!("{}/", FRONTEND_URL)),
        ("LYRICS_FETCH_TIMEOUT_SECS", "5".to_string()),
    ])
}

pub fn test_config(upstream: &str) -> Config {
    let vars = test_vars(upstream);
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

pub struct Relay {
    pub base: String,
    pub users: Arc<MemoryUserStore>,
    pub client: reqwest::Client,
}

impl Relay {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

/// Serves the relay against `upstream` with an in-memory user store.
pub async fn start_relay(upstream: &str) -> Relay {
    let config = test_config(upstream);
    let pages = Arc::new(DirectPageSource::new(
        reqwest::Client::new(),
        config.fetch_timeout,
    ));
    start_relay_with(config, pages).await
}

pub async fn start_relay_with(config: Config, pages: Arc<dyn PageSource>) -> Relay {
    let users = Arc::new(MemoryUserStore::new());
    let state = Arc::new(AppState {
        config,
        http: reqwest::Client::new(),
        users: users.clone() as Arc<dyn UserStore>,
        pages,
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    serve(listener, router(state)).await;

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    Relay {
        base,
        users,
        client,
    }
}
