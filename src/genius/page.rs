use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{
    Client,
    header::{
        ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER, UPGRADE_INSECURE_REQUESTS,
        USER_AGENT,
    },
};
use tokio::sync::Semaphore;

use crate::{
    error::{AppError, ensure_success},
    genius::{browser::BrowserLauncher, verse::LYRICS_CONTAINER_SELECTOR},
    warning,
};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36";

/// Source of lyrics page HTML.
///
/// A page is fetched fresh for every request; implementations must not cache.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_html(&self, url: &str) -> Result<String, AppError>;
}

/// Plain HTTP retrieval with browser-like request headers.
pub struct DirectPageSource {
    client: Client,
    timeout: Duration,
}

impl DirectPageSource {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(REFERER, HeaderValue::from_static("https://genius.com/"));
        headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
        headers
    }
}

#[async_trait]
impl PageSource for DirectPageSource {
    async fn fetch_html(&self, url: &str) -> Result<String, AppError> {
        let res = self
            .client
            .get(url)
            .headers(Self::headers())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::upstream("lyrics page", e))?;

        ensure_success("lyrics page", res)
            .await?
            .text()
            .await
            .map_err(|e| AppError::upstream("lyrics page", e))
    }
}

/// Renders pages in a headless browser, one browser process per request.
///
/// At most `max_sessions` browsers run at the same time; further requests
/// wait for a slot. The session is closed exactly once whether rendering
/// succeeds, fails or times out. The session runs on its own task, so a
/// caller that goes away (client disconnect) still gets its browser closed.
pub struct BrowserPageSource {
    launcher: Arc<dyn BrowserLauncher>,
    slots: Arc<Semaphore>,
    timeout: Duration,
}

impl BrowserPageSource {
    pub fn new(launcher: Arc<dyn BrowserLauncher>, max_sessions: usize, timeout: Duration) -> Self {
        Self {
            launcher,
            slots: Arc::new(Semaphore::new(max_sessions)),
            timeout,
        }
    }
}

async fn render_once(
    launcher: Arc<dyn BrowserLauncher>,
    slots: Arc<Semaphore>,
    timeout: Duration,
    url: String,
) -> Result<String, AppError> {
    let _slot = slots
        .acquire_owned()
        .await
        .map_err(|e| AppError::Browser(e.to_string()))?;

    let mut session = launcher.launch().await?;
    let rendered = tokio::time::timeout(timeout, session.render(&url, LYRICS_CONTAINER_SELECTOR))
        .await
        .unwrap_or_else(|_| {
            Err(AppError::Browser(format!(
                "lyrics container did not appear within {:?}",
                timeout
            )))
        });

    if let Err(e) = session.close().await {
        warning!("Failed to close browser session: {}", e);
    }

    rendered
}

#[async_trait]
impl PageSource for BrowserPageSource {
    async fn fetch_html(&self, url: &str) -> Result<String, AppError> {
        let task = tokio::spawn(render_once(
            Arc::clone(&self.launcher),
            Arc::clone(&self.slots),
            self.timeout,
            url.to_string(),
        ));

        task.await
            .map_err(|e| AppError::Browser(format!("browser task failed: {}", e)))?
    }
}
