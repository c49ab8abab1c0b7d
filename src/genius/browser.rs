use async_trait::async_trait;

use crate::error::AppError;

/// One running headless browser.
///
/// Created by a [`BrowserLauncher`] for a single request. `close` consumes
/// the session so it cannot be closed twice.
#[async_trait]
pub trait BrowserSession: Send {
    /// Navigates to `url`, waits until an element matching `wait_for` is in
    /// the DOM and returns the rendered document HTML.
    async fn render(&mut self, url: &str, wait_for: &str) -> Result<String, AppError>;

    async fn close(self: Box<Self>) -> Result<(), AppError>;
}

#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, AppError>;
}

/// Returns the launcher compiled into this binary, if any.
pub fn default_launcher() -> Option<std::sync::Arc<dyn BrowserLauncher>> {
    #[cfg(feature = "chrome")]
    {
        Some(std::sync::Arc::new(chrome::ChromeLauncher))
    }

    #[cfg(not(feature = "chrome"))]
    {
        None
    }
}

#[cfg(feature = "chrome")]
pub mod chrome {
    use std::time::Duration;

    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser, BrowserConfig};
    use futures_util::StreamExt;
    use tokio::task::JoinHandle;

    use super::{BrowserLauncher, BrowserSession};
    use crate::error::AppError;

    const POLL_INTERVAL: Duration = Duration::from_millis(250);

    /// Launches a local Chromium through the DevTools protocol.
    pub struct ChromeLauncher;

    struct ChromeSession {
        browser: Browser,
        handler: JoinHandle<()>,
    }

    fn browser_err<E: std::fmt::Display>(e: E) -> AppError {
        AppError::Browser(e.to_string())
    }

    #[async_trait]
    impl BrowserLauncher for ChromeLauncher {
        async fn launch(&self) -> Result<Box<dyn BrowserSession>, AppError> {
            let config = BrowserConfig::builder()
                .no_sandbox()
                .build()
                .map_err(AppError::Browser)?;

            let (browser, mut handler) = Browser::launch(config).await.map_err(browser_err)?;
            let handler = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            Ok(Box::new(ChromeSession { browser, handler }))
        }
    }

    #[async_trait]
    impl BrowserSession for ChromeSession {
        async fn render(&mut self, url: &str, wait_for: &str) -> Result<String, AppError> {
            let page = self.browser.new_page(url).await.map_err(browser_err)?;

            // the lyrics are injected client-side after the challenge page clears
            while page.find_element(wait_for).await.is_err() {
                tokio::time::sleep(POLL_INTERVAL).await;
            }

            page.content().await.map_err(browser_err)
        }

        async fn close(self: Box<Self>) -> Result<(), AppError> {
            let ChromeSession {
                mut browser,
                handler,
            } = *self;

            let closed = browser.close().await.map_err(browser_err).map(|_| ());
            let waited = browser.wait().await.map_err(browser_err).map(|_| ());
            handler.abort();

            closed.and(waited)
        }
    }
}
