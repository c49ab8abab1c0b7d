use std::time::Duration;

use reqwest::Client;

use crate::{
    config::DEFAULT_FETCH_TIMEOUT_SECS,
    error,
    genius::{
        page::{DirectPageSource, PageSource},
        verse,
    },
    success,
};

/// Fetches a lyrics page over plain HTTP and prints one verse.
///
/// Useful to check whether Genius currently serves the lyrics markup to
/// non-browser clients before choosing the relay's fetch mode.
pub async fn verse(url: &str, random: bool) {
    let client = match Client::builder().build() {
        Ok(c) => c,
        Err(e) => error!("Cannot build HTTP client. Err: {}", e),
    };

    let source = DirectPageSource::new(client, Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS));
    let html = match source.fetch_html(url).await {
        Ok(html) => html,
        Err(e) => error!("Cannot fetch lyrics page. Err: {}", e),
    };

    let lines = verse::lyrics_lines(&html);
    let extracted = if random {
        let mut rng = rand::rng();
        verse::random_verse(&lines, &mut rng)
    } else {
        verse::first_verse(&lines)
    };

    match extracted {
        Ok(v) => {
            success!("Found {} lyric lines", lines.len());
            println!("{}", v);
        }
        Err(e) => error!("{}", e),
    }
}
