//! Shared HTTP client with client-identity rotation for engine requests.
//!
//! Provides a configured [`reqwest::Client`] with browser-like headers,
//! cookie support, and rotating User-Agent/Accept-Language values to
//! reduce the chance of being blocked. Rotation draws a fresh identity
//! per client build, so recurrence after a blocked session naturally
//! uses a different identity.

use crate::config::SearchConfig;
use crate::error::SearchError;
use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use std::time::Duration;

/// Realistic browser User-Agent strings, rotated per client build.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.3 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:134.0) Gecko/20100101 Firefox/134.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36 Edg/132.0.0.0",
];

/// Accept-Language values rotated alongside the User-Agent.
const ACCEPT_LANGUAGES: &[&str] = &[
    "en-US,en;q=0.9",
    "en-GB,en;q=0.9",
    "en-US,en;q=0.8,de;q=0.5",
    "en-CA,en;q=0.9,fr-CA;q=0.6",
];

/// Build a [`reqwest::Client`] configured for search engine scraping.
///
/// The client has:
/// - Cookie store enabled (for Google consent pages, etc.)
/// - Timeout from config
/// - Random User-Agent and Accept-Language from the rotation lists, or
///   the configured overrides
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Config`] for an `accept_language` override
/// that is not a valid header value, and [`SearchError::Http`] if the
/// client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_user_agent().to_owned(),
    };

    let lang = accept_language(config);
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(&lang)
            .map_err(|e| SearchError::Config(format!("invalid accept_language: {e}")))?,
    );

    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// Resolve the Accept-Language value: the configured override if set,
/// otherwise a random pick from the rotation list.
fn accept_language(config: &SearchConfig) -> String {
    match config.accept_language {
        Some(ref custom) => custom.clone(),
        None => {
            let mut rng = rand::thread_rng();
            ACCEPT_LANGUAGES
                .choose(&mut rng)
                .copied()
                .unwrap_or(ACCEPT_LANGUAGES[0])
                .to_owned()
        }
    }
}
