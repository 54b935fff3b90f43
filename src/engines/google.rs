//! Google adapter — best results but aggressive bot detection.
//!
//! Google employs CAPTCHAs, cookie consent walls, and IP-based rate
//! limiting. The adapter classifies those responses as blocked rather
//! than failing hard, and unwraps `/url?q=` redirect wrappers so hits
//! carry final target URLs.

use crate::config::SearchConfig;
use crate::engine::EngineAdapter;
use crate::error::SearchError;
use crate::http;
use crate::types::{EngineId, RawHit};
use scraper::{Html, Selector};
use url::Url;

/// Google HTML scraper.
pub struct GoogleAdapter;

impl GoogleAdapter {
    /// Unwrap Google's `/url?q=<target>&sa=...` redirect wrapper.
    ///
    /// Direct absolute links pass through; anchors and internal paths
    /// yield `None`.
    fn extract_url(href: &str) -> Option<String> {
        if href.starts_with("http://") || href.starts_with("https://") {
            return Some(href.to_string());
        }
        if let Some(rest) = href.strip_prefix("/url?") {
            let wrapped = Url::parse(&format!("https://www.google.com/url?{rest}")).ok()?;
            return wrapped
                .query_pairs()
                .find(|(key, _)| key == "q" || key == "url")
                .map(|(_, value)| value.into_owned())
                .filter(|u| u.starts_with("http"));
        }
        None
    }
}

impl EngineAdapter for GoogleAdapter {
    async fn fetch(&self, query: &str, config: &SearchConfig) -> Result<Vec<RawHit>, SearchError> {
        tracing::trace!(query, "Google search");

        let client = http::build_client(config)?;

        let safe_val = if config.safe_search { "active" } else { "off" };

        let response = client
            .get("https://www.google.com/search")
            .query(&[("q", query), ("hl", "en"), ("safe", safe_val), ("num", "20")])
            .header("Accept", "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("Google request failed: {e}")))?;

        let status = response.status();
        if status.as_u16() == 403 || status.as_u16() == 429 {
            return Err(SearchError::Blocked(format!("Google returned {status}")));
        }
        let response = response
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("Google HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("Google response read failed: {e}")))?;

        if is_blocked_page(&html) {
            return Err(SearchError::Blocked(
                "Google served a CAPTCHA/consent interstitial".into(),
            ));
        }

        tracing::trace!(bytes = html.len(), "Google response received");

        parse_google_html(&html)
    }

    fn engine_id(&self) -> EngineId {
        EngineId::Google
    }
}

/// Detect CAPTCHA and consent interstitials in a 200 response body.
fn is_blocked_page(html: &str) -> bool {
    let lower = html.to_lowercase();
    lower.contains("detected unusual traffic")
        || lower.contains("recaptcha")
        || lower.contains("consent.google.com")
}

/// Parse Google HTML into raw hits.
///
/// Google wraps organic results in `div.g` containers with an `h3`
/// title inside the result link. A malformed container is skipped
/// without aborting siblings.
fn parse_google_html(html: &str) -> Result<Vec<RawHit>, SearchError> {
    let document = Html::parse_document(html);

    let result_sel = Selector::parse("div.g")
        .map_err(|e| SearchError::Parse(format!("invalid result selector: {e:?}")))?;
    let link_sel = Selector::parse("a")
        .map_err(|e| SearchError::Parse(format!("invalid link selector: {e:?}")))?;
    let title_sel = Selector::parse("h3")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".VwiC3b, .IsZvec, div[data-sncf]")
        .map_err(|e| SearchError::Parse(format!("invalid snippet selector: {e:?}")))?;

    let mut hits = Vec::new();

    for element in document.select(&result_sel) {
        let title = match element.select(&title_sel).next() {
            Some(el) => el.text().collect::<String>().trim().to_string(),
            None => continue,
        };
        if title.is_empty() {
            continue;
        }

        let href = element
            .select(&link_sel)
            .find_map(|a| a.value().attr("href"));
        let url = match href.and_then(GoogleAdapter::extract_url) {
            Some(u) => u,
            None => continue,
        };

        let snippet = element
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        hits.push(RawHit { title, url, snippet });
    }

    tracing::debug!(count = hits.len(), "Google hits parsed");
    Ok(hits)
}
