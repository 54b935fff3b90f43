//! DuckDuckGo adapter — most scraper-friendly backend, first choice.
//!
//! Uses the HTML-only version at `https://html.duckduckgo.com/html/`
//! which requires no JavaScript and is tolerant of automated requests.

use crate::config::SearchConfig;
use crate::engine::EngineAdapter;
use crate::error::SearchError;
use crate::http;
use crate::types::{EngineId, RawHit};
use scraper::{Html, Selector};
use url::Url;

/// DuckDuckGo HTML scraper.
pub struct DuckDuckGoAdapter;

impl DuckDuckGoAdapter {
    /// Extract the actual URL from DuckDuckGo's redirect wrapper.
    ///
    /// DDG wraps URLs like: `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`
    /// We parse out the `uddg` query parameter and URL-decode it.
    fn extract_url(href: &str) -> Option<String> {
        // Handle protocol-relative URLs
        let full_href = if href.starts_with("//") {
            format!("https:{href}")
        } else {
            href.to_string()
        };

        let parsed = Url::parse(&full_href).ok()?;

        if parsed.host_str() == Some("duckduckgo.com") && parsed.path().starts_with("/l/") {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned())
        } else {
            Some(full_href)
        }
    }
}

impl EngineAdapter for DuckDuckGoAdapter {
    async fn fetch(&self, query: &str, config: &SearchConfig) -> Result<Vec<RawHit>, SearchError> {
        tracing::trace!(query, "DuckDuckGo search");

        let client = http::build_client(config)?;

        let mut params = vec![("q", query)];
        if config.safe_search {
            params.push(("kp", "1"));
        }

        let response = client
            .post("https://html.duckduckgo.com/html/")
            .form(&params)
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("DuckDuckGo request failed: {e}")))?;

        let status = response.status();
        if status.as_u16() == 403 || status.as_u16() == 429 {
            return Err(SearchError::Blocked(format!(
                "DuckDuckGo returned {status}"
            )));
        }
        let response = response
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("DuckDuckGo HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("DuckDuckGo response read failed: {e}")))?;

        tracing::trace!(bytes = html.len(), "DuckDuckGo response received");

        parse_duckduckgo_html(&html)
    }

    fn engine_id(&self) -> EngineId {
        EngineId::DuckDuckGo
    }
}

/// Parse DuckDuckGo HTML into raw hits.
///
/// Extracted as a separate function for testability with mock HTML.
/// A malformed result container is skipped without aborting siblings.
pub(crate) fn parse_duckduckgo_html(html: &str) -> Result<Vec<RawHit>, SearchError> {
    let document = Html::parse_document(html);

    let result_sel = Selector::parse(
        ".result.results_links.results_links_deep:not(.result--ad), .web-result:not(.result--ad)",
    )
    .map_err(|e| SearchError::Parse(format!("invalid result selector: {e:?}")))?;
    let title_sel = Selector::parse(".result__a")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".result__snippet")
        .map_err(|e| SearchError::Parse(format!("invalid snippet selector: {e:?}")))?;

    let mut hits = Vec::new();

    for element in document.select(&result_sel) {
        let title_el = match element.select(&title_sel).next() {
            Some(el) => el,
            None => continue,
        };

        let title = title_el.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            continue;
        }

        let href = match title_el.value().attr("href") {
            Some(h) => h,
            None => continue,
        };

        let url = match DuckDuckGoAdapter::extract_url(href) {
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

    tracing::debug!(count = hits.len(), "DuckDuckGo hits parsed");
    Ok(hits)
}
