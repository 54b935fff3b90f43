//! Bing adapter — independent index, decent scraping tolerance.

use crate::config::SearchConfig;
use crate::engine::EngineAdapter;
use crate::error::SearchError;
use crate::http;
use crate::types::{EngineId, RawHit};
use scraper::{Html, Selector};

/// Bing HTML scraper.
pub struct BingAdapter;

impl EngineAdapter for BingAdapter {
    async fn fetch(&self, query: &str, config: &SearchConfig) -> Result<Vec<RawHit>, SearchError> {
        tracing::trace!(query, "Bing search");

        let client = http::build_client(config)?;

        let safesearch_val = if config.safe_search { "Strict" } else { "Off" };

        let response = client
            .get("https://www.bing.com/search")
            .query(&[
                ("q", query),
                ("setlang", "en"),
                ("safeSearch", safesearch_val),
            ])
            .header("Accept", "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("Bing request failed: {e}")))?;

        let status = response.status();
        if status.as_u16() == 403 || status.as_u16() == 429 {
            return Err(SearchError::Blocked(format!("Bing returned {status}")));
        }
        let response = response
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("Bing HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("Bing response read failed: {e}")))?;

        tracing::trace!(bytes = html.len(), "Bing response received");

        parse_bing_html(&html)
    }

    fn engine_id(&self) -> EngineId {
        EngineId::Bing
    }
}

/// Parse Bing HTML into raw hits.
///
/// Bing uses `li.b_algo` containers for organic results. A malformed
/// container is skipped without aborting siblings.
fn parse_bing_html(html: &str) -> Result<Vec<RawHit>, SearchError> {
    let document = Html::parse_document(html);

    let result_sel = Selector::parse("li.b_algo")
        .map_err(|e| SearchError::Parse(format!("invalid result selector: {e:?}")))?;
    let title_sel = Selector::parse("h2")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let link_sel = Selector::parse("a")
        .map_err(|e| SearchError::Parse(format!("invalid link selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".b_caption p, .b_lineclamp2")
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

        let url = title_el
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|h| h.to_string());

        let url = match url {
            Some(u) if !u.is_empty() => u,
            _ => continue,
        };

        let snippet = element
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        hits.push(RawHit { title, url, snippet });
    }

    tracing::debug!(count = hits.len(), "Bing hits parsed");
    Ok(hits)
}
