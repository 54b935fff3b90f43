//! Wikipedia adapter — reference-quality extra engine.
//!
//! Queries the MediaWiki search API rather than scraping HTML, so it is
//! stable and fast. All hits land on `wikipedia.org`, which means the
//! diversity filter admits at most one of them — the point of this
//! adapter is a guaranteed high-quality reference result when the
//! scraping engines under-produce.

use crate::config::SearchConfig;
use crate::engine::EngineAdapter;
use crate::error::SearchError;
use crate::http;
use crate::types::{EngineId, RawHit};
use serde::Deserialize;

/// MediaWiki search API client.
pub struct WikipediaAdapter;

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    query: Option<QueryBody>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    search: Vec<PageMatch>,
}

#[derive(Debug, Deserialize)]
struct PageMatch {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
}

impl EngineAdapter for WikipediaAdapter {
    async fn fetch(&self, query: &str, config: &SearchConfig) -> Result<Vec<RawHit>, SearchError> {
        tracing::trace!(query, "Wikipedia search");

        let client = http::build_client(config)?;

        let response = client
            .get("https://en.wikipedia.org/w/api.php")
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", "5"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("Wikipedia request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("Wikipedia HTTP error: {e}")))?;

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(format!("Wikipedia response decode failed: {e}")))?;

        let matches = body.query.map(|q| q.search).unwrap_or_default();
        Ok(matches_to_hits(matches))
    }

    fn engine_id(&self) -> EngineId {
        EngineId::Wikipedia
    }
}

/// Convert page matches into raw hits, building article URLs from titles
/// and stripping the API's `searchmatch` markup from snippets.
fn matches_to_hits(matches: Vec<PageMatch>) -> Vec<RawHit> {
    let hits: Vec<RawHit> = matches
        .into_iter()
        .filter(|m| !m.title.is_empty())
        .map(|m| {
            // Article titles use underscores for spaces; everything else
            // URL-unsafe ("?", "%", "&") must be percent-encoded.
            let url = format!(
                "https://en.wikipedia.org/wiki/{}",
                urlencoding::encode(&m.title.replace(' ', "_"))
            );
            RawHit {
                title: m.title,
                url,
                snippet: strip_tags(&m.snippet),
            }
        })
        .collect();
    tracing::debug!(count = hits.len(), "Wikipedia hits parsed");
    hits
}

/// Remove HTML tags from an API snippet, keeping the text between them.
fn strip_tags(snippet: &str) -> String {
    let mut out = String::with_capacity(snippet.len());
    let mut in_tag = false;
    for c in snippet.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
