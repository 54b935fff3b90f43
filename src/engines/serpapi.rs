//! SerpApi adapter — paid JSON search API, reserved for the extra tier.
//!
//! SerpApi proxies Google results through a stable JSON interface, so
//! it is immune to HTML-structure drift but metered per request. The
//! orchestrator only reaches for it when the scraping tiers
//! under-produce. Requires `serpapi_api_key` in the config; without a
//! key the adapter reports a failure and is treated as absent.

use crate::config::SearchConfig;
use crate::engine::EngineAdapter;
use crate::error::SearchError;
use crate::http;
use crate::types::{EngineId, RawHit};
use serde::Deserialize;

/// SerpApi JSON client.
pub struct SerpApiAdapter;

/// Relevant subset of a SerpApi response.
#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

impl EngineAdapter for SerpApiAdapter {
    async fn fetch(&self, query: &str, config: &SearchConfig) -> Result<Vec<RawHit>, SearchError> {
        let api_key = config
            .serpapi_api_key
            .as_deref()
            .ok_or_else(|| SearchError::Config("SerpApi requires an API key".into()))?;

        tracing::trace!(query, "SerpApi search");

        let client = http::build_client(config)?;

        let response = client
            .get("https://serpapi.com/search.json")
            .query(&[
                ("q", query),
                ("engine", "google"),
                ("num", "10"),
                ("api_key", api_key),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("SerpApi request failed: {e}")))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(SearchError::Blocked("SerpApi rate limit exhausted".into()));
        }
        let response = response
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("SerpApi HTTP error: {e}")))?;

        let body: SerpApiResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(format!("SerpApi response decode failed: {e}")))?;

        if let Some(err) = body.error {
            return Err(SearchError::Http(format!("SerpApi error: {err}")));
        }

        Ok(organic_to_hits(body.organic_results))
    }

    fn engine_id(&self) -> EngineId {
        EngineId::SerpApi
    }
}

/// Convert organic results into raw hits, skipping entries without a link.
fn organic_to_hits(results: Vec<OrganicResult>) -> Vec<RawHit> {
    let hits: Vec<RawHit> = results
        .into_iter()
        .filter(|r| !r.link.is_empty() && !r.title.is_empty())
        .map(|r| RawHit {
            title: r.title,
            url: r.link,
            snippet: r.snippet,
        })
        .collect();
    tracing::debug!(count = hits.len(), "SerpApi hits parsed");
    hits
}
