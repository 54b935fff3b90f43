//! # polysearch
//!
//! Multi-engine web search aggregation with guaranteed source-domain
//! diversity.
//!
//! This crate queries several independent, unreliable search backends —
//! scraping public engines and calling JSON search APIs — and produces
//! a ranked, deduplicated result set in which no two entries share a
//! registrable domain, even when individual backends fail, block the
//! client, or return noisy/duplicate data.
//!
//! ## Design
//!
//! - Scrapes DuckDuckGo, Bing, and Google via CSS selectors; calls the
//!   SerpApi and Wikipedia JSON APIs as secondary engines
//! - Queries each tier's engines concurrently with per-call timeouts
//!   and an overall session deadline
//! - Scores results against the query with content heuristics, then
//!   admits at most one result per registrable domain
//! - Escalates through fallback tiers (query variations, extra engines,
//!   a static reference catalog) until a minimum-result target is met
//! - Graceful degradation: backend failures are absorbed and logged,
//!   never raised to the caller
//!
//! ## Security
//!
//! - No network listeners — this is a library, not a server
//! - Search queries are logged only at trace level
//! - Result snippets are whitespace-cleaned and length-bounded
//! - The only secret is the optional SerpApi key, which never appears
//!   in error messages

pub mod config;
pub mod domain;
pub mod engine;
pub mod engines;
pub mod error;
pub mod fallback;
pub mod http;
pub mod normalize;
pub mod orchestrator;
pub mod scoring;
pub mod session;
pub mod types;
pub mod variations;

use std::collections::HashSet;

pub use config::SearchConfig;
pub use engine::EngineAdapter;
pub use error::{Result, SearchError};
pub use types::{EngineId, RawHit, SearchResult};

/// Aggregate search results for a query across all configured tiers.
///
/// Launches the primary engines concurrently, then escalates through
/// query variations, extra engines, and a static fallback until
/// `config.min_results` unique-domain results are admitted or every
/// tier is exhausted. The returned list is ordered tier by tier and by
/// relevance score (descending) within each tier, and never contains
/// two results on the same registrable domain.
///
/// Always returns within the configured session budget. Fewer than
/// `min_results` entries come back only when every tier, including the
/// static fallback, is exhausted — that case is logged but is not an
/// error.
///
/// # Errors
///
/// Returns [`SearchError::Config`] for invalid configuration
/// (`min_results == 0`, no engines, zero timeouts). Backend failures
/// never surface here.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> polysearch::Result<()> {
/// let config = polysearch::SearchConfig {
///     min_results: 7,
///     ..Default::default()
/// };
/// let results = polysearch::search("quantum computing basics", &config).await?;
/// for result in &results {
///     println!("[{}] {} — {}", result.source, result.title, result.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(query: &str, config: &SearchConfig) -> Result<Vec<SearchResult>> {
    config.validate()?;
    let results = orchestrator::search::run_search(query, config, |engine, tier_query| {
        let cfg = config.clone();
        async move { orchestrator::search::dispatch(engine, &tier_query, &cfg).await }
    })
    .await;
    Ok(results)
}

/// Aggregate search results with default configuration.
///
/// Convenience wrapper around [`search`] using [`SearchConfig::default()`].
///
/// # Errors
///
/// Same as [`search`].
pub async fn search_default(query: &str) -> Result<Vec<SearchResult>> {
    search(query, &SearchConfig::default()).await
}

/// The set of registrable domains represented in a result list.
///
/// Diagnostics helper: for any list produced by [`search`], the set's
/// size equals the list's length.
pub fn domains_of(results: &[SearchResult]) -> HashSet<String> {
    results.iter().map(|r| r.domain.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_rejects_zero_min_results() {
        let config = SearchConfig {
            min_results: 0,
            ..Default::default()
        };
        let result = search("test", &config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("min_results"));
    }

    #[tokio::test]
    async fn search_rejects_empty_engines() {
        let config = SearchConfig {
            engines: vec![],
            ..Default::default()
        };
        let result = search("test", &config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("engine"));
    }

    #[tokio::test]
    async fn search_rejects_zero_timeout() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let result = search("test", &config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout"));
    }

    #[test]
    fn domains_of_counts_unique_domains() {
        let make = |domain: &str| SearchResult {
            title: "t".into(),
            url: format!("https://{domain}/x"),
            snippet: String::new(),
            source: EngineId::Bing,
            domain: domain.into(),
            relevance_score: 0.0,
        };
        let results = vec![make("a.com"), make("b.com"), make("a.com")];
        let domains = domains_of(&results);
        assert_eq!(domains.len(), 2);
        assert!(domains.contains("a.com"));
        assert!(domains.contains("b.com"));
    }

    #[test]
    fn domains_of_empty_list() {
        assert!(domains_of(&[]).is_empty());
    }
}
