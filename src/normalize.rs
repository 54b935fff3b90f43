//! Conversion of backend-specific raw hits into canonical results.
//!
//! Validates URLs, cleans up whitespace, bounds snippet length, and
//! attaches the registrable domain. Malformed hits are discarded rather
//! than erroring — one bad hit must not cost an engine's whole batch.

use crate::domain::registrable_domain;
use crate::types::{EngineId, RawHit, SearchResult};

/// Maximum snippet length in characters after normalization. Keeps
/// downstream payloads small.
const MAX_SNIPPET_CHARS: usize = 320;

/// Normalize a raw hit into a [`SearchResult`], or discard it.
///
/// A hit is discarded when:
/// - its URL is empty or not an absolute `http://`/`https://` URL
/// - no registrable domain can be derived from the URL
/// - its title is empty after whitespace cleanup
///
/// Titles and snippets have whitespace trimmed and collapsed; snippets
/// are truncated to [`MAX_SNIPPET_CHARS`]. The relevance score is left
/// at zero for the scorer to fill in.
pub fn normalize(hit: RawHit, source: EngineId) -> Option<SearchResult> {
    let url = hit.url.trim().to_string();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        tracing::trace!(url = %url, "discarding hit with non-absolute URL");
        return None;
    }

    let domain = registrable_domain(&url)?;

    let title = collapse_whitespace(&hit.title);
    if title.is_empty() {
        return None;
    }

    let snippet = truncate_chars(&collapse_whitespace(&hit.snippet), MAX_SNIPPET_CHARS);

    Some(SearchResult {
        title,
        url,
        snippet,
        source,
        domain,
        relevance_score: 0.0,
    })
}

/// Normalize a batch of hits from one adapter, discarding malformed entries.
pub fn normalize_batch(hits: Vec<RawHit>, source: EngineId) -> Vec<SearchResult> {
    let total = hits.len();
    let results: Vec<SearchResult> = hits
        .into_iter()
        .filter_map(|hit| normalize(hit, source))
        .collect();
    if results.len() < total {
        tracing::debug!(
            engine = %source,
            kept = results.len(),
            discarded = total - results.len(),
            "discarded malformed hits during normalization"
        );
    }
    results
}

/// Trim and collapse runs of whitespace (including newlines) to single spaces.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max` characters on a char boundary.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    text.chars().take(max).collect()
}
