//! Core types for aggregated search results and engine identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An unvalidated hit as extracted by an engine adapter.
///
/// Adapters are responsible for unwrapping engine-specific redirect
/// wrappers (e.g. Google's `/url?q=`, DuckDuckGo's `uddg` parameter)
/// before producing a `RawHit`. Everything else — URL validation,
/// whitespace cleanup, snippet truncation — is the normalizer's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHit {
    /// Result title as extracted from the page or API response.
    pub title: String,
    /// Target URL, already unwrapped from any redirect indirection.
    pub url: String,
    /// Result snippet; may be empty.
    pub snippet: String,
}

/// A single normalized, scored search result.
///
/// Produced by the normalizer and immutable afterwards, except for the
/// relevance score attached before diversity filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The title of the result page.
    pub title: String,
    /// Absolute `http(s)` URL. Never empty.
    pub url: String,
    /// A text snippet summarising the page, bounded in length.
    pub snippet: String,
    /// Which backend produced this result.
    pub source: EngineId,
    /// Registrable domain derived from `url` (e.g. `example.co.uk`).
    /// Basis of the one-result-per-domain invariant.
    pub domain: String,
    /// Relevance score (higher is better). Content-based, not
    /// engine-based; see the scoring module for the rules.
    pub relevance_score: f64,
}

/// Identifies a search backend, plus the synthetic static-fallback tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineId {
    /// DuckDuckGo HTML scrape — most scraper-friendly, first choice.
    DuckDuckGo,
    /// Bing HTML scrape — independent index, decent tolerance.
    Bing,
    /// Google HTML scrape — best results, aggressive bot detection.
    Google,
    /// SerpApi JSON API — paid, metered; reserved for the extra tier.
    SerpApi,
    /// Wikipedia search API — reference-quality extra engine.
    Wikipedia,
    /// Synthetic results emitted only when real backends under-produce.
    /// Never presented as organically ranked.
    FallbackStatic,
}

impl EngineId {
    /// Human-readable name of this backend.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Bing => "Bing",
            Self::Google => "Google",
            Self::SerpApi => "SerpApi",
            Self::Wikipedia => "Wikipedia",
            Self::FallbackStatic => "fallback-static",
        }
    }

    /// Engines queried in the primary fan-out tier.
    pub fn primary() -> &'static [EngineId] {
        &[Self::DuckDuckGo, Self::Bing, Self::Google]
    }

    /// Secondary engines held back for the extra-engines tier.
    pub fn extra() -> &'static [EngineId] {
        &[Self::Wikipedia, Self::SerpApi]
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
