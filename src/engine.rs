//! Trait definition for pluggable search backend adapters.
//!
//! Each backend (DuckDuckGo, Bing, Google, SerpApi, Wikipedia)
//! implements [`EngineAdapter`] to provide a uniform interface for
//! querying and extracting raw hits.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::{EngineId, RawHit};

/// A pluggable search backend adapter.
///
/// Implementors query one specific external backend — scraping HTML via
/// CSS selectors or calling a JSON API — and extract [`RawHit`] values.
/// Each adapter handles its own:
///
/// - URL construction with query encoding
/// - HTTP request with appropriate headers
/// - Response parsing, including unwrapping engine-specific redirect
///   wrappers so hits carry final target URLs
/// - Error classification for rate limiting, bot detection, or parse
///   failures
///
/// Failures never propagate past the adapter boundary as panics; they
/// are returned as [`SearchError`] values and consumed uniformly by the
/// orchestrator, which treats a failed adapter as absent for the tier.
/// Adapters never retry within a call.
///
/// All implementations must be `Send + Sync` for concurrent fan-out.
pub trait EngineAdapter: Send + Sync {
    /// Query the backend and return extracted raw hits.
    ///
    /// A structural mismatch on one result container must not abort
    /// extraction of sibling containers — adapters return whatever hits
    /// they could extract, possibly zero.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the HTTP request fails, the backend
    /// blocks the client, or the response cannot be parsed at all.
    fn fetch(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> impl std::future::Future<Output = Result<Vec<RawHit>, SearchError>> + Send;

    /// Returns which [`EngineId`] this adapter represents.
    fn engine_id(&self) -> EngineId;
}
