//! Core aggregation loop: tiered fan-out, fan-in, scoring, admission.
//!
//! Runs one tier at a time. Within a tier all engine calls run
//! concurrently with per-call timeouts; admission happens only after
//! the whole tier has reported (or timed out), so the diversity set is
//! mutated from a single point and a fast-but-mediocre backend cannot
//! crowd out a slower-but-better one. The whole session is bounded by
//! a deadline — at expiry, in-flight calls are abandoned and the
//! orchestrator jumps straight to the static fallback if still short.

use std::future::Future;
use std::time::{Duration, Instant};

use futures::future::join_all;
use rand::Rng;

use crate::config::SearchConfig;
use crate::engine::EngineAdapter;
use crate::engines::{
    BingAdapter, DuckDuckGoAdapter, GoogleAdapter, SerpApiAdapter, WikipediaAdapter,
};
use crate::error::SearchError;
use crate::fallback;
use crate::normalize;
use crate::scoring;
use crate::session::SessionState;
use crate::types::{EngineId, RawHit, SearchResult};
use crate::variations::QueryVariations;

use super::tiers::Tier;

/// How many generated variations the variations tier will try.
const MAX_TIER_VARIATIONS: usize = 3;

/// Run the full tiered aggregation for one query.
///
/// Generic over the fetch function so tests can inject stub adapters;
/// production passes [`dispatch`] wrapped with the caller's config.
/// Backend failures never escape — they are logged and the engine is
/// treated as absent for its tier.
pub async fn run_search<F, Fut>(query: &str, config: &SearchConfig, fetch: F) -> Vec<SearchResult>
where
    F: Fn(EngineId, String) -> Fut,
    Fut: Future<Output = Result<Vec<RawHit>, SearchError>>,
{
    let deadline = Instant::now() + Duration::from_secs(config.session_budget_seconds);
    let mut session = SessionState::new(&config.excluded_domains);
    let variations = QueryVariations::generate(query);

    let mut tier = Tier::Primary;
    while tier != Tier::Done {
        if session.admitted_count() >= config.min_results {
            break;
        }

        match tier {
            Tier::Primary => {
                let jobs: Vec<(EngineId, String)> = config
                    .engines
                    .iter()
                    .map(|e| (*e, variations.original().to_string()))
                    .collect();
                run_engine_tier(&jobs, tier, deadline, config, &mut session, &fetch, query).await;
            }
            Tier::Variations => {
                let jobs: Vec<(EngineId, String)> = variations
                    .alternates()
                    .iter()
                    .take(MAX_TIER_VARIATIONS)
                    .flat_map(|v| config.engines.iter().map(move |e| (*e, v.clone())))
                    .collect();
                run_engine_tier(&jobs, tier, deadline, config, &mut session, &fetch, query).await;
            }
            Tier::ExtraEngines => {
                let jobs: Vec<(EngineId, String)> = config
                    .extra_engines
                    .iter()
                    .map(|e| (*e, variations.original().to_string()))
                    .collect();
                run_engine_tier(&jobs, tier, deadline, config, &mut session, &fetch, query).await;
            }
            Tier::StaticFallback => {
                // Top up to the target, one entry at a time; the filter
                // still skips domains already represented or excluded.
                for candidate in fallback::static_results(query) {
                    if session.admitted_count() >= config.min_results {
                        break;
                    }
                    session.admit(vec![candidate]);
                }
                tracing::debug!(
                    tier = tier.name(),
                    total = session.admitted_count(),
                    "static fallback applied"
                );
            }
            Tier::Done => unreachable!("loop exits before Done is executed"),
        }
        session.record_tier();

        // At the deadline, skip any remaining network tiers.
        if tier != Tier::StaticFallback
            && Instant::now() >= deadline
            && session.admitted_count() < config.min_results
        {
            tracing::warn!(
                tier = tier.name(),
                "session budget exhausted, jumping to static fallback"
            );
            tier = Tier::StaticFallback;
            continue;
        }

        tier = tier.next();
    }

    if session.admitted_count() < config.min_results {
        tracing::warn!(
            admitted = session.admitted_count(),
            wanted = config.min_results,
            tiers_attempted = session.tiers_attempted(),
            "all tiers exhausted short of the minimum-result target"
        );
    } else {
        tracing::debug!(
            admitted = session.admitted_count(),
            tiers_attempted = session.tiers_attempted(),
            "search complete"
        );
    }

    session.into_results()
}

/// Fan out one tier's engine calls, wait for all of them (bounded by
/// the session deadline), then normalize, score, and admit the results
/// in a single serialized step.
async fn run_engine_tier<F, Fut>(
    jobs: &[(EngineId, String)],
    tier: Tier,
    deadline: Instant,
    config: &SearchConfig,
    session: &mut SessionState,
    fetch: &F,
    original_query: &str,
) where
    F: Fn(EngineId, String) -> Fut,
    Fut: Future<Output = Result<Vec<RawHit>, SearchError>>,
{
    if jobs.is_empty() {
        tracing::debug!(tier = tier.name(), "no engines configured for tier");
        return;
    }

    let remaining = deadline.saturating_duration_since(Instant::now());
    if remaining.is_zero() {
        tracing::warn!(tier = tier.name(), "no session budget left for tier");
        return;
    }
    let per_call = Duration::from_secs(config.timeout_seconds).min(remaining);

    let futures: Vec<_> = jobs
        .iter()
        .map(|(engine, tier_query)| {
            let engine = *engine;
            let tier_query = tier_query.clone();
            async move {
                request_jitter(config).await;
                let outcome = match tokio::time::timeout(per_call, fetch(engine, tier_query)).await
                {
                    Ok(result) => result,
                    Err(_) => Err(SearchError::Timeout(format!(
                        "{engine} exceeded {}s",
                        per_call.as_secs()
                    ))),
                };
                (engine, outcome)
            }
        })
        .collect();

    // Fan-in with partial results; abandon everything at the deadline.
    let outcomes = match tokio::time::timeout(remaining, join_all(futures)).await {
        Ok(outcomes) => outcomes,
        Err(_) => {
            tracing::warn!(tier = tier.name(), "tier abandoned at session deadline");
            return;
        }
    };

    let attempted = outcomes.len();
    let mut failed = 0usize;
    let mut candidates: Vec<SearchResult> = Vec::new();
    for (engine, outcome) in outcomes {
        match outcome {
            Ok(hits) => {
                tracing::debug!(engine = %engine, count = hits.len(), "engine returned hits");
                candidates.extend(normalize::normalize_batch(hits, engine));
            }
            Err(err) => {
                failed += 1;
                tracing::warn!(engine = %engine, error = %err, "engine query failed");
            }
        }
    }

    let scored = scoring::score_batch(candidates, original_query);
    let admitted = session.admit(scored);
    tracing::debug!(
        tier = tier.name(),
        attempted,
        failed,
        admitted,
        total = session.admitted_count(),
        "tier complete"
    );
}

/// Sleep a random interval from the configured delay range before an
/// engine request, spreading fan-out traffic.
async fn request_jitter(config: &SearchConfig) {
    let (min, max) = config.request_delay_ms;
    // Validation rejects an inverted range on the public path, but this
    // must stay total for direct run_search callers.
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    if max == 0 {
        return;
    }
    let ms = if min == max {
        min
    } else {
        rand::thread_rng().gen_range(min..=max)
    };
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Query a single backend, dispatching to the concrete adapter.
pub async fn dispatch(
    engine: EngineId,
    query: &str,
    config: &SearchConfig,
) -> Result<Vec<RawHit>, SearchError> {
    match engine {
        EngineId::DuckDuckGo => DuckDuckGoAdapter.fetch(query, config).await,
        EngineId::Bing => BingAdapter.fetch(query, config).await,
        EngineId::Google => GoogleAdapter.fetch(query, config).await,
        EngineId::SerpApi => SerpApiAdapter.fetch(query, config).await,
        EngineId::Wikipedia => WikipediaAdapter.fetch(query, config).await,
        // The synthetic tag is never dispatched; config validation
        // rejects it as an engine.
        EngineId::FallbackStatic => Ok(Vec::new()),
    }
}
