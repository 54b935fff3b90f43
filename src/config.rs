//! Aggregation configuration with sensible defaults.
//!
//! [`SearchConfig`] controls which engines are queried in each tier, the
//! minimum unique-domain result target, timeouts, and request behaviour.
//! The defaults are tuned for reliable, polite scraping.

use crate::error::SearchError;
use crate::types::EngineId;

/// Configuration for one search aggregation call.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Engines queried concurrently in the primary (and variations) tier.
    pub engines: Vec<EngineId>,
    /// Secondary engines held back for the extra-engines tier.
    pub extra_engines: Vec<EngineId>,
    /// Minimum number of unique-domain results to attempt. The
    /// orchestrator escalates through fallback tiers until this many
    /// results are admitted or every tier is exhausted.
    pub min_results: usize,
    /// Domains never admitted, compared at the registrable-domain level.
    pub excluded_domains: Vec<String>,
    /// Per-engine-call timeout in seconds.
    pub timeout_seconds: u64,
    /// Overall session time budget in seconds. At the deadline,
    /// still-running engine calls are abandoned and the orchestrator
    /// proceeds straight to the static fallback if still short.
    pub session_budget_seconds: u64,
    /// Whether to request safe search filtering from engines that support it.
    pub safe_search: bool,
    /// Random delay range in milliseconds `(min, max)` applied before each
    /// engine request. Spreads fan-out requests to reduce rate limiting.
    pub request_delay_ms: (u64, u64),
    /// Custom User-Agent string. If `None`, rotates through a built-in
    /// list of realistic browser User-Agents. Set a fixed value for
    /// deterministic behaviour in tests.
    pub user_agent: Option<String>,
    /// Custom Accept-Language header. If `None`, rotates through a
    /// built-in locale list.
    pub accept_language: Option<String>,
    /// API key for the SerpApi adapter. If `None`, SerpApi reports a
    /// failure and the orchestrator treats it as an absent engine.
    pub serpapi_api_key: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            engines: EngineId::primary().to_vec(),
            extra_engines: EngineId::extra().to_vec(),
            min_results: 5,
            excluded_domains: Vec::new(),
            timeout_seconds: 10,
            session_budget_seconds: 25,
            safe_search: true,
            request_delay_ms: (100, 500),
            user_agent: None,
            accept_language: None,
            serpapi_api_key: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `min_results` must be greater than 0
    /// - `timeout_seconds` and `session_budget_seconds` must be greater than 0
    /// - `engines` must not be empty
    /// - no tier may contain [`EngineId::FallbackStatic`]
    /// - `request_delay_ms.0` must be <= `request_delay_ms.1`
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.min_results == 0 {
            return Err(SearchError::Config(
                "min_results must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.session_budget_seconds == 0 {
            return Err(SearchError::Config(
                "session_budget_seconds must be greater than 0".into(),
            ));
        }
        if self.engines.is_empty() {
            return Err(SearchError::Config(
                "at least one primary engine must be enabled".into(),
            ));
        }
        if self.engines.contains(&EngineId::FallbackStatic)
            || self.extra_engines.contains(&EngineId::FallbackStatic)
        {
            return Err(SearchError::Config(
                "fallback-static is not a configurable engine".into(),
            ));
        }
        if self.request_delay_ms.0 > self.request_delay_ms.1 {
            return Err(SearchError::Config(
                "request_delay_ms min must be <= max".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = SearchConfig::default();
        assert_eq!(config.min_results, 5);
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.session_budget_seconds, 25);
        assert!(config.safe_search);
        assert_eq!(config.request_delay_ms, (100, 500));
        assert!(config.user_agent.is_none());
        assert!(config.serpapi_api_key.is_none());
        assert!(config.excluded_domains.is_empty());
    }

    #[test]
    fn default_tiers_match_engine_sets() {
        let config = SearchConfig::default();
        assert_eq!(config.engines, EngineId::primary().to_vec());
        assert_eq!(config.extra_engines, EngineId::extra().to_vec());
    }

    #[test]
    fn valid_config_passes_validation() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_min_results_rejected() {
        let config = SearchConfig {
            min_results: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("min_results"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn zero_session_budget_rejected() {
        let config = SearchConfig {
            session_budget_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("session_budget"));
    }

    #[test]
    fn empty_primary_engines_rejected() {
        let config = SearchConfig {
            engines: vec![],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("engine"));
    }

    #[test]
    fn empty_extra_engines_valid() {
        let config = SearchConfig {
            extra_engines: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn fallback_static_rejected_as_engine() {
        let config = SearchConfig {
            engines: vec![EngineId::FallbackStatic],
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SearchConfig {
            extra_engines: vec![EngineId::FallbackStatic],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_delay_range_rejected() {
        let config = SearchConfig {
            request_delay_ms: (500, 100),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("delay"));
    }

    #[test]
    fn zero_delay_range_valid() {
        let config = SearchConfig {
            request_delay_ms: (0, 0),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn custom_identity_overrides() {
        let config = SearchConfig {
            user_agent: Some("TestBot/1.0".into()),
            accept_language: Some("en-GB,en;q=0.8".into()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.user_agent.as_deref(), Some("TestBot/1.0"));
    }
}
