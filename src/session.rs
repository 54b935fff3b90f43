//! Per-call session state and the domain-diversity admission filter.
//!
//! A [`SessionState`] is created at the start of one `search` call,
//! owned exclusively by it, and discarded at return — there is no
//! cross-call state in this crate. Admission happens once per tier
//! after fan-in, so the diversity set is mutated from a single point
//! of serialization.

use std::collections::HashSet;

use crate::domain::registrable_domain;
use crate::types::SearchResult;

/// Mutable state owned by exactly one in-flight `search` call.
#[derive(Debug)]
pub struct SessionState {
    /// Registrable domains already represented in `collected`.
    seen_domains: HashSet<String>,
    /// Domains the caller never wants admitted (registrable form, lowercase).
    excluded_domains: HashSet<String>,
    /// Admitted results in final output order: tier by tier, and
    /// relevance-descending within each tier.
    collected: Vec<SearchResult>,
    /// Number of fallback tiers attempted so far.
    tiers_attempted: usize,
}

impl SessionState {
    /// Create session state for one call, collapsing the caller's
    /// excluded domains to registrable form.
    ///
    /// Entries are accepted either as bare domains (`example.com`) or
    /// full URLs; whatever form, exclusion is enforced at the
    /// registrable-domain level.
    pub fn new(excluded_domains: &[String]) -> Self {
        let excluded = excluded_domains
            .iter()
            .map(|d| {
                let d = d.trim().to_lowercase();
                if d.contains("://") {
                    registrable_domain(&d).unwrap_or(d)
                } else {
                    registrable_domain(&format!("https://{d}")).unwrap_or(d)
                }
            })
            .collect();
        Self {
            seen_domains: HashSet::new(),
            excluded_domains: excluded,
            collected: Vec::new(),
            tiers_attempted: 0,
        }
    }

    /// Admit scored candidates, enforcing one result per registrable domain.
    ///
    /// Candidates are sorted by relevance score descending and admitted
    /// in that order; a candidate is dropped if its domain is excluded
    /// or already seen. Admitted results append to the session's
    /// collected list, so earlier tiers always outrank later ones
    /// regardless of score. Returns the number of newly admitted results.
    pub fn admit(&mut self, mut candidates: Vec<SearchResult>) -> usize {
        candidates.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let before = self.collected.len();
        for candidate in candidates {
            if self.excluded_domains.contains(&candidate.domain) {
                tracing::trace!(domain = %candidate.domain, "dropping excluded domain");
                continue;
            }
            if self.seen_domains.contains(&candidate.domain) {
                continue;
            }
            self.seen_domains.insert(candidate.domain.clone());
            self.collected.push(candidate);
        }
        self.collected.len() - before
    }

    /// Number of unique-domain results admitted so far.
    pub fn admitted_count(&self) -> usize {
        self.collected.len()
    }

    /// Record that one more tier has been attempted.
    pub fn record_tier(&mut self) {
        self.tiers_attempted += 1;
    }

    /// How many tiers have been attempted.
    pub fn tiers_attempted(&self) -> usize {
        self.tiers_attempted
    }

    /// Consume the session, yielding the final ordered result list.
    pub fn into_results(self) -> Vec<SearchResult> {
        self.collected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EngineId;

    fn make_result(url: &str, domain: &str, score: f64) -> SearchResult {
        SearchResult {
            title: format!("Result on {domain}"),
            url: url.into(),
            snippet: "snippet".into(),
            source: EngineId::DuckDuckGo,
            domain: domain.into(),
            relevance_score: score,
        }
    }

    #[test]
    fn admits_one_result_per_domain() {
        let mut session = SessionState::new(&[]);
        let admitted = session.admit(vec![
            make_result("https://a.com/1", "a.com", 2.0),
            make_result("https://a.com/2", "a.com", 1.0),
            make_result("https://b.com/1", "b.com", 1.5),
        ]);
        assert_eq!(admitted, 2);
        let results = session.into_results();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].domain, "a.com");
        assert_eq!(results[1].domain, "b.com");
    }

    #[test]
    fn best_scoring_result_wins_per_domain() {
        let mut session = SessionState::new(&[]);
        session.admit(vec![
            make_result("https://a.com/worse", "a.com", 1.0),
            make_result("https://a.com/better", "a.com", 3.0),
        ]);
        let results = session.into_results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "https://a.com/better");
    }

    #[test]
    fn admission_order_is_relevance_descending() {
        let mut session = SessionState::new(&[]);
        session.admit(vec![
            make_result("https://low.com", "low.com", 0.5),
            make_result("https://high.com", "high.com", 3.0),
            make_result("https://mid.com", "mid.com", 1.5),
        ]);
        let results = session.into_results();
        let scores: Vec<f64> = results.iter().map(|r| r.relevance_score).collect();
        assert!((scores[0] - 3.0).abs() < f64::EPSILON);
        assert!((scores[1] - 1.5).abs() < f64::EPSILON);
        assert!((scores[2] - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn excluded_domains_never_admitted() {
        let mut session = SessionState::new(&["blocked.com".to_string()]);
        let admitted = session.admit(vec![
            make_result("https://blocked.com/x", "blocked.com", 5.0),
            make_result("https://fine.com/x", "fine.com", 1.0),
        ]);
        assert_eq!(admitted, 1);
        let results = session.into_results();
        assert_eq!(results[0].domain, "fine.com");
    }

    #[test]
    fn exclusion_accepts_urls_and_subdomains() {
        let session = SessionState::new(&[
            "https://www.blocked.co.uk/some/page".to_string(),
            "sub.other.com".to_string(),
        ]);
        assert!(session.excluded_domains.contains("blocked.co.uk"));
        assert!(session.excluded_domains.contains("other.com"));
    }

    #[test]
    fn domains_persist_across_admission_rounds() {
        let mut session = SessionState::new(&[]);
        session.admit(vec![make_result("https://a.com/1", "a.com", 1.0)]);
        let admitted = session.admit(vec![
            make_result("https://a.com/again", "a.com", 9.0),
            make_result("https://b.com/1", "b.com", 1.0),
        ]);
        assert_eq!(admitted, 1);
        let results = session.into_results();
        assert_eq!(results.len(), 2);
        // The earlier round's a.com entry stays even though a later
        // candidate scored higher.
        assert_eq!(results[0].url, "https://a.com/1");
    }

    #[test]
    fn later_rounds_append_after_earlier_rounds() {
        let mut session = SessionState::new(&[]);
        session.admit(vec![make_result("https://first.com", "first.com", 0.1)]);
        session.admit(vec![make_result("https://second.com", "second.com", 99.0)]);
        let results = session.into_results();
        assert_eq!(results[0].domain, "first.com");
        assert_eq!(results[1].domain, "second.com");
    }

    #[test]
    fn tier_counter_tracks_attempts() {
        let mut session = SessionState::new(&[]);
        assert_eq!(session.tiers_attempted(), 0);
        session.record_tier();
        session.record_tier();
        assert_eq!(session.tiers_attempted(), 2);
    }

    #[test]
    fn empty_admission_is_noop() {
        let mut session = SessionState::new(&[]);
        assert_eq!(session.admit(vec![]), 0);
        assert_eq!(session.admitted_count(), 0);
    }
}
