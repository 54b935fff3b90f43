//! Content-based relevance scoring.
//!
//! Scores a normalized result against the original query using substring
//! and token-overlap heuristics plus light domain-quality adjustments.
//! The scorer is a total, pure function of `(result, query)` — it never
//! fails and never touches session state.

use crate::types::SearchResult;

/// Every result starts from this score.
const BASE_SCORE: f64 = 1.0;
/// Bonus for an exact (case-insensitive) match of the full query in the title.
const TITLE_EXACT_BONUS: f64 = 3.0;
/// Maximum bonus for query-token coverage in the title, scaled by the
/// fraction of tokens present.
const TITLE_TOKEN_BONUS: f64 = 2.0;
/// Bonus for an exact match of the full query in the snippet.
const SNIPPET_EXACT_BONUS: f64 = 1.5;
/// Maximum bonus for query-token coverage in the snippet.
const SNIPPET_TOKEN_BONUS: f64 = 1.0;
/// Bonus when any query token appears in the URL path.
const URL_TOKEN_BONUS: f64 = 0.5;
/// Bonus for `.edu`/`.gov` domains and the reference-site allow list.
const QUALITY_DOMAIN_BONUS: f64 = 1.0;
/// Penalty for social-media domains when the query is not about them.
const SOCIAL_DOMAIN_PENALTY: f64 = 1.5;

/// Well-known reference, educational, and major-news domains that get a
/// fixed quality bonus.
const QUALITY_DOMAINS: &[&str] = &[
    "wikipedia.org",
    "britannica.com",
    "arxiv.org",
    "nature.com",
    "khanacademy.org",
    "bbc.co.uk",
    "reuters.com",
];

/// Social-media domains and the platform keyword that exempts them from
/// the penalty when it appears in the query.
const SOCIAL_DOMAINS: &[(&str, &str)] = &[
    ("twitter.com", "twitter"),
    ("x.com", "twitter"),
    ("facebook.com", "facebook"),
    ("instagram.com", "instagram"),
    ("tiktok.com", "tiktok"),
    ("reddit.com", "reddit"),
    ("pinterest.com", "pinterest"),
];

/// Only query tokens longer than this participate in overlap scoring.
const MIN_TOKEN_LEN: usize = 3;

/// Compute the relevance score for a result against the original query.
pub fn relevance_score(result: &SearchResult, query: &str) -> f64 {
    let query_lower = query.trim().to_lowercase();
    let title_lower = result.title.to_lowercase();
    let snippet_lower = result.snippet.to_lowercase();
    let tokens = query_tokens(&query_lower);

    let mut score = BASE_SCORE;

    if !query_lower.is_empty() && title_lower.contains(&query_lower) {
        score += TITLE_EXACT_BONUS;
    }
    score += TITLE_TOKEN_BONUS * token_fraction(&tokens, &title_lower);

    if !query_lower.is_empty() && snippet_lower.contains(&query_lower) {
        score += SNIPPET_EXACT_BONUS;
    }
    score += SNIPPET_TOKEN_BONUS * token_fraction(&tokens, &snippet_lower);

    if url_path_has_token(&result.url, &tokens) {
        score += URL_TOKEN_BONUS;
    }

    score += domain_adjustment(&result.domain, &query_lower);

    score
}

/// Score a batch of results in place.
pub fn score_batch(mut results: Vec<SearchResult>, query: &str) -> Vec<SearchResult> {
    for result in &mut results {
        result.relevance_score = relevance_score(result, query);
    }
    results
}

/// Split a lowercased query into overlap-scoring tokens, stripping
/// punctuation and dropping short words.
fn query_tokens(query_lower: &str) -> Vec<String> {
    query_lower
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|t| t.len() > MIN_TOKEN_LEN)
        .collect()
}

/// Fraction of tokens present in `text`, or 0.0 for an empty token list.
fn token_fraction(tokens: &[String], text: &str) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let hits = tokens.iter().filter(|t| text.contains(t.as_str())).count();
    hits as f64 / tokens.len() as f64
}

/// Whether any query token appears in the URL's path component.
fn url_path_has_token(url: &str, tokens: &[String]) -> bool {
    let Ok(parsed) = url::Url::parse(url) else {
        return false;
    };
    let path = parsed.path().to_lowercase();
    tokens.iter().any(|t| path.contains(t.as_str()))
}

/// Fixed bonus for quality domains, penalty for social domains unless
/// the query itself names the platform.
fn domain_adjustment(domain: &str, query_lower: &str) -> f64 {
    if domain.ends_with(".edu") || domain.ends_with(".gov") || QUALITY_DOMAINS.contains(&domain) {
        return QUALITY_DOMAIN_BONUS;
    }
    for (social, keyword) in SOCIAL_DOMAINS {
        if domain == *social {
            if query_lower.contains(keyword) {
                return 0.0;
            }
            return -SOCIAL_DOMAIN_PENALTY;
        }
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EngineId;

    fn make_result(title: &str, url: &str, snippet: &str, domain: &str) -> SearchResult {
        SearchResult {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            source: EngineId::DuckDuckGo,
            domain: domain.into(),
            relevance_score: 0.0,
        }
    }

    #[test]
    fn base_score_for_unrelated_result() {
        let result = make_result("Cooking pasta", "https://food.com/pasta", "boil water", "food.com");
        let score = relevance_score(&result, "quantum computing basics");
        assert!((score - BASE_SCORE).abs() < f64::EPSILON);
    }

    #[test]
    fn exact_title_match_gets_largest_bonus() {
        let exact = make_result(
            "Quantum computing basics explained",
            "https://a.com/x",
            "",
            "a.com",
        );
        let partial = make_result("Quantum hardware", "https://b.com/x", "", "b.com");
        let q = "quantum computing basics";
        assert!(relevance_score(&exact, q) > relevance_score(&partial, q) + 2.0);
    }

    #[test]
    fn title_token_fraction_is_proportional() {
        let full = make_result("quantum computing basics", "https://a.com", "", "a.com");
        let half = make_result("quantum hardware", "https://b.com", "", "b.com");
        let q = "quantum computing";
        // full title contains both tokens, half contains one of two.
        let full_score = relevance_score(&full, q);
        let half_score = relevance_score(&half, q);
        assert!(full_score > half_score);
    }

    #[test]
    fn snippet_match_scores_less_than_title_match() {
        let in_title = make_result("rust ownership", "https://a.com", "", "a.com");
        let in_snippet = make_result("Blog", "https://b.com", "rust ownership", "b.com");
        let q = "rust ownership";
        assert!(relevance_score(&in_title, q) > relevance_score(&in_snippet, q));
    }

    #[test]
    fn url_path_token_bonus() {
        let with = make_result("Page", "https://a.com/quantum/intro", "", "a.com");
        let without = make_result("Page", "https://b.com/other", "", "b.com");
        let q = "quantum";
        let diff = relevance_score(&with, q) - relevance_score(&without, q);
        assert!((diff - URL_TOKEN_BONUS).abs() < f64::EPSILON);
    }

    #[test]
    fn short_tokens_ignored() {
        // "is" and "the" are too short to count as tokens.
        let result = make_result("is the", "https://a.com", "", "a.com");
        let score = relevance_score(&result, "is the");
        // Full-query substring match in title still applies.
        assert!((score - (BASE_SCORE + TITLE_EXACT_BONUS)).abs() < f64::EPSILON);
    }

    #[test]
    fn edu_and_gov_domains_get_bonus() {
        let edu = make_result("Page", "https://cs.mit.edu/x", "", "mit.edu");
        let gov = make_result("Page", "https://nasa.gov/x", "", "nasa.gov");
        let plain = make_result("Page", "https://blog.com/x", "", "blog.com");
        let q = "unrelated";
        assert!(relevance_score(&edu, q) > relevance_score(&plain, q));
        assert!(relevance_score(&gov, q) > relevance_score(&plain, q));
    }

    #[test]
    fn reference_allow_list_gets_bonus() {
        let wiki = make_result("Page", "https://en.wikipedia.org/wiki/X", "", "wikipedia.org");
        let plain = make_result("Page", "https://blog.com/x", "", "blog.com");
        let q = "unrelated";
        let diff = relevance_score(&wiki, q) - relevance_score(&plain, q);
        assert!((diff - QUALITY_DOMAIN_BONUS).abs() < f64::EPSILON);
    }

    #[test]
    fn social_domains_penalized() {
        let social = make_result("Thread", "https://twitter.com/x", "", "twitter.com");
        let plain = make_result("Thread", "https://blog.com/x", "", "blog.com");
        let q = "rust async runtimes";
        assert!(relevance_score(&social, q) < relevance_score(&plain, q));
    }

    #[test]
    fn social_penalty_waived_when_query_names_platform() {
        let social = make_result("Thread", "https://reddit.com/r/rust", "", "reddit.com");
        let with_platform = relevance_score(&social, "best reddit communities");
        let without_platform = relevance_score(&social, "best programming communities");
        assert!(with_platform > without_platform);
        assert!((with_platform - without_platform - SOCIAL_DOMAIN_PENALTY).abs() < f64::EPSILON);
    }

    #[test]
    fn scorer_is_pure_and_deterministic() {
        let result = make_result(
            "Quantum computing basics",
            "https://a.com/quantum",
            "an introduction to quantum computing",
            "a.com",
        );
        let a = relevance_score(&result, "quantum computing basics");
        let b = relevance_score(&result, "quantum computing basics");
        assert!((a - b).abs() < f64::EPSILON);
    }

    #[test]
    fn total_on_empty_query() {
        let result = make_result("Title", "https://a.com", "snippet", "a.com");
        let score = relevance_score(&result, "");
        assert!((score - BASE_SCORE).abs() < f64::EPSILON);
    }

    #[test]
    fn total_on_unparseable_url() {
        // Normalizer prevents this in practice, but the scorer must not panic.
        let mut result = make_result("Title", "https://a.com", "", "a.com");
        result.url = "garbage".into();
        let score = relevance_score(&result, "title");
        assert!(score >= BASE_SCORE);
    }

    #[test]
    fn score_batch_fills_scores() {
        let results = vec![
            make_result("quantum computing", "https://a.com", "", "a.com"),
            make_result("other", "https://b.com", "", "b.com"),
        ];
        let scored = score_batch(results, "quantum computing");
        assert!(scored[0].relevance_score > scored[1].relevance_score);
        assert!(scored.iter().all(|r| r.relevance_score > 0.0));
    }
}
