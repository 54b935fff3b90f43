//! Query variation generation for the fallback tiers.
//!
//! When the primary query under-produces diverse results, the
//! orchestrator re-queries engines with alternate phrasings: the query
//! stripped of interrogative boilerplate, combined with discovery
//! suffixes such as "tutorial" or "research". Variations are generated
//! once per session and consumed at most once.

/// Leading interrogative phrases stripped before building variations.
/// Ordered longest-first so that e.g. "what is the" wins over "what is".
const INTERROGATIVE_PREFIXES: &[&str] = &[
    "tell me about",
    "what is the",
    "what are the",
    "how does the",
    "what is",
    "what are",
    "how does",
    "how do",
    "how to",
    "why does",
    "why is",
    "why are",
    "who is",
    "who are",
    "where is",
    "explain",
];

/// Suffixes appended to the cleaned query, in escalation order.
const VARIATION_SUFFIXES: &[&str] = &["tutorial", "guide", "explained", "research"];

/// Maximum number of variations (including the original query).
const MAX_VARIATIONS: usize = 5;

/// The original query plus its derived alternate phrasings.
///
/// Generated eagerly at construction and cached for the session; the
/// sequence is finite, ordered, and at most [`MAX_VARIATIONS`] long.
#[derive(Debug, Clone)]
pub struct QueryVariations {
    original: String,
    variants: Vec<String>,
}

impl QueryVariations {
    /// Build the variation sequence for a query.
    ///
    /// The sequence starts with the original query, followed by the
    /// cleaned query (interrogative prefix and trailing punctuation
    /// removed) combined with each suffix in [`VARIATION_SUFFIXES`].
    /// Duplicates of earlier entries are skipped.
    pub fn generate(query: &str) -> Self {
        let original = query.trim().to_string();
        let clean = clean_query(&original);

        let mut variants = vec![original.clone()];
        for suffix in VARIATION_SUFFIXES {
            if variants.len() >= MAX_VARIATIONS {
                break;
            }
            let candidate = format!("{clean} {suffix}");
            if !variants.contains(&candidate) {
                variants.push(candidate);
            }
        }

        Self { original, variants }
    }

    /// The query as the caller supplied it (trimmed).
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The full ordered variation sequence, original first.
    pub fn all(&self) -> &[String] {
        &self.variants
    }

    /// Alternate phrasings only (everything after the original), for
    /// the variations tier.
    pub fn alternates(&self) -> &[String] {
        &self.variants[1..]
    }
}

/// Strip a leading interrogative phrase and trailing punctuation.
///
/// Falls back to the trimmed original if stripping would leave the
/// query empty.
fn clean_query(query: &str) -> String {
    let trimmed = query
        .trim()
        .trim_end_matches(['?', '!', '.'])
        .trim()
        .to_string();
    let lower = trimmed.to_lowercase();

    for prefix in INTERROGATIVE_PREFIXES {
        if lower.starts_with(prefix) {
            let rest = trimmed[prefix.len()..].trim();
            if !rest.is_empty() {
                return rest.to_string();
            }
        }
    }
    trimmed
}
