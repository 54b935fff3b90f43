//! Registrable-domain extraction.
//!
//! Collapses a URL's host to the domain level at which result diversity
//! is enforced: subdomains are stripped, and ccTLD-style suffixes such
//! as `co.uk` or `com.au` keep one extra label. Pure and deterministic —
//! this function is the basis of the one-result-per-domain invariant.

use url::Url;

/// Second-level labels that indicate a ccTLD-style suffix when followed
/// by a short (≤3 chars) country label, e.g. `co.uk`, `com.au`, `ac.jp`.
const CC_SECOND_LEVEL: &[&str] = &["co", "com", "org", "net", "edu", "gov", "ac"];

/// Extract the registrable domain from a URL.
///
/// Steps:
///
/// 1. Parse the URL and take its host (IP hosts and missing hosts yield `None`).
/// 2. Strip a leading `www.`.
/// 3. If the host has more than two labels, the second-to-last label is
///    in [`CC_SECOND_LEVEL`], and the last label is at most 3 characters,
///    keep the last three labels; otherwise keep the last two.
///
/// # Examples
///
/// ```
/// use polysearch::domain::registrable_domain;
///
/// assert_eq!(
///     registrable_domain("https://www.example.co.uk/a/b").as_deref(),
///     Some("example.co.uk")
/// );
/// assert_eq!(
///     registrable_domain("https://sub.example.com").as_deref(),
///     Some("example.com")
/// );
/// ```
pub fn registrable_domain(raw_url: &str) -> Option<String> {
    let parsed = Url::parse(raw_url).ok()?;
    let host = match parsed.host_str() {
        Some(h) if !h.is_empty() => h.to_lowercase(),
        _ => return None,
    };

    // IP literals have no registrable domain.
    if host.parse::<std::net::IpAddr>().is_ok() {
        return None;
    }

    let host = host.strip_prefix("www.").unwrap_or(&host);
    let labels: Vec<&str> = host.split('.').collect();

    if labels.len() <= 2 {
        return Some(host.to_string());
    }

    let last = labels[labels.len() - 1];
    let second_last = labels[labels.len() - 2];
    let keep = if CC_SECOND_LEVEL.contains(&second_last) && last.len() <= 3 {
        3
    } else {
        2
    };

    Some(labels[labels.len() - keep..].join("."))
}
