use crate::types::fingerprint::UrlMatcher;

/// `Any` on the expected side matches every URL; otherwise URLs must be equal.
pub fn url_matches(expected: &UrlMatcher, actual: &UrlMatcher) -> bool {
    match (expected, actual) {
        (UrlMatcher::Any, _) => true,
        (UrlMatcher::Exact(expected), UrlMatcher::Exact(actual)) => expected == actual,
        (UrlMatcher::Exact(_), UrlMatcher::Any) => false,
    }
}
