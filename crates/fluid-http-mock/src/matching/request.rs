use crate::matching::{body_matches, query_matches, url_matches};
use crate::types::fingerprint::RequestFingerprint;

/// Check if an expected fingerprint matches an actual request.
///
/// Method, URL and query parameters must agree; the body is compared with the
/// sentinel rules of [`body_matches`].
pub fn requests_match(expected: &RequestFingerprint, actual: &RequestFingerprint) -> bool {
    expected.method() == actual.method()
        && url_matches(expected.url(), actual.url())
        && query_matches(expected.query_params(), actual.query_params())
        && body_matches(expected.body(), actual.body())
}
