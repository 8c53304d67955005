//! Body matching with the wildcard and no-body sentinels.

use crate::types::fingerprint::BodyMatcher;

/// Check whether an actual body satisfies the expected one.
///
/// - `AnyBody` accepts every actual body.
/// - `NoBody` (or `Unset`) accepts an actual body that is `Unset` or `NoBody`.
/// - Anything else must be structurally equal.
pub fn body_matches(expected: &BodyMatcher, actual: &BodyMatcher) -> bool {
    match expected {
        BodyMatcher::AnyBody => true,
        BodyMatcher::NoBody | BodyMatcher::Unset => actual.is_absent(),
        BodyMatcher::Json(_) | BodyMatcher::Text(_) => expected == actual,
    }
}
