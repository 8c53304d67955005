use crate::matching::requests_match;
use crate::mocks::registry::ActionRegistry;
use crate::types::action::Action;
use crate::types::fingerprint::RequestFingerprint;
use std::sync::Arc;
use tracing::trace;

/// Finds the action answering a dispatched request.
///
/// An exact registry lookup covers the common case; when it misses, every
/// expectation is scanned in registration order with the wildcard and no-body
/// rules of [`requests_match`]. The first match wins.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    registry: Arc<ActionRegistry>,
}

impl MatchEngine {
    pub fn new(registry: Arc<ActionRegistry>) -> Self {
        Self { registry }
    }

    pub fn find(&self, actual: &RequestFingerprint) -> Option<Action> {
        if let Some(action) = self.registry.get(actual) {
            trace!(request = %actual, "exact expectation match");
            return Some(action);
        }

        let (expected, action) = self
            .registry
            .find_first(|expected| requests_match(expected, actual))?;
        trace!(request = %actual, expectation = %expected, "expectation matched by rule");
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::action::Payload;
    use crate::types::fingerprint::{BodyMatcher, UrlMatcher};
    use fluid_http::HttpMethod;
    use rstest::{fixture, rstest};
    use serde_json::{json, Value};

    const URL: &str = "https://api.example.com/users";

    fn request(method: HttpMethod, body: BodyMatcher) -> RequestFingerprint {
        RequestFingerprint::parse(method, URL)
            .expect("valid url")
            .with_body(body)
    }

    fn answer(action: Option<Action>) -> Value {
        match action.expect("should match").execute().expect("ok") {
            Payload::Json(json) => json,
            other => panic!("expected json payload, got {other:?}"),
        }
    }

    #[fixture]
    fn registry() -> Arc<ActionRegistry> {
        Arc::new(ActionRegistry::new())
    }

    #[rstest]
    fn test_exact_match(registry: Arc<ActionRegistry>) {
        let expected = request(HttpMethod::Post, BodyMatcher::Json(json!({"id": 1})));
        registry.put(expected.clone(), Action::ReturnJson(json!("exact")));

        let engine = MatchEngine::new(registry);
        assert_eq!(answer(engine.find(&expected)), json!("exact"));
    }

    #[rstest]
    #[case(BodyMatcher::Json(json!({"name": "a"})))]
    #[case(BodyMatcher::Text("raw".to_string()))]
    #[case(BodyMatcher::NoBody)]
    #[case(BodyMatcher::Unset)]
    fn test_wildcard_law(registry: Arc<ActionRegistry>, #[case] body: BodyMatcher) {
        registry.put(
            request(HttpMethod::Post, BodyMatcher::AnyBody),
            Action::ReturnJson(json!("any")),
        );

        let engine = MatchEngine::new(registry);
        assert_eq!(answer(engine.find(&request(HttpMethod::Post, body))), json!("any"));
    }

    #[rstest]
    fn test_no_body_law(registry: Arc<ActionRegistry>) {
        registry.put(
            request(HttpMethod::Put, BodyMatcher::NoBody),
            Action::ReturnJson(json!("none")),
        );
        let engine = MatchEngine::new(registry);

        assert_eq!(
            answer(engine.find(&request(HttpMethod::Put, BodyMatcher::Unset))),
            json!("none")
        );
        assert_eq!(
            answer(engine.find(&request(HttpMethod::Put, BodyMatcher::NoBody))),
            json!("none")
        );
        assert!(engine
            .find(&request(HttpMethod::Put, BodyMatcher::Json(json!("x"))))
            .is_none());
    }

    #[rstest]
    fn test_first_registered_rule_wins(registry: Arc<ActionRegistry>) {
        registry.put(
            RequestFingerprint::new(HttpMethod::Delete, UrlMatcher::Any).with_body(BodyMatcher::AnyBody),
            Action::ReturnJson(json!("any url")),
        );
        registry.put(
            request(HttpMethod::Delete, BodyMatcher::AnyBody),
            Action::ReturnJson(json!("users")),
        );

        let engine = MatchEngine::new(registry);
        let actual = request(HttpMethod::Delete, BodyMatcher::NoBody);
        assert_eq!(answer(engine.find(&actual)), json!("any url"));
    }

    #[rstest]
    fn test_exact_match_beats_earlier_rule(registry: Arc<ActionRegistry>) {
        registry.put(
            request(HttpMethod::Post, BodyMatcher::AnyBody),
            Action::ReturnJson(json!("wildcard")),
        );
        let concrete = request(HttpMethod::Post, BodyMatcher::Json(json!({"id": 2})));
        registry.put(concrete.clone(), Action::ReturnJson(json!("exact")));

        let engine = MatchEngine::new(registry);
        assert_eq!(answer(engine.find(&concrete)), json!("exact"));
    }

    #[rstest]
    fn test_no_match(registry: Arc<ActionRegistry>) {
        registry.put(
            request(HttpMethod::Get, BodyMatcher::NoBody),
            Action::ReturnJson(Value::Null),
        );
        let engine = MatchEngine::new(registry);
        assert!(engine
            .find(&request(HttpMethod::Post, BodyMatcher::NoBody))
            .is_none());
    }
}
