use crate::error::MockError;
use crate::matching::requests_match;
use crate::mocks::client::MockHttpClient;
use crate::mocks::record::RecordedRequest;
use crate::types::fingerprint::RequestFingerprint;
use fluid_http::HttpClient;
use std::any::Any;

/// Expectations no recorded request matched, in declaration order.
pub fn unmatched_expectations(
    expected: &[RequestFingerprint],
    made: &[RecordedRequest],
) -> Vec<RequestFingerprint> {
    expected
        .iter()
        .filter(|expectation| {
            !made
                .iter()
                .any(|request| requests_match(expectation, request.fingerprint()))
        })
        .cloned()
        .collect()
}

/// Verify a client that is expected to be a [`MockHttpClient`].
pub fn verify_all_requests_made<C>(client: &C) -> Result<(), MockError>
where
    C: HttpClient + Any,
{
    let any: &dyn Any = client;
    any.downcast_ref::<MockHttpClient>()
        .ok_or(MockError::NotAMockClient)?
        .verify_all_requests_made()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fingerprint::{BodyMatcher, UrlMatcher};
    use fluid_http::HttpMethod;
    use rstest::rstest;
    use serde_json::json;
    use std::collections::BTreeMap;

    const URL: &str = "https://api.example.com/orders";

    fn made(method: HttpMethod, body: BodyMatcher) -> RecordedRequest {
        RequestFingerprint::parse(method, URL)
            .expect("valid url")
            .with_body(body)
            .into()
    }

    fn expected(method: HttpMethod, body: BodyMatcher) -> RequestFingerprint {
        RequestFingerprint::parse(method, URL)
            .expect("valid url")
            .with_body(body)
    }

    struct OtherClient {
        headers: BTreeMap<String, String>,
    }

    impl HttpClient for OtherClient {
        type Steps = crate::mocks::steps::MockMethodStep;

        fn default_headers(&self) -> &BTreeMap<String, String> {
            &self.headers
        }

        fn using_default_header(self, _key: &str, _value: &str) -> Self {
            self
        }

        fn go(&self) -> Self::Steps {
            crate::HttpMock::begin().build().go()
        }
    }

    #[rstest]
    fn test_all_matched() {
        let expectations = vec![
            expected(HttpMethod::Get, BodyMatcher::NoBody),
            expected(HttpMethod::Post, BodyMatcher::AnyBody),
        ];
        let requests = vec![
            made(HttpMethod::Post, BodyMatcher::Json(json!({"id": 1}))),
            made(HttpMethod::Get, BodyMatcher::Unset),
        ];
        assert!(unmatched_expectations(&expectations, &requests).is_empty());
    }

    #[rstest]
    fn test_every_unmatched_expectation_is_reported_in_order() {
        let expectations = vec![
            expected(HttpMethod::Delete, BodyMatcher::NoBody),
            expected(HttpMethod::Get, BodyMatcher::NoBody),
            RequestFingerprint::new(HttpMethod::Put, UrlMatcher::Any)
                .with_body(BodyMatcher::AnyBody),
        ];
        let requests = vec![made(HttpMethod::Get, BodyMatcher::Unset)];

        assert_eq!(
            unmatched_expectations(&expectations, &requests),
            vec![expectations[0].clone(), expectations[2].clone()]
        );
    }

    #[rstest]
    fn test_wildcard_expectation_satisfied_by_any_url() {
        let expectations = vec![
            RequestFingerprint::new(HttpMethod::Put, UrlMatcher::Any).with_body(BodyMatcher::AnyBody),
        ];
        let requests = vec![made(HttpMethod::Put, BodyMatcher::Text("x".to_string()))];
        assert!(unmatched_expectations(&expectations, &requests).is_empty());
    }

    #[rstest]
    fn test_verify_mock_client() {
        let client = crate::HttpMock::begin().build();
        assert_eq!(verify_all_requests_made(&client), Ok(()));
    }

    #[rstest]
    fn test_verify_other_client_is_rejected() {
        let client = OtherClient {
            headers: BTreeMap::new(),
        };
        assert_eq!(
            verify_all_requests_made(&client),
            Err(MockError::NotAMockClient)
        );
    }
}
