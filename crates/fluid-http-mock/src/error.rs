//! Errors raised by the mock.

use crate::types::fingerprint::RequestFingerprint;
use fluid_http::HttpError;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MockError {
    /// The builder or verification API was called with an argument it cannot use
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// No expectation matches a dispatched request
    #[error("unexpected request: {0}")]
    UnexpectedRequest(RequestFingerprint),
    /// The action produced a value of another type than the caller expects
    #[error("wrong response type: wanted {expected} but actual: {actual}")]
    WrongResponseType {
        expected: &'static str,
        actual: &'static str,
    },
    /// Verification was asked for a client this crate did not build
    #[error("can only verify clients built by HttpMock")]
    NotAMockClient,
    /// Expectations that no dispatched request matched
    #[error("{} request(s) never made:{}", .0.len(), list_fingerprints(.0))]
    UnsatisfiedExpectations(Vec<RequestFingerprint>),
}

impl MockError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        MockError::InvalidInput(message.into())
    }
}

fn list_fingerprints(fingerprints: &[RequestFingerprint]) -> String {
    fingerprints
        .iter()
        .map(|fingerprint| format!("\n  - {fingerprint}"))
        .collect()
}

impl From<MockError> for HttpError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::InvalidInput(message) => HttpError::InvalidArgument(message),
            other => HttpError::Operation {
                message: other.to_string(),
                source: Some(Arc::new(other)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluid_http::HttpMethod;
    use rstest::rstest;

    fn fingerprint(method: HttpMethod, url: &str) -> RequestFingerprint {
        RequestFingerprint::parse(method, url).expect("valid url")
    }

    #[rstest]
    fn test_invalid_input_becomes_invalid_argument() {
        let err: HttpError = MockError::invalid_input("url cannot be empty").into();
        assert!(matches!(err, HttpError::InvalidArgument(ref m) if m == "url cannot be empty"));
    }

    #[rstest]
    fn test_unexpected_request_keeps_mock_error_as_source() {
        let request = fingerprint(HttpMethod::Get, "https://api.example.com/users");
        let err: HttpError = MockError::UnexpectedRequest(request.clone()).into();

        assert!(err.to_string().starts_with("unexpected request: GET"));
        assert_eq!(
            err.source_as::<MockError>(),
            Some(&MockError::UnexpectedRequest(request))
        );
    }

    #[rstest]
    fn test_unsatisfied_lists_every_fingerprint() {
        let err = MockError::UnsatisfiedExpectations(vec![
            fingerprint(HttpMethod::Get, "https://api.example.com/a"),
            fingerprint(HttpMethod::Delete, "https://api.example.com/b"),
        ]);
        let message = err.to_string();

        assert!(message.starts_with("2 request(s) never made:"));
        assert!(message.contains("\n  - GET https://api.example.com/a"));
        assert!(message.contains("\n  - DELETE https://api.example.com/b"));
    }

    #[rstest]
    fn test_wrong_response_type_display() {
        let err = MockError::WrongResponseType {
            expected: "alloc::string::String",
            actual: "u32",
        };
        assert_eq!(
            err.to_string(),
            "wrong response type: wanted alloc::string::String but actual: u32"
        );
    }
}
