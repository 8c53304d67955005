//! HTTP response type.

use crate::error::HttpError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Response returned by [`RequestStep::at`](crate::RequestStep::at).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// HTTP status code (100-599)
    pub status: u16,
    /// Response headers
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// Response body (JSON)
    #[serde(default)]
    pub body: Value,
}

impl HttpResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: Value::Null,
        }
    }

    pub fn ok() -> Self {
        Self::new(200)
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserialize the body into `T`.
    pub fn body_as<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_value(self.body.clone()).map_err(HttpError::wrap)
    }

    /// Body as text. String bodies are returned as is, anything else as JSON.
    pub fn body_as_string(&self) -> String {
        match &self.body {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct User {
        id: u32,
        name: String,
    }

    #[rstest]
    #[case(200, true)]
    #[case(204, true)]
    #[case(299, true)]
    #[case(301, false)]
    #[case(404, false)]
    #[case(500, false)]
    fn test_is_success(#[case] status: u16, #[case] expected: bool) {
        assert_eq!(HttpResponse::new(status).is_success(), expected);
    }

    #[rstest]
    fn test_body_as_struct() {
        let response = HttpResponse::ok().with_body(json!({"id": 7, "name": "ada"}));
        let user: User = response.body_as().expect("Should deserialize");
        assert_eq!(
            user,
            User {
                id: 7,
                name: "ada".to_string()
            }
        );
    }

    #[rstest]
    fn test_body_as_wrong_shape_is_operation_error() {
        let response = HttpResponse::ok().with_body(json!([1, 2, 3]));
        let err = response.body_as::<User>().unwrap_err();
        assert!(matches!(err, HttpError::Operation { .. }));
        assert!(err.source_as::<serde_json::Error>().is_some());
    }

    #[rstest]
    #[case(json!("plain"), "plain")]
    #[case(Value::Null, "")]
    #[case(json!({"a": 1}), "{\"a\":1}")]
    fn test_body_as_string(#[case] body: Value, #[case] expected: &str) {
        assert_eq!(HttpResponse::ok().with_body(body).body_as_string(), expected);
    }

    #[rstest]
    fn test_response_deserializes_with_defaults() {
        let response: HttpResponse =
            serde_json::from_str(r#"{"status": 201}"#).expect("Should deserialize");
        assert_eq!(response, HttpResponse::new(201));
    }

    #[rstest]
    fn test_response_headers_omitted_when_empty() {
        let json = serde_json::to_string(&HttpResponse::ok()).expect("Should serialize");
        assert!(!json.contains("headers"));
        let json = serde_json::to_string(&HttpResponse::ok().with_header("X-Id", "1"))
            .expect("Should serialize");
        assert!(json.contains("X-Id"));
    }
}
