//! Request fingerprints: the comparable description of one request.

use crate::error::MockError;
use crate::matching::parse_query_string;
use fluid_http::HttpMethod;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use url::Url;

/// Query parameters of a request. Repeated keys are joined with `,`.
pub type QueryParams = BTreeMap<String, String>;

/// How the body of a request is described.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyMatcher {
    /// No body was ever set (GET requests)
    Unset,
    /// The request explicitly carries no payload
    NoBody,
    /// Wildcard: accepts any payload
    AnyBody,
    /// Structured payload in canonical JSON form
    Json(Value),
    /// Payload that is not valid JSON, compared verbatim
    Text(String),
}

impl BodyMatcher {
    /// Capture a serializable payload as canonical JSON.
    pub fn from_serialize<B: Serialize + ?Sized>(body: &B) -> Result<Self, MockError> {
        serde_json::to_value(body)
            .map(BodyMatcher::Json)
            .map_err(|e| MockError::invalid_input(format!("body cannot be serialized: {e}")))
    }

    /// Read a pre-serialized payload. JSON text is normalized so it compares
    /// equal to the same payload given as a structure.
    pub fn from_json_str(body: &str) -> Result<Self, MockError> {
        if body.is_empty() {
            return Err(MockError::invalid_input("body string cannot be empty"));
        }
        Ok(serde_json::from_str::<Value>(body)
            .map(BodyMatcher::Json)
            .unwrap_or_else(|_| BodyMatcher::Text(body.to_owned())))
    }

    /// `Unset` and `NoBody` both mean the request has no payload.
    pub fn is_absent(&self) -> bool {
        matches!(self, BodyMatcher::Unset | BodyMatcher::NoBody)
    }
}

impl Hash for BodyMatcher {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            BodyMatcher::Json(value) => hash_json(value, state),
            BodyMatcher::Text(text) => text.hash(state),
            BodyMatcher::Unset | BodyMatcher::NoBody | BodyMatcher::AnyBody => {}
        }
    }
}

// Object keys are visited sorted so equal values hash equally whatever the map
// ordering serde_json was built with.
fn hash_json<H: Hasher>(value: &Value, state: &mut H) {
    std::mem::discriminant(value).hash(state);
    match value {
        Value::Null => {}
        Value::Bool(b) => b.hash(state),
        Value::Number(n) => n.to_string().hash(state),
        Value::String(s) => s.hash(state),
        Value::Array(items) => {
            items.len().hash(state);
            for item in items {
                hash_json(item, state);
            }
        }
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            entries.len().hash(state);
            for (key, item) in entries {
                key.hash(state);
                hash_json(item, state);
            }
        }
    }
}

impl fmt::Display for BodyMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyMatcher::Unset => f.write_str("unset body"),
            BodyMatcher::NoBody => f.write_str("no body"),
            BodyMatcher::AnyBody => f.write_str("any body"),
            BodyMatcher::Json(value) => write!(f, "body {value}"),
            BodyMatcher::Text(text) => write!(f, "body {text:?}"),
        }
    }
}

/// URL a request is made to, or a wildcard for declarations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UrlMatcher {
    Exact(Url),
    Any,
}

impl UrlMatcher {
    pub fn is_any(&self) -> bool {
        matches!(self, UrlMatcher::Any)
    }
}

impl fmt::Display for UrlMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlMatcher::Exact(url) => f.write_str(url.as_str()),
            UrlMatcher::Any => f.write_str("<any url>"),
        }
    }
}

/// Parse and normalize a request URL.
///
/// The query string moves into the returned parameters and the fragment is
/// dropped, so `https://x/users?page=1` and `https://x/users` with a `page`
/// query parameter describe the same request.
pub fn parse_url(raw: &str) -> Result<(Url, QueryParams), MockError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(MockError::invalid_input("url cannot be empty"));
    }

    let url =
        Url::parse(raw).map_err(|e| MockError::invalid_input(format!("invalid url '{raw}': {e}")))?;
    Ok(split_url(url))
}

/// Move the query string of `url` into parameters and drop its fragment.
pub fn split_url(mut url: Url) -> (Url, QueryParams) {
    let query = url.query().map(parse_query_string).unwrap_or_default();
    url.set_query(None);
    url.set_fragment(None);
    (url, query)
}

/// Immutable description of an expected or dispatched request.
///
/// Equality and hashing are structural over method, URL, body and query
/// parameters. The body sentinels (`NoBody`, `AnyBody`, `Unset`) are their own
/// variants and never equal a payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestFingerprint {
    method: HttpMethod,
    url: UrlMatcher,
    body: BodyMatcher,
    query_params: QueryParams,
}

impl RequestFingerprint {
    pub fn new(method: HttpMethod, url: UrlMatcher) -> Self {
        Self {
            method,
            url,
            body: BodyMatcher::Unset,
            query_params: QueryParams::new(),
        }
    }

    /// Build a fingerprint for `url`, taking query parameters from its query string.
    pub fn parse(method: HttpMethod, url: &str) -> Result<Self, MockError> {
        let (url, query_params) = parse_url(url)?;
        Ok(Self {
            query_params,
            ..Self::new(method, UrlMatcher::Exact(url))
        })
    }

    /// Same as [`parse`](Self::parse) for an already parsed URL.
    pub fn from_url(method: HttpMethod, url: Url) -> Self {
        let (url, query_params) = split_url(url);
        Self {
            query_params,
            ..Self::new(method, UrlMatcher::Exact(url))
        }
    }

    pub fn with_body(self, body: BodyMatcher) -> Self {
        Self { body, ..self }
    }

    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(name.into(), value.into());
        self
    }

    pub fn with_query_params(mut self, params: QueryParams) -> Self {
        self.query_params.extend(params);
        self
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn url(&self) -> &UrlMatcher {
        &self.url
    }

    pub fn body(&self) -> &BodyMatcher {
        &self.body
    }

    pub fn query_params(&self) -> &QueryParams {
        &self.query_params
    }
}

impl fmt::Display for RequestFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)?;
        for (i, (name, value)) in self.query_params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(
                f,
                "{sep}{}={}",
                urlencoding::encode(name),
                urlencoding::encode(value)
            )?;
        }
        if self.body != BodyMatcher::Unset {
            write!(f, " with {}", self.body)?;
        }
        Ok(())
    }
}
