//! Record of dispatched requests.

use crate::types::fingerprint::RequestFingerprint;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Request headers, keyed by name.
pub type Headers = BTreeMap<String, String>;

/// One request made through the mock client.
///
/// Headers are kept for inspection only and take no part in matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    fingerprint: RequestFingerprint,
    headers: Headers,
}

impl RecordedRequest {
    pub fn new(fingerprint: RequestFingerprint, headers: Headers) -> Self {
        Self {
            fingerprint,
            headers,
        }
    }

    pub fn fingerprint(&self) -> &RequestFingerprint {
        &self.fingerprint
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl From<RequestFingerprint> for RecordedRequest {
    fn from(fingerprint: RequestFingerprint) -> Self {
        Self::new(fingerprint, Headers::new())
    }
}

/// Append-only list of dispatched requests.
#[derive(Debug, Default)]
pub struct DispatchRecord {
    requests: Mutex<Vec<RecordedRequest>>,
}

impl DispatchRecord {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RecordedRequest>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record(&self, request: RecordedRequest) {
        self.lock().push(request);
    }

    /// Copy of every recorded request, in dispatch order.
    pub fn snapshot(&self) -> Vec<RecordedRequest> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluid_http::HttpMethod;
    use rstest::rstest;
    use std::sync::Arc;
    use std::thread;

    fn request(path: &str) -> RecordedRequest {
        RequestFingerprint::parse(HttpMethod::Get, &format!("https://x.io{path}"))
            .expect("valid url")
            .into()
    }

    #[rstest]
    fn test_record_keeps_order() {
        let record = DispatchRecord::new();
        assert!(record.is_empty());

        record.record(request("/a"));
        record.record(request("/b"));
        record.record(request("/a"));

        let paths: Vec<String> = record
            .snapshot()
            .iter()
            .map(|r| r.fingerprint().url().to_string())
            .collect();
        assert_eq!(
            paths,
            vec!["https://x.io/a", "https://x.io/b", "https://x.io/a"]
        );
    }

    #[rstest]
    fn test_concurrent_appends_are_not_lost() {
        let record = Arc::new(DispatchRecord::new());

        thread::scope(|scope| {
            for _ in 0..8 {
                let record = Arc::clone(&record);
                scope.spawn(move || {
                    for i in 0..50 {
                        record.record(request(&format!("/{i}")));
                    }
                });
            }
        });

        assert_eq!(record.len(), 400);
    }

    #[rstest]
    #[case("content-type")]
    #[case("Content-Type")]
    #[case("CONTENT-TYPE")]
    fn test_header_lookup_ignores_case(#[case] name: &str) {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        let recorded = RecordedRequest::new(
            RequestFingerprint::parse(HttpMethod::Get, "https://x.io/").expect("valid url"),
            headers,
        );
        assert_eq!(recorded.header(name), Some("application/json"));
        assert_eq!(recorded.header("accept"), None);
    }
}
