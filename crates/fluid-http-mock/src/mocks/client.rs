//! Mock HTTP client.
//!
//! `MockHttpClient` implements the [`HttpClient`] contract. Every request made
//! through it is recorded, matched against the registered expectations and
//! answered by executing the matching action.

use crate::error::MockError;
use crate::mocks::engine::MatchEngine;
use crate::mocks::record::{DispatchRecord, Headers, RecordedRequest};
use crate::mocks::registry::ActionRegistry;
use crate::mocks::steps::MockMethodStep;
use crate::mocks::verify;
use crate::types::action::Payload;
use crate::types::fingerprint::RequestFingerprint;
use fluid_http::{HttpClient, HttpError, HttpResponse, ResponseType};
use std::sync::Arc;
use tracing::{trace, warn};

#[derive(Debug)]
struct MockState {
    registry: Arc<ActionRegistry>,
    engine: MatchEngine,
    record: Arc<DispatchRecord>,
}

/// Client answering requests from declared expectations.
///
/// Clones share the expectations and the record of requests made.
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    state: Arc<MockState>,
    default_headers: Headers,
}

impl MockHttpClient {
    pub(crate) fn new(registry: Arc<ActionRegistry>, record: Arc<DispatchRecord>) -> Self {
        let engine = MatchEngine::new(Arc::clone(&registry));
        Self {
            state: Arc::new(MockState {
                registry,
                engine,
                record,
            }),
            default_headers: Headers::new(),
        }
    }

    /// Dispatch a request and return whatever its action produced.
    pub fn dispatch(&self, fingerprint: RequestFingerprint) -> Result<Payload, HttpError> {
        self.dispatch_with_headers(fingerprint, Headers::new())
    }

    /// Dispatch a request that must be answered with an [`HttpResponse`].
    pub fn dispatch_response(
        &self,
        fingerprint: RequestFingerprint,
    ) -> Result<HttpResponse, HttpError> {
        self.dispatch_as(fingerprint)
    }

    /// Dispatch a request whose answer must be exactly of type `R`.
    pub fn dispatch_as<R: ResponseType>(
        &self,
        fingerprint: RequestFingerprint,
    ) -> Result<R, HttpError> {
        self.dispatch_typed(fingerprint, Headers::new())
    }

    pub(crate) fn dispatch_typed<R: ResponseType>(
        &self,
        fingerprint: RequestFingerprint,
        headers: Headers,
    ) -> Result<R, HttpError> {
        let payload = self.dispatch_with_headers(fingerprint, headers)?;
        payload.into_typed::<R>().map_err(HttpError::from)
    }

    pub(crate) fn dispatch_with_headers(
        &self,
        fingerprint: RequestFingerprint,
        headers: Headers,
    ) -> Result<Payload, HttpError> {
        if fingerprint.url().is_any() {
            return Err(MockError::invalid_input(format!(
                "a dispatched request needs a concrete url: {fingerprint}"
            ))
            .into());
        }

        let mut all_headers = self.default_headers.clone();
        all_headers.extend(headers);
        self.state
            .record
            .record(RecordedRequest::new(fingerprint.clone(), all_headers));

        let Some(action) = self.state.engine.find(&fingerprint) else {
            warn!(request = %fingerprint, "unexpected request");
            return Err(MockError::UnexpectedRequest(fingerprint).into());
        };

        trace!(request = %fingerprint, action = action.kind(), "executing action");
        // No lock is held here; the action may dispatch through this client.
        action.execute()
    }

    /// Every request made through this client, its clones and any client built
    /// from the same expectations, in order.
    pub fn requests_made(&self) -> Vec<RecordedRequest> {
        self.state.record.snapshot()
    }

    /// Declared expectations, in declaration order.
    pub fn expectations(&self) -> Vec<RequestFingerprint> {
        self.state.registry.fingerprints()
    }

    /// Check that every expectation was matched by at least one request.
    ///
    /// All unmatched expectations are reported together.
    pub fn verify_all_requests_made(&self) -> Result<(), MockError> {
        let unmatched =
            verify::unmatched_expectations(&self.expectations(), &self.requests_made());
        if unmatched.is_empty() {
            return Ok(());
        }

        for expectation in &unmatched {
            warn!(expectation = %expectation, "request never made");
        }
        Err(MockError::UnsatisfiedExpectations(unmatched))
    }

    /// Panicking form of [`verify_all_requests_made`](Self::verify_all_requests_made).
    #[track_caller]
    pub fn assert_all_requests_made(&self) {
        if let Err(err) = self.verify_all_requests_made() {
            panic!("{err}");
        }
    }
}

impl HttpClient for MockHttpClient {
    type Steps = MockMethodStep;

    fn default_headers(&self) -> &Headers {
        &self.default_headers
    }

    fn using_default_header(mut self, key: &str, value: &str) -> Self {
        self.default_headers.insert(key.to_owned(), value.to_owned());
        self
    }

    fn go(&self) -> MockMethodStep {
        MockMethodStep::new(self.clone())
    }
}
