//! Declaration of expected requests.
//!
//! Expectations are declared with a step chain:
//!
//! ```text
//! HttpMock::begin()
//!     .when_post()          // method
//!     .any_body()           // body (skipped for GET)
//!     .at(url)?             // url
//!     .then_return_json(..) // action, back to the method stage
//!     .build()              // client
//! ```

mod stages;

pub use stages::{BodyStage, ThenStage, UrlStage};

use crate::config::{self, ConfigError};
use crate::error::MockError;
use crate::mocks::client::MockHttpClient;
use crate::mocks::record::DispatchRecord;
use crate::mocks::registry::ActionRegistry;
use crate::mocks::verify;
use crate::types::action::Action;
use crate::types::fingerprint::{BodyMatcher, RequestFingerprint};
use fluid_http::{HttpClient, HttpMethod};
use std::any::Any;
use std::sync::Arc;
use tracing::debug;

/// Entry point of the mock.
pub struct HttpMock;

impl HttpMock {
    /// Start declaring expectations.
    pub fn begin() -> Expectations {
        Expectations::new()
    }

    /// Check that every expectation of `client` was met.
    ///
    /// Fails with [`MockError::NotAMockClient`] for clients not built here.
    pub fn verify_all_requests_made<C>(client: &C) -> Result<(), MockError>
    where
        C: HttpClient + Any,
    {
        verify::verify_all_requests_made(client)
    }
}

/// Method stage of the declaration chain.
///
/// Clones share the same expectations and the same record of requests made, so
/// several threads may declare at once and every client built from them
/// verifies against the requests made through any of the others.
#[derive(Debug, Clone, Default)]
pub struct Expectations {
    registry: Arc<ActionRegistry>,
    record: Arc<DispatchRecord>,
}

impl Expectations {
    pub fn new() -> Self {
        Self::default()
    }

    /// GET requests carry no body, so the body stage is skipped.
    pub fn when_get(self) -> UrlStage {
        UrlStage::new(self, HttpMethod::Get, BodyMatcher::NoBody)
    }

    pub fn when_post(self) -> BodyStage {
        BodyStage::new(self, HttpMethod::Post)
    }

    pub fn when_put(self) -> BodyStage {
        BodyStage::new(self, HttpMethod::Put)
    }

    pub fn when_delete(self) -> BodyStage {
        BodyStage::new(self, HttpMethod::Delete)
    }

    /// Register an already built fingerprint.
    pub fn declare(self, fingerprint: RequestFingerprint, action: Action) -> Self {
        self.publish(fingerprint, action);
        self
    }

    /// Register every expectation found in the fixture files matching `pattern`.
    pub fn load_fixtures(self, pattern: &str) -> Result<Self, ConfigError> {
        for (fingerprint, action) in config::load_fixtures(pattern)? {
            self.publish(fingerprint, action);
        }
        Ok(self)
    }

    /// Number of distinct expectations declared so far.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn build(self) -> MockHttpClient {
        MockHttpClient::new(self.registry, self.record)
    }

    pub(crate) fn publish(&self, fingerprint: RequestFingerprint, action: Action) {
        let kind = action.kind();
        let shown = fingerprint.to_string();
        match self.registry.put(fingerprint, action) {
            Some(replaced) => debug!(
                expectation = %shown,
                action = kind,
                replaced = replaced.kind(),
                "replaced expectation"
            ),
            None => debug!(expectation = %shown, action = kind, "registered expectation"),
        }
    }
}
