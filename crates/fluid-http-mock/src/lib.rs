//! Test double for [`fluid_http`] clients.
//!
//! Declare the requests the code under test must make and what each one answers,
//! hand the resulting [`MockHttpClient`] to the code, then check that every
//! declared request was made:
//!
//! ```text
//! let http = HttpMock::begin()
//!     .when_get()
//!     .at("https://api.example.com/users")?
//!     .then_return_json(json!([]))
//!     .build();
//!
//! run_code_under_test(&http);
//!
//! http.verify_all_requests_made()?;
//! ```
//!
//! Requests nobody declared fail with [`MockError::UnexpectedRequest`].
//! Expectations can also be loaded from YAML/JSON fixture files with
//! [`Expectations::load_fixtures`].

pub mod builder;
pub mod config;
pub mod error;
pub mod matching;
pub mod mocks;
pub mod types;

pub use builder::{BodyStage, Expectations, HttpMock, ThenStage, UrlStage};
pub use config::ConfigError;
pub use error::MockError;
pub use mocks::{MockHttpClient, RecordedRequest};
pub use types::action::{Action, ObjectPayload, Payload};
pub use types::fingerprint::{BodyMatcher, QueryParams, RequestFingerprint, UrlMatcher};
