//! Request assembly stages of the mock client.
//!
//! Each chain owns one [`PendingRequest`] which becomes a [`RequestFingerprint`]
//! once `at(url)` supplies the URL.

use crate::error::MockError;
use crate::mocks::client::MockHttpClient;
use crate::mocks::record::Headers;
use crate::types::fingerprint::{BodyMatcher, QueryParams, RequestFingerprint};
use fluid_http::{
    BodyStep, CallbackStep, ExpectingStep, HttpError, HttpMethod, HttpResponse, MethodStep,
    OnFailure, OnSuccess, RequestStep, ResponseType, SuccessStep,
};
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;

#[derive(Debug, Clone)]
struct PendingRequest {
    method: HttpMethod,
    body: BodyMatcher,
    query: QueryParams,
    headers: Headers,
}

impl PendingRequest {
    fn new(method: HttpMethod) -> Self {
        Self {
            method,
            body: BodyMatcher::Unset,
            query: QueryParams::new(),
            headers: Headers::new(),
        }
    }

    /// Explicit query parameters override the ones in the URL's query string.
    fn into_fingerprint(self, url: &str) -> Result<(RequestFingerprint, Headers), HttpError> {
        let fingerprint = RequestFingerprint::parse(self.method, url)?
            .with_body(self.body)
            .with_query_params(self.query);
        Ok((fingerprint, self.headers))
    }
}

/// Method selection, returned by [`MockHttpClient::go`](fluid_http::HttpClient::go).
#[derive(Debug)]
pub struct MockMethodStep {
    client: MockHttpClient,
}

impl MockMethodStep {
    pub(crate) fn new(client: MockHttpClient) -> Self {
        Self { client }
    }

    fn with_body(self, method: HttpMethod) -> MockBodyStep {
        MockBodyStep {
            client: self.client,
            pending: PendingRequest::new(method),
        }
    }
}

impl MethodStep for MockMethodStep {
    type Body = MockBodyStep;
    type Request = MockRequestStep;

    fn get(self) -> MockRequestStep {
        MockRequestStep {
            client: self.client,
            pending: PendingRequest::new(HttpMethod::Get),
        }
    }

    fn post(self) -> MockBodyStep {
        self.with_body(HttpMethod::Post)
    }

    fn put(self) -> MockBodyStep {
        self.with_body(HttpMethod::Put)
    }

    fn delete(self) -> MockBodyStep {
        self.with_body(HttpMethod::Delete)
    }
}

#[derive(Debug)]
pub struct MockBodyStep {
    client: MockHttpClient,
    pending: PendingRequest,
}

impl MockBodyStep {
    fn finish(mut self, body: BodyMatcher) -> MockRequestStep {
        self.pending.body = body;
        MockRequestStep {
            client: self.client,
            pending: self.pending,
        }
    }
}

impl BodyStep for MockBodyStep {
    type Request = MockRequestStep;

    fn no_body(self) -> MockRequestStep {
        self.finish(BodyMatcher::NoBody)
    }

    fn body<B: Serialize + ?Sized>(self, body: &B) -> Result<MockRequestStep, HttpError> {
        let body = BodyMatcher::from_serialize(body)?;
        Ok(self.finish(body))
    }

    fn body_json(self, json: Value) -> MockRequestStep {
        self.finish(BodyMatcher::Json(json))
    }

    fn body_str(self, json: &str) -> Result<MockRequestStep, HttpError> {
        let body = BodyMatcher::from_json_str(json)?;
        Ok(self.finish(body))
    }
}

#[derive(Debug)]
pub struct MockRequestStep {
    client: MockHttpClient,
    pending: PendingRequest,
}

impl RequestStep for MockRequestStep {
    type Expecting<R: ResponseType> = MockExpectingStep<R>;
    type Success = MockSuccessStep<HttpResponse>;

    fn using_header(mut self, key: &str, value: &str) -> Result<Self, HttpError> {
        if key.trim().is_empty() {
            return Err(MockError::invalid_input("header name cannot be empty").into());
        }
        self.pending.headers.insert(key.to_owned(), value.to_owned());
        Ok(self)
    }

    fn using_query_param<V: ToString>(mut self, name: &str, value: V) -> Result<Self, HttpError> {
        if name.is_empty() {
            return Err(MockError::invalid_input("query parameter name cannot be empty").into());
        }
        self.pending.query.insert(name.to_owned(), value.to_string());
        Ok(self)
    }

    fn expecting<R: ResponseType>(self) -> MockExpectingStep<R> {
        MockExpectingStep {
            client: self.client,
            pending: self.pending,
            response_type: PhantomData,
        }
    }

    fn on_success<F>(self, callback: F) -> MockSuccessStep<HttpResponse>
    where
        F: FnOnce(HttpResponse) + Send + 'static,
    {
        self.expecting::<HttpResponse>().on_success(callback)
    }

    fn at(self, url: &str) -> Result<HttpResponse, HttpError> {
        self.expecting::<HttpResponse>().at(url)
    }
}

/// Request whose answer must be an `R`.
#[derive(Debug)]
pub struct MockExpectingStep<R> {
    client: MockHttpClient,
    pending: PendingRequest,
    response_type: PhantomData<fn() -> R>,
}

impl<R: ResponseType> ExpectingStep<R> for MockExpectingStep<R> {
    type Success = MockSuccessStep<R>;

    fn on_success<F>(self, callback: F) -> MockSuccessStep<R>
    where
        F: FnOnce(R) + Send + 'static,
    {
        MockSuccessStep {
            client: self.client,
            pending: self.pending,
            on_success: Box::new(callback),
        }
    }

    fn at(self, url: &str) -> Result<R, HttpError> {
        let (fingerprint, headers) = self.pending.into_fingerprint(url)?;
        self.client.dispatch_typed(fingerprint, headers)
    }
}

pub struct MockSuccessStep<R> {
    client: MockHttpClient,
    pending: PendingRequest,
    on_success: OnSuccess<R>,
}

impl<R: ResponseType> SuccessStep<R> for MockSuccessStep<R> {
    type Callback = MockCallbackStep<R>;

    fn on_failure<F>(self, callback: F) -> MockCallbackStep<R>
    where
        F: FnOnce(HttpError) + Send + 'static,
    {
        MockCallbackStep {
            client: self.client,
            pending: self.pending,
            on_success: self.on_success,
            on_failure: Box::new(callback),
        }
    }
}

/// Request answered through callbacks, run before `at` returns.
pub struct MockCallbackStep<R> {
    client: MockHttpClient,
    pending: PendingRequest,
    on_success: OnSuccess<R>,
    on_failure: OnFailure,
}

impl<R: ResponseType> CallbackStep for MockCallbackStep<R> {
    fn at(self, url: &str) -> Result<(), HttpError> {
        let (fingerprint, headers) = self.pending.into_fingerprint(url)?;
        match self.client.dispatch_typed::<R>(fingerprint, headers) {
            Ok(value) => (self.on_success)(value),
            Err(err) => (self.on_failure)(err),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn test_pending_request_merges_query() {
        let mut pending = PendingRequest::new(HttpMethod::Get);
        pending.query.insert("page".to_string(), "3".to_string());
        pending.query.insert("size".to_string(), "10".to_string());

        let (fingerprint, _) = pending
            .into_fingerprint("https://api.example.com/users?page=1&sort=name#top")
            .expect("valid url");

        let expected = RequestFingerprint::parse(HttpMethod::Get, "https://api.example.com/users")
            .expect("valid url")
            .with_query_param("page", "3")
            .with_query_param("size", "10")
            .with_query_param("sort", "name");
        assert_eq!(fingerprint, expected);
        assert_eq!(fingerprint.body(), &BodyMatcher::Unset);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("not a url")]
    fn test_pending_request_rejects_bad_url(#[case] url: &str) {
        let pending = PendingRequest::new(HttpMethod::Delete);
        assert!(matches!(
            pending.into_fingerprint(url),
            Err(HttpError::InvalidArgument(_))
        ));
    }

    #[rstest]
    fn test_body_stage_sets_body() {
        let client = crate::HttpMock::begin().build();
        let step = MockMethodStep::new(client.clone())
            .post()
            .body(&json!({"b": 2, "a": 1}))
            .expect("serializable");
        assert_eq!(step.pending.body, BodyMatcher::Json(json!({"a": 1, "b": 2})));

        let step = MockMethodStep::new(client.clone())
            .put()
            .body_str("plain text")
            .expect("non-empty");
        assert_eq!(step.pending.body, BodyMatcher::Text("plain text".to_string()));

        assert!(MockMethodStep::new(client).delete().body_str("").is_err());
    }

    #[rstest]
    #[case("")]
    #[case(" ")]
    fn test_empty_header_name_rejected(#[case] name: &str) {
        let client = crate::HttpMock::begin().build();
        let result = MockMethodStep::new(client).get().using_header(name, "v");
        assert!(matches!(result, Err(HttpError::InvalidArgument(_))));
    }

    #[rstest]
    fn test_empty_query_name_rejected() {
        let client = crate::HttpMock::begin().build();
        let result = MockMethodStep::new(client).get().using_query_param("", 1);
        assert!(matches!(result, Err(HttpError::InvalidArgument(_))));
    }
}
