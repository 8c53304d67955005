use crate::builder::Expectations;
use crate::error::MockError;
use crate::types::action::{Action, Payload};
use crate::types::fingerprint::{BodyMatcher, RequestFingerprint, UrlMatcher};
use fluid_http::{BoxError, HttpMethod, HttpResponse};
use serde::Serialize;
use serde_json::Value;
use std::any::Any;
use url::Url;

/// Body stage of POST, PUT and DELETE declarations.
#[derive(Debug)]
pub struct BodyStage {
    expectations: Expectations,
    method: HttpMethod,
}

impl BodyStage {
    pub(crate) fn new(expectations: Expectations, method: HttpMethod) -> Self {
        Self {
            expectations,
            method,
        }
    }

    fn finish(self, body: BodyMatcher) -> UrlStage {
        UrlStage::new(self.expectations, self.method, body)
    }

    pub fn no_body(self) -> UrlStage {
        self.finish(BodyMatcher::NoBody)
    }

    /// Accept whatever payload the request carries.
    pub fn any_body(self) -> UrlStage {
        self.finish(BodyMatcher::AnyBody)
    }

    pub fn body<B: Serialize + ?Sized>(self, body: &B) -> Result<UrlStage, MockError> {
        let body = BodyMatcher::from_serialize(body)?;
        Ok(self.finish(body))
    }

    pub fn body_json(self, json: Value) -> UrlStage {
        self.finish(BodyMatcher::Json(json))
    }

    /// A string that parses as JSON matches the same payload given as a value.
    pub fn body_str(self, body: &str) -> Result<UrlStage, MockError> {
        let body = BodyMatcher::from_json_str(body)?;
        Ok(self.finish(body))
    }
}

/// URL stage of a declaration.
#[derive(Debug)]
pub struct UrlStage {
    expectations: Expectations,
    method: HttpMethod,
    body: BodyMatcher,
}

impl UrlStage {
    pub(crate) fn new(expectations: Expectations, method: HttpMethod, body: BodyMatcher) -> Self {
        Self {
            expectations,
            method,
            body,
        }
    }

    fn finish(self, fingerprint: RequestFingerprint) -> ThenStage {
        ThenStage {
            expectations: self.expectations,
            fingerprint: fingerprint.with_body(self.body),
        }
    }

    pub fn at(self, url: &str) -> Result<ThenStage, MockError> {
        let fingerprint = RequestFingerprint::parse(self.method, url)?;
        Ok(self.finish(fingerprint))
    }

    pub fn at_url(self, url: Url) -> ThenStage {
        let fingerprint = RequestFingerprint::from_url(self.method, url);
        self.finish(fingerprint)
    }

    /// Match requests with this method and body whatever their URL.
    pub fn at_any_url(self) -> ThenStage {
        let fingerprint = RequestFingerprint::new(self.method, UrlMatcher::Any);
        self.finish(fingerprint)
    }
}

/// Action stage of a declaration. Every terminal registers the expectation.
#[derive(Debug)]
pub struct ThenStage {
    expectations: Expectations,
    fingerprint: RequestFingerprint,
}

impl ThenStage {
    pub fn with_query_param(self, name: impl Into<String>, value: impl ToString) -> Self {
        Self {
            fingerprint: self.fingerprint.with_query_param(name, value.to_string()),
            ..self
        }
    }

    pub fn fingerprint(&self) -> &RequestFingerprint {
        &self.fingerprint
    }

    fn then(self, action: Action) -> Expectations {
        self.expectations.publish(self.fingerprint, action);
        self.expectations
    }

    /// Run `callback` on every matching request.
    pub fn then_do<F>(self, callback: F) -> Expectations
    where
        F: Fn() -> Result<Payload, BoxError> + Send + Sync + 'static,
    {
        self.then(Action::run(callback))
    }

    pub fn then_throw<E>(self, err: E) -> Expectations
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.then(Action::throw(err))
    }

    /// Answer with `value` itself. Callers must ask for exactly this type.
    pub fn then_return_pojo<T: Any + Send + Sync>(self, value: T) -> Expectations {
        self.then(Action::return_value(value))
    }

    /// Answer with the JSON form of `value`.
    pub fn then_return_pojo_as_json<T: Serialize + ?Sized>(
        self,
        value: &T,
    ) -> Result<Expectations, MockError> {
        let json = serde_json::to_value(value)
            .map_err(|e| MockError::invalid_input(format!("value cannot be serialized: {e}")))?;
        Ok(self.then(Action::ReturnJson(json)))
    }

    pub fn then_return_json(self, json: Value) -> Expectations {
        self.then(Action::ReturnJson(json))
    }

    pub fn then_return_response(self, response: HttpResponse) -> Expectations {
        self.then(Action::ReturnResponse(response))
    }
}
