//! Stages of the request builder.
//!
//! Every stage consumes itself and returns the next one, so a request can only
//! be assembled in order: method, body (not for GET), decorations, then one of
//! the terminal `at` calls.

use crate::error::HttpError;
use crate::response::HttpResponse;
use serde::Serialize;
use serde_json::Value;
use std::any::Any;

/// Types a request can be decoded into with [`RequestStep::expecting`].
pub trait ResponseType: Any + Clone + Send + 'static {}

impl<T: Any + Clone + Send + 'static> ResponseType for T {}

pub type OnSuccess<R> = Box<dyn FnOnce(R) + Send>;
pub type OnFailure = Box<dyn FnOnce(HttpError) + Send>;

/// First stage: choose the HTTP method.
pub trait MethodStep: Sized {
    type Body: BodyStep<Request = Self::Request>;
    type Request: RequestStep;

    fn get(self) -> Self::Request;

    fn post(self) -> Self::Body;

    fn put(self) -> Self::Body;

    fn delete(self) -> Self::Body;
}

/// Body stage for POST, PUT and DELETE.
pub trait BodyStep: Sized {
    type Request: RequestStep;

    fn no_body(self) -> Self::Request;

    /// Serialize `body` as the JSON payload.
    fn body<B: Serialize + ?Sized>(self, body: &B) -> Result<Self::Request, HttpError>;

    fn body_json(self, json: Value) -> Self::Request;

    /// Send a pre-serialized payload. Must not be empty.
    fn body_str(self, json: &str) -> Result<Self::Request, HttpError>;
}

/// Decorations and terminals of a request with an untyped response.
pub trait RequestStep: Sized {
    type Expecting<R: ResponseType>: ExpectingStep<R>;
    type Success: SuccessStep<HttpResponse>;

    fn using_header(self, key: &str, value: &str) -> Result<Self, HttpError>;

    fn using_query_param<V: ToString>(self, name: &str, value: V) -> Result<Self, HttpError>;

    /// Set the `Accept` header to `media_type` followed by `others`.
    fn accept(self, media_type: &str, others: &[&str]) -> Result<Self, HttpError> {
        let header = std::iter::once(media_type)
            .chain(others.iter().copied())
            .collect::<Vec<_>>()
            .join(", ");
        self.using_header("Accept", &header)
    }

    fn expecting<R: ResponseType>(self) -> Self::Expecting<R>;

    fn on_success<F>(self, callback: F) -> Self::Success
    where
        F: FnOnce(HttpResponse) + Send + 'static;

    fn at(self, url: &str) -> Result<HttpResponse, HttpError>;
}

/// Terminals of a request whose response is decoded into `R`.
pub trait ExpectingStep<R: ResponseType>: Sized {
    type Success: SuccessStep<R>;

    fn on_success<F>(self, callback: F) -> Self::Success
    where
        F: FnOnce(R) + Send + 'static;

    fn at(self, url: &str) -> Result<R, HttpError>;
}

/// Registers the failure callback after a success callback.
pub trait SuccessStep<R>: Sized {
    type Callback: CallbackStep;

    fn on_failure<F>(self, callback: F) -> Self::Callback
    where
        F: FnOnce(HttpError) + Send + 'static;
}

/// Callback-mode terminal.
///
/// The outcome of the request goes to the registered callbacks; `at` only
/// fails for arguments it cannot use (such as a malformed URL).
pub trait CallbackStep: Sized {
    fn at(self, url: &str) -> Result<(), HttpError>;
}
