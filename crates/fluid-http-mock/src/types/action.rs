//! Actions performed when an expected request is dispatched.

use crate::error::MockError;
use fluid_http::{BoxError, HttpError, HttpResponse, ResponseType, SharedError};
use serde_json::Value;
use std::any::{self, Any};
use std::fmt;
use std::sync::Arc;

/// User callback registered with `then_do`.
pub type ActionFn = dyn Fn() -> Result<Payload, BoxError> + Send + Sync;

/// Arbitrary value returned as is to a typed request.
#[derive(Clone)]
pub struct ObjectPayload {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl ObjectPayload {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            type_name: any::type_name::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for ObjectPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectPayload").field(&self.type_name).finish()
    }
}

/// Value produced by executing an action.
#[derive(Debug, Clone)]
pub enum Payload {
    Object(ObjectPayload),
    Json(Value),
    Response(HttpResponse),
}

impl Payload {
    pub fn object<T: Any + Send + Sync>(value: T) -> Self {
        Payload::Object(ObjectPayload::new(value))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Payload::Object(object) => object.type_name,
            Payload::Json(_) => any::type_name::<Value>(),
            Payload::Response(_) => any::type_name::<HttpResponse>(),
        }
    }

    /// Take the payload as `R`, which must be exactly its runtime type.
    pub fn into_typed<R: ResponseType>(self) -> Result<R, MockError> {
        let actual = self.type_name();
        let typed = match self {
            Payload::Object(object) => object.value.downcast_ref::<R>().cloned(),
            Payload::Json(json) => downcast_owned(json),
            Payload::Response(response) => downcast_owned(response),
        };
        typed.ok_or(MockError::WrongResponseType {
            expected: any::type_name::<R>(),
            actual,
        })
    }
}

fn downcast_owned<S: Any, R: Any>(value: S) -> Option<R> {
    let boxed: Box<dyn Any> = Box::new(value);
    boxed.downcast::<R>().ok().map(|typed| *typed)
}

/// What to do when a request matches an expectation.
#[derive(Clone)]
pub enum Action {
    ReturnValue(ObjectPayload),
    ReturnJson(Value),
    ReturnResponse(HttpResponse),
    Throw(SharedError),
    RunCallback(Arc<ActionFn>),
}

impl Action {
    pub fn return_value<T: Any + Send + Sync>(value: T) -> Self {
        Action::ReturnValue(ObjectPayload::new(value))
    }

    pub fn throw<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Action::Throw(Arc::new(err))
    }

    pub fn run<F>(callback: F) -> Self
    where
        F: Fn() -> Result<Payload, BoxError> + Send + Sync + 'static,
    {
        Action::RunCallback(Arc::new(callback))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Action::ReturnValue(_) => "return value",
            Action::ReturnJson(_) => "return json",
            Action::ReturnResponse(_) => "return response",
            Action::Throw(_) => "throw",
            Action::RunCallback(_) => "run callback",
        }
    }

    /// Run the action.
    ///
    /// Errors that already are [`HttpError`]s come back unchanged, anything
    /// else is wrapped into [`HttpError::Operation`].
    pub fn execute(&self) -> Result<Payload, HttpError> {
        match self {
            Action::ReturnValue(object) => Ok(Payload::Object(object.clone())),
            Action::ReturnJson(json) => Ok(Payload::Json(json.clone())),
            Action::ReturnResponse(response) => Ok(Payload::Response(response.clone())),
            Action::Throw(err) => Err(HttpError::from_shared(Arc::clone(err))),
            Action::RunCallback(callback) => callback().map_err(HttpError::from_boxed),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::ReturnValue(object) => f.debug_tuple("ReturnValue").field(object).finish(),
            Action::ReturnJson(json) => f.debug_tuple("ReturnJson").field(json).finish(),
            Action::ReturnResponse(response) => {
                f.debug_tuple("ReturnResponse").field(response).finish()
            }
            Action::Throw(err) => f.debug_tuple("Throw").field(&err.to_string()).finish(),
            Action::RunCallback(_) => f.write_str("RunCallback(..)"),
        }
    }
}
