//! Step-builder HTTP client contract.
//!
//! A request is assembled one stage at a time:
//!
//! ```text
//! client.go()            MethodStep
//!   .post()              BodyStep      (GET skips this stage)
//!   .body(&payload)?     RequestStep   (headers, query params)
//!   .expecting::<T>()    ExpectingStep (typed responses)
//!   .at(url)?            -> T
//! ```
//!
//! Code written against [`HttpClient`] works with any implementation,
//! including the test double in `fluid-http-mock`.

pub mod client;
pub mod error;
pub mod method;
pub mod response;
pub mod steps;

pub use client::HttpClient;
pub use error::{BoxError, HttpError, SharedError};
pub use method::HttpMethod;
pub use response::HttpResponse;
pub use steps::{
    BodyStep, CallbackStep, ExpectingStep, MethodStep, OnFailure, OnSuccess, RequestStep,
    ResponseType, SuccessStep,
};
