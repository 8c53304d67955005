pub mod client;
pub mod engine;
pub mod record;
pub mod registry;
pub mod steps;
pub mod verify;

pub use client::MockHttpClient;
pub use engine::MatchEngine;
pub use record::{DispatchRecord, Headers, RecordedRequest};
pub use registry::ActionRegistry;
pub use steps::{
    MockBodyStep, MockCallbackStep, MockExpectingStep, MockMethodStep, MockRequestStep,
    MockSuccessStep,
};
