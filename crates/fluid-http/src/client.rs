use crate::steps::MethodStep;
use std::collections::BTreeMap;

/// Entry point of the client contract.
pub trait HttpClient: Send + Sync {
    type Steps: MethodStep;

    /// Headers added to every request made through this client.
    fn default_headers(&self) -> &BTreeMap<String, String>;

    fn using_default_header(self, key: &str, value: &str) -> Self
    where
        Self: Sized;

    /// Begin a new request.
    fn go(&self) -> Self::Steps;
}
