//! Fixture file entries.
//!
//! A fixture file holds a list of expectations:
//!
//! ```yaml
//! - method: POST
//!   url: https://api.example.com/users   # "*" matches any url
//!   query: { page: 1 }
//!   body: any                            # none | any | {json: ..} | {text: ..}
//!   respond:
//!     json: { id: 1 }                    # or response: {..} or error: ".."
//! ```

use crate::error::MockError;
use crate::types::action::Action;
use crate::types::fingerprint::{BodyMatcher, RequestFingerprint, UrlMatcher};
use fluid_http::{HttpError, HttpMethod, HttpResponse};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Fixture url matching every url
pub const ANY_URL: &str = "*";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    pub method: HttpMethod,
    pub url: String,
    #[serde(default)]
    pub query: BTreeMap<String, Value>,
    #[serde(default, with = "serde_yaml::with::singleton_map")]
    pub body: FixtureBody,
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub respond: FixtureAction,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureBody {
    #[default]
    None,
    Any,
    Json(Value),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureAction {
    Json(Value),
    Response(HttpResponse),
    /// Fails the request with this message
    Error(String),
}

impl Fixture {
    pub fn to_expectation(&self) -> Result<(RequestFingerprint, Action), MockError> {
        let body = match &self.body {
            FixtureBody::None => BodyMatcher::NoBody,
            _ if !self.method.has_body_stage() => {
                return Err(MockError::invalid_input(format!(
                    "{} fixture for {} cannot declare a body",
                    self.method, self.url
                )))
            }
            FixtureBody::Any => BodyMatcher::AnyBody,
            FixtureBody::Json(json) => BodyMatcher::Json(json.clone()),
            FixtureBody::Text(text) => BodyMatcher::from_json_str(text)?,
        };

        let fingerprint = if self.url.trim() == ANY_URL {
            RequestFingerprint::new(self.method, UrlMatcher::Any)
        } else {
            RequestFingerprint::parse(self.method, &self.url)?
        };
        let query = self
            .query
            .iter()
            .map(|(name, value)| (name.clone(), query_value(value)));
        let fingerprint = fingerprint
            .with_query_params(query.collect())
            .with_body(body);

        let action = match &self.respond {
            FixtureAction::Json(json) => Action::ReturnJson(json.clone()),
            FixtureAction::Response(response) => Action::ReturnResponse(response.clone()),
            FixtureAction::Error(message) => Action::throw(HttpError::operation(message.clone())),
        };
        Ok((fingerprint, action))
    }
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
