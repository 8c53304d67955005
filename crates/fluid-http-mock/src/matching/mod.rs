//! Request matching rules.
//!
//! The same rules decide which expectation answers a dispatched request and
//! whether an expectation counts as satisfied during verification.

mod body;
mod query;
mod request;
mod url;

pub use body::body_matches;
pub use query::{parse_query_string, query_matches};
pub use request::requests_match;
pub use self::url::url_matches;
