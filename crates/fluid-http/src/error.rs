//! Error type shared by every client implementation.

use crate::response::HttpResponse;
use std::error::Error as StdError;
use std::sync::Arc;
use thiserror::Error;

pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;
pub type SharedError = Arc<dyn StdError + Send + Sync + 'static>;

/// Standard error of the client contract.
///
/// Errors raised anywhere below the client (serialization, transport, user
/// callbacks) are wrapped into [`HttpError::Operation`] with the original
/// error kept as the source. An error that already is an `HttpError` is never
/// wrapped twice.
#[derive(Debug, Clone, Error)]
pub enum HttpError {
    /// The caller passed an argument the client cannot use
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The request could not be completed
    #[error("{message}")]
    Operation {
        message: String,
        #[source]
        source: Option<SharedError>,
    },
    /// The server answered with a failure status
    #[error("request failed with status {}", .response.status)]
    Status { response: HttpResponse },
}

impl HttpError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        HttpError::InvalidArgument(message.into())
    }

    pub fn operation(message: impl Into<String>) -> Self {
        HttpError::Operation {
            message: message.into(),
            source: None,
        }
    }

    pub fn wrap<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::from_boxed(Box::new(err))
    }

    pub fn from_boxed(err: BoxError) -> Self {
        match err.downcast::<HttpError>() {
            Ok(http) => *http,
            Err(other) => HttpError::Operation {
                message: other.to_string(),
                source: Some(Arc::from(other)),
            },
        }
    }

    pub fn from_shared(err: SharedError) -> Self {
        if let Some(http) = err.downcast_ref::<HttpError>() {
            return http.clone();
        }
        HttpError::Operation {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Downcast the wrapped source of an [`HttpError::Operation`].
    pub fn source_as<E: StdError + 'static>(&self) -> Option<&E> {
        match self {
            HttpError::Operation {
                source: Some(source),
                ..
            } => (**source).downcast_ref::<E>(),
            _ => None,
        }
    }
}
