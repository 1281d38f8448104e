//! Error type for resource operations.
//!
//! [`ResourceError`] is what every resource call returns. Status errors are
//! not reinterpreted: a 404 stays an [`HttpError::Response`] with
//! `code == 404`, reachable through [`ResourceError::status`] and
//! [`ResourceError::is_not_found`].
//!
//! ```rust,ignore
//! match discount_codes.get(507328175, 1054381139).await {
//!     Ok(code) => println!("{:?}", code.code),
//!     Err(e) if e.is_not_found() => println!("already deleted"),
//!     Err(ResourceError::Pagination(e)) => println!("bad Link header: {e}"),
//!     Err(e) => println!("request {:?} failed: {e}", e.request_id()),
//! }
//! ```

use crate::clients::{HttpError, RestError};
use crate::rest::pagination::LinkHeaderError;
use thiserror::Error;

/// Error type for resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Transport failure, non-2xx status, retry exhaustion, or a body that
    /// was not JSON.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The REST client rejected the request path.
    #[error(transparent)]
    Rest(RestError),

    /// The response was JSON but did not have the expected shape.
    #[error("Failed to decode {resource} response: {message}")]
    Decode {
        /// The resource being decoded.
        resource: &'static str,
        /// What was wrong with the body.
        message: String,
        /// The `X-Request-Id` of the response.
        request_id: Option<String>,
    },

    /// The `Link` response header could not be parsed.
    #[error(transparent)]
    Pagination(#[from] LinkHeaderError),

    /// The operation needs an identifier the value does not carry.
    #[error("Cannot {operation} {resource} without an id")]
    MissingId {
        /// The resource type.
        resource: &'static str,
        /// The attempted operation.
        operation: &'static str,
    },

    /// Query options could not be flattened into query parameters.
    #[error("Invalid query options: {message}")]
    InvalidOptions {
        /// Why the options were rejected.
        message: String,
    },
}

impl From<RestError> for ResourceError {
    fn from(error: RestError) -> Self {
        match error {
            RestError::Http(e) => Self::Http(e),
            other => Self::Rest(other),
        }
    }
}

impl ResourceError {
    /// Returns the HTTP status the API answered with, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Returns `true` if the API answered 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }

    /// Returns the `X-Request-Id` of the failed response, if known.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Http(HttpError::Response(e)) => e.error_reference.as_deref(),
            Self::Http(HttpError::MaxRetries(e)) => e.error_reference.as_deref(),
            Self::Decode { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
