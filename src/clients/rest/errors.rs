//! REST client error types.

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for [`RestClient`](crate::clients::RestClient) calls.
///
/// ```rust
/// use shopify_discount_codes::clients::rest::RestError;
///
/// let error = RestError::InvalidPath { path: "/.json".to_string() };
/// assert_eq!(error.to_string(), "Invalid REST API path: /.json");
/// ```
#[derive(Debug, Error)]
pub enum RestError {
    /// The path is empty once slashes and the `.json` suffix are removed.
    #[error("Invalid REST API path: {path}")]
    InvalidPath {
        /// The path as it was provided.
        path: String,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}
