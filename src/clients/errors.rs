//! Transport error types.
//!
//! - [`HttpResponseError`]: the API answered with a non-2xx status
//! - [`MaxHttpRetriesExceededError`]: every configured attempt was answered
//!   with 429 or 500
//! - [`InvalidHttpRequestError`]: the request failed validation before sending
//! - [`ResponseDecodingError`]: a 2xx response body was not JSON
//! - [`HttpError`]: the union of the above plus network failures
//!
//! ```rust,ignore
//! match client.request(request).await {
//!     Ok(response) => println!("{}", response.body),
//!     Err(HttpError::Response(e)) if e.code == 404 => println!("gone"),
//!     Err(HttpError::Network(e)) => println!("network: {e}"),
//!     Err(e) => println!("other: {e}"),
//! }
//! ```

use thiserror::Error;

/// A non-2xx response from the API.
///
/// `message` is a compact JSON document holding whichever of `errors`,
/// `error`, `error_description` the response body carried, plus an
/// `error_reference` naming the `X-Request-Id`.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error message in JSON format.
    pub message: String,
    /// The `X-Request-Id` of the failed request.
    pub error_reference: Option<String>,
}

/// Every attempt of a retried request was answered with 429 or 500.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of attempts made.
    pub tries: u32,
    /// Serialized error message from the last response.
    pub message: String,
    /// The `X-Request-Id` of the last attempt.
    pub error_reference: Option<String>,
}

/// A request rejected before it was sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// A successful response whose body could not be parsed as JSON.
#[derive(Debug, Error)]
#[error("Could not decode response body (status {code}): {message}")]
pub struct ResponseDecodingError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The parser's description of the problem.
    pub message: String,
    /// The raw body as received.
    pub body: String,
}

/// Unified error type for the transport layer.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// The response body was not valid JSON.
    #[error(transparent)]
    Decode(#[from] ResponseDecodingError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status the remote answered with, if a response was
    /// received at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            Self::Decode(e) => Some(e.code),
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_error_displays_message() {
        let error = HttpResponseError {
            code: 404,
            message: r#"{"errors":"Not Found"}"#.to_string(),
            error_reference: None,
        };
        assert_eq!(error.to_string(), r#"{"errors":"Not Found"}"#);
    }

    #[test]
    fn test_max_retries_error_includes_retry_count() {
        let error = MaxHttpRetriesExceededError {
            code: 429,
            tries: 3,
            message: r#"{"errors":"Exceeded 2 calls per second"}"#.to_string(),
            error_reference: None,
        };
        let message = error.to_string();
        assert!(message.contains("Exceeded maximum retry count of 3"));
        assert!(message.contains("Exceeded 2 calls per second"));
    }

    #[test]
    fn test_invalid_request_error_messages() {
        let missing_body = InvalidHttpRequestError::MissingBody {
            method: "put".to_string(),
        };
        assert_eq!(
            missing_body.to_string(),
            "Cannot use put without specifying data."
        );
        assert_eq!(
            InvalidHttpRequestError::MissingBodyType.to_string(),
            "Cannot set a body without also setting body_type."
        );
    }

    #[test]
    fn test_status_is_reported_for_received_responses() {
        let response = HttpError::Response(HttpResponseError {
            code: 422,
            message: String::new(),
            error_reference: None,
        });
        assert_eq!(response.status(), Some(422));

        let decode = HttpError::Decode(ResponseDecodingError {
            code: 200,
            message: "expected value".to_string(),
            body: "<html>".to_string(),
        });
        assert_eq!(decode.status(), Some(200));

        let invalid = HttpError::InvalidRequest(InvalidHttpRequestError::MissingBodyType);
        assert_eq!(invalid.status(), None);
    }
}
