//! HTTP transport for the Shopify Admin API.
//!
//! - [`HttpClient`]: authenticated async HTTP client with retry handling
//! - [`HttpRequest`] / [`HttpRequestBuilder`]: a request to send
//! - [`HttpResponse`]: a parsed response with rate-limit metadata
//! - [`rest::RestClient`]: versioned REST client built on [`HttpClient`]
//! - [`HttpError`], [`rest::RestError`]: transport error types
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: retried after `Retry-After`, or 1 second
//! - **500 (Server Error)**: retried after 1 second
//! - **Other non-2xx**: returned immediately
//!
//! The default is a single attempt; raise it with
//! [`ShopifyConfigBuilder::default_tries`](crate::config::ShopifyConfigBuilder::default_tries).

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
    ResponseDecodingError,
};
pub use http_client::{HttpClient, RETRY_WAIT_TIME, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{ApiCallLimit, HttpResponse};

pub use rest::{RestClient, RestError};
