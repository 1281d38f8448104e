//! # Shopify Discount Codes
//!
//! A typed async client for the discount codes of Shopify price rules,
//! built on the Admin REST API.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ShopifyConfig`] and [`ShopifyConfigBuilder`]
//! - Validated newtypes for the shop domain, access token and API host
//! - An async HTTP client with retry logic and rate limit handling
//! - [`DiscountCodeService`], implemented by [`DiscountCodeClient`]: create,
//!   update, list (with cursor pagination), count, get, delete, lookup and
//!   batch creation of discount codes
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shopify_discount_codes::{
//!     DiscountCode, DiscountCodeClient, DiscountCodeService, RestClient, Session,
//! };
//!
//! let session = Session::from_parts("my-store", "shpat_123")?;
//! let client = Arc::new(RestClient::new(&session, None)?);
//! let discount_codes = DiscountCodeClient::new(client);
//!
//! let code = discount_codes
//!     .create(507328175, DiscountCode {
//!         code: Some("SUMMER20".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let count = discount_codes.count(507328175, None).await?;
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use shopify_discount_codes::{ApiVersion, ShopifyConfig};
//!
//! let config = ShopifyConfig::builder()
//!     .api_version(ApiVersion::V2025_10)
//!     .default_tries(3)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.default_tries(), 3);
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber.
//! Each resource operation logs at `debug` with its ids; retries and
//! deprecation notices log at `warn`.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All clients are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;
pub mod session;

// Re-export public types at crate root for convenience
pub use config::{AccessToken, ApiVersion, HostUrl, ShopDomain, ShopifyConfig, ShopifyConfigBuilder};
pub use error::ConfigError;
pub use session::Session;

// Re-export HTTP client types
pub use clients::{
    ApiCallLimit, DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder,
    HttpResponse, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
    ResponseDecodingError, RestClient, RestError,
};

// Re-export resource types
pub use rest::resources::{
    DiscountCode, DiscountCodeBatch, DiscountCodeClient, DiscountCodeCountOptions,
    DiscountCodeError, DiscountCodeListOptions, DiscountCodeService,
};
pub use rest::{CountOptions, LinkHeaderError, ListOptions, Pagination, ResourceError};
