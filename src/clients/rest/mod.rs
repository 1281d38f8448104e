//! REST API client for the Shopify Admin API.
//!
//! [`RestClient`] wraps [`HttpClient`](crate::clients::HttpClient) with
//! `get`/`post`/`put`/`delete` helpers, the `/admin/api/{version}` base path,
//! and path normalization:
//!
//! - Leading slashes are stripped: `/price_rules` -> `price_rules.json`
//! - A trailing `.json` is stripped and re-added exactly once
//! - A path that is empty after stripping is rejected
//!
//! The number of attempts for 429 and 500 responses comes from
//! [`ShopifyConfig::default_tries`](crate::ShopifyConfig::default_tries).

mod client;
mod errors;

pub use client::RestClient;
pub use errors::RestError;
