//! Parsed HTTP responses.

use std::collections::HashMap;

/// Rate limit state from the `X-Shopify-Shop-Api-Call-Limit` header.
///
/// The header reads `used/bucket`, e.g. `32/40`.
///
/// ```rust
/// use shopify_discount_codes::clients::ApiCallLimit;
///
/// let limit = ApiCallLimit::parse("32/40").unwrap();
/// assert_eq!(limit.remaining(), 8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApiCallLimit {
    /// Calls currently counted against the bucket.
    pub request_count: u32,
    /// Size of the leaky bucket.
    pub bucket_size: u32,
}

impl ApiCallLimit {
    /// Parses a `used/bucket` header value.
    #[must_use]
    pub fn parse(header_value: &str) -> Option<Self> {
        let (used, bucket) = header_value.trim().split_once('/')?;
        Some(Self {
            request_count: used.parse().ok()?,
            bucket_size: bucket.parse().ok()?,
        })
    }

    /// Calls left before the bucket is full.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.bucket_size.saturating_sub(self.request_count)
    }
}

/// A response from the API.
///
/// Header names are stored lowercase; a header may repeat.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body; `{}` when the body was empty.
    pub body: serde_json::Value,
    /// Rate limit information.
    pub api_call_limit: Option<ApiCallLimit>,
    /// Seconds to wait before retrying, from `Retry-After`.
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a response and parses the rate-limit and retry headers.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let first = |name: &str| headers.get(name).and_then(|values| values.first());

        let api_call_limit = first("x-shopify-shop-api-call-limit")
            .and_then(|value| ApiCallLimit::parse(value));
        let retry_request_after =
            first("retry-after").and_then(|value| value.trim().parse::<f64>().ok());

        Self {
            code,
            headers,
            body,
            api_call_limit,
            retry_request_after,
        }
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of the named header. `name` must be lowercase.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `Link` header, joining repeated headers with `, `.
    #[must_use]
    pub fn link_header(&self) -> Option<String> {
        self.headers
            .get("link")
            .filter(|values| !values.is_empty())
            .map(|values| values.join(", "))
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns the `X-Shopify-API-Deprecated-Reason` header value, if present.
    #[must_use]
    pub fn deprecation_reason(&self) -> Option<&str> {
        self.header("x-shopify-api-deprecated-reason")
    }
}
