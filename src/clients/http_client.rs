//! Authenticated HTTP transport with retry handling.

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::errors::{
    HttpError, HttpResponseError, MaxHttpRetriesExceededError, ResponseDecodingError,
};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::ShopifyConfig;
use crate::session::Session;

/// Fixed retry wait time in seconds when no `Retry-After` applies.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client bound to one shop.
///
/// Every request carries the session's access token, a `User-Agent`, and
/// `Accept: application/json`. Responses with status 429 or 500 are retried
/// up to the request's `tries`; all other non-2xx statuses fail immediately.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`; share it behind an `Arc`.
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_uri: String,
    base_path: String,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a client for `session`, addressing paths under `base_path`.
    ///
    /// Requests go to `https://{shop}` unless the configuration sets an
    /// `api_host`, in which case they go there and the shop domain is sent
    /// in the `Host` header.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the TLS backend cannot be
    /// initialized.
    pub fn new(
        base_path: impl Into<String>,
        session: &Session,
        config: Option<&ShopifyConfig>,
    ) -> Result<Self, HttpError> {
        let api_host = config.and_then(ShopifyConfig::api_host);
        let base_uri = api_host.map_or_else(
            || format!("https://{}", session.shop),
            |host| host.as_ref().to_string(),
        );

        let user_agent_prefix = config
            .and_then(ShopifyConfig::user_agent_prefix)
            .map_or_else(String::new, |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Shopify Discount Codes Library v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "X-Shopify-Access-Token".to_string(),
            session.access_token.as_ref().to_string(),
        );
        if api_host.is_some() {
            default_headers.insert("Host".to_string(), session.shop.to_string());
        }

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_uri,
            base_path: base_path.into(),
            default_headers,
        })
    }

    /// Returns the base URI (scheme, host and optional port).
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path, e.g. `/admin/api/2025-10`.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the full URL for a path relative to the base path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}/{}", self.base_uri, self.base_path, path)
    }

    /// Sends a request, retrying 429 and 500 responses up to `request.tries`.
    ///
    /// # Errors
    ///
    /// - [`HttpError::InvalidRequest`] if the request fails validation
    /// - [`HttpError::Network`] if the connection fails
    /// - [`HttpError::Response`] for a non-2xx status
    /// - [`HttpError::MaxRetries`] when retries are exhausted
    /// - [`HttpError::Decode`] when a 2xx body is not JSON
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.url_for(&request.path);

        let mut headers = self.default_headers.clone();
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "Content-Type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }
        if let Some(extra) = &request.extra_headers {
            headers.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let mut req_builder = match request.http_method {
                HttpMethod::Get => self.client.get(&url),
                HttpMethod::Post => self.client.post(&url),
                HttpMethod::Put => self.client.put(&url),
                HttpMethod::Delete => self.client.delete(&url),
            };
            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }
            if let Some(query) = &request.query {
                req_builder = req_builder.query(query);
            }
            if let Some(body) = &request.body {
                req_builder = req_builder.body(body.to_string());
            }

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await?;
            let body = Self::parse_body(code, body_text)?;

            let response = HttpResponse::new(code, res_headers, body);

            if let Some(reason) = response.deprecation_reason() {
                tracing::warn!(
                    "Deprecated request to Shopify API at {}, received reason: {}",
                    request.path,
                    reason
                );
            }

            if response.is_ok() {
                return Ok(response);
            }

            let message = Self::serialize_error(&response);
            let error_reference = response.request_id().map(String::from);

            let retryable = code == 429 || code == 500;
            if !retryable || request.tries <= 1 {
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message,
                    error_reference,
                }));
            }
            if tries >= request.tries {
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: request.tries,
                    message,
                    error_reference,
                }));
            }

            let delay = Self::calculate_retry_delay(&response, code);
            tracing::debug!(
                "Retrying {} {} after status {} (attempt {} of {}), waiting {:?}",
                request.http_method,
                request.path,
                code,
                tries,
                request.tries,
                delay
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Parses a response body.
    ///
    /// An empty body becomes `{}`. A malformed body fails for 2xx statuses
    /// and is wrapped as `{"errors": "<raw>"}` otherwise, so the status error
    /// still carries it.
    fn parse_body(code: u16, body_text: String) -> Result<serde_json::Value, HttpError> {
        if body_text.trim().is_empty() {
            return Ok(serde_json::json!({}));
        }
        match serde_json::from_str(&body_text) {
            Ok(body) => Ok(body),
            Err(e) if (200..=299).contains(&code) => {
                Err(HttpError::Decode(ResponseDecodingError {
                    code,
                    message: e.to_string(),
                    body: body_text,
                }))
            }
            Err(_) => Ok(serde_json::json!({ "errors": body_text })),
        }
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            result
                .entry(name.as_str().to_lowercase())
                .or_default()
                .push(value);
        }
        result
    }

    // 429 honors Retry-After; 500 always waits the fixed delay.
    fn calculate_retry_delay(response: &HttpResponse, status: u16) -> Duration {
        if status == 429 {
            if let Some(retry_after) = response.retry_request_after {
                if let Ok(delay) = Duration::try_from_secs_f64(retry_after) {
                    return delay;
                }
            }
        }
        Duration::from_secs(RETRY_WAIT_TIME)
    }

    fn serialize_error(response: &HttpResponse) -> String {
        let mut error_body = serde_json::Map::new();

        for key in ["errors", "error"] {
            if let Some(value) = response.body.get(key) {
                error_body.insert(key.to_string(), value.clone());
            }
        }
        if response.body.get("error").is_some() {
            if let Some(desc) = response.body.get("error_description") {
                error_body.insert("error_description".to_string(), desc.clone());
            }
        }
        if let Some(request_id) = response.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        serde_json::Value::Object(error_body).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HostUrl;
    use serde_json::json;

    fn create_test_session() -> Session {
        Session::from_parts("test-shop", "test-access-token").unwrap()
    }

    #[test]
    fn test_client_targets_shop_domain_by_default() {
        let session = create_test_session();
        let client = HttpClient::new("/admin/api/2025-10", &session, None).unwrap();

        assert_eq!(client.base_uri(), "https://test-shop.myshopify.com");
        assert_eq!(client.base_path(), "/admin/api/2025-10");
        assert_eq!(
            client.url_for("price_rules/1/discount_codes.json"),
            "https://test-shop.myshopify.com/admin/api/2025-10/price_rules/1/discount_codes.json"
        );
        assert!(client.default_headers().get("Host").is_none());
    }

    #[test]
    fn test_api_host_overrides_base_uri_and_sets_host_header() {
        let session = create_test_session();
        let config = ShopifyConfig::builder()
            .api_host(HostUrl::new("http://127.0.0.1:4010").unwrap())
            .build()
            .unwrap();
        let client = HttpClient::new("/admin/api/2025-10", &session, Some(&config)).unwrap();

        assert_eq!(client.base_uri(), "http://127.0.0.1:4010");
        assert_eq!(
            client.default_headers().get("Host").map(String::as_str),
            Some("test-shop.myshopify.com")
        );
    }

    #[test]
    fn test_default_headers() {
        let session = create_test_session();
        let client = HttpClient::new("/admin/api/2025-10", &session, None).unwrap();
        let headers = client.default_headers();

        assert_eq!(
            headers.get("X-Shopify-Access-Token").map(String::as_str),
            Some("test-access-token")
        );
        assert_eq!(
            headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
        let user_agent = headers.get("User-Agent").unwrap();
        assert!(user_agent.starts_with("Shopify Discount Codes Library v"));
        assert!(user_agent.contains("| Rust "));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let session = create_test_session();
        let config = ShopifyConfig::builder()
            .user_agent_prefix("PromoSync/2.1")
            .build()
            .unwrap();
        let client = HttpClient::new("/admin/api/2025-10", &session, Some(&config)).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("PromoSync/2.1 | Shopify Discount Codes Library"));
    }

    #[test]
    fn test_parse_body_handles_empty_and_malformed_bodies() {
        assert_eq!(HttpClient::parse_body(204, String::new()).unwrap(), json!({}));
        assert_eq!(
            HttpClient::parse_body(502, "Bad Gateway".to_string()).unwrap(),
            json!({"errors": "Bad Gateway"})
        );
        assert!(matches!(
            HttpClient::parse_body(200, "{not json".to_string()),
            Err(HttpError::Decode(ResponseDecodingError { code: 200, .. }))
        ));
    }

    #[test]
    fn test_retry_delay_uses_retry_after_for_429_only() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["2.5".to_string()]);
        let response = HttpResponse::new(429, headers.clone(), json!({}));
        assert_eq!(
            HttpClient::calculate_retry_delay(&response, 429),
            Duration::from_millis(2500)
        );

        let response = HttpResponse::new(500, headers, json!({}));
        assert_eq!(
            HttpClient::calculate_retry_delay(&response, 500),
            Duration::from_secs(RETRY_WAIT_TIME)
        );
    }

    #[test]
    fn test_retry_delay_falls_back_for_unrepresentable_retry_after() {
        for value in ["1e30", "-3", "NaN"] {
            let mut headers = HashMap::new();
            headers.insert("retry-after".to_string(), vec![value.to_string()]);
            let response = HttpResponse::new(429, headers, json!({}));
            assert_eq!(
                HttpClient::calculate_retry_delay(&response, 429),
                Duration::from_secs(RETRY_WAIT_TIME),
                "Retry-After: {value}"
            );
        }
    }

    #[test]
    fn test_parse_response_headers_keeps_non_utf8_values() {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::LINK,
            reqwest::header::HeaderValue::from_bytes(b"<https://a.test/\xff>; rel=\"next\"").unwrap(),
        );

        let parsed = HttpClient::parse_response_headers(&headers);

        let link = &parsed["link"][0];
        assert!(link.starts_with("<https://a.test/"));
        assert!(link.contains('\u{FFFD}'));
        assert!(crate::rest::Pagination::from_link_header(Some(link.as_str())).is_err());
    }

    #[test]
    fn test_serialize_error_collects_error_fields_and_reference() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["req-9".to_string()]);
        let response = HttpResponse::new(
            422,
            headers,
            json!({"errors": {"code": ["must be unique"]}, "ignored": true}),
        );

        let message: serde_json::Value =
            serde_json::from_str(&HttpClient::serialize_error(&response)).unwrap();
        assert_eq!(message["errors"]["code"][0], "must be unique");
        assert!(message.get("ignored").is_none());
        assert!(message["error_reference"]
            .as_str()
            .unwrap()
            .contains("req-9"));
    }
}
