//! REST client for the Shopify Admin API.

use std::collections::HashMap;

use crate::clients::rest::RestError;
use crate::clients::{DataType, HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::config::{ApiVersion, ShopifyConfig};
use crate::session::Session;

/// REST client addressing `/admin/api/{version}` on one shop.
///
/// Resource clients such as
/// [`DiscountCodeClient`](crate::rest::resources::DiscountCodeClient) hold an
/// `Arc<RestClient>` and issue their requests through it.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_discount_codes::{RestClient, Session};
///
/// let session = Session::from_parts("my-store", "shpat_123")?;
/// let client = RestClient::new(&session, None)?;
///
/// let response = client.get("price_rules/507328175/discount_codes", None).await?;
/// println!("{}", response.body);
/// ```
#[derive(Debug)]
pub struct RestClient {
    http_client: HttpClient,
    api_version: ApiVersion,
    default_tries: u32,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a REST client using the configured API version, or the
    /// latest stable version without a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the HTTP client cannot be created.
    pub fn new(session: &Session, config: Option<&ShopifyConfig>) -> Result<Self, RestError> {
        let api_version = config.map_or_else(ApiVersion::latest, |c| c.api_version().clone());
        Self::create_client(session, config, api_version)
    }

    /// Creates a REST client that addresses `version` regardless of the
    /// configured API version.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the HTTP client cannot be created.
    pub fn with_version(
        session: &Session,
        config: Option<&ShopifyConfig>,
        version: ApiVersion,
    ) -> Result<Self, RestError> {
        if let Some(cfg_version) = config.map(ShopifyConfig::api_version) {
            if &version == cfg_version {
                tracing::debug!(
                    "Rest client has a redundant API version override to the default {}",
                    cfg_version
                );
            } else {
                tracing::debug!(
                    "Rest client overriding default API version {} with {}",
                    cfg_version,
                    version
                );
            }
        }

        Self::create_client(session, config, version)
    }

    fn create_client(
        session: &Session,
        config: Option<&ShopifyConfig>,
        api_version: ApiVersion,
    ) -> Result<Self, RestError> {
        tracing::warn!(
            "The REST Admin API is a legacy API. Consider migrating to GraphQL. See: https://www.shopify.com/ca/partners/blog/all-in-on-graphql"
        );

        let base_path = format!("/admin/api/{api_version}");
        let http_client = HttpClient::new(base_path, session, config)?;
        let default_tries = config.map_or(1, ShopifyConfig::default_tries);

        Ok(Self {
            http_client,
            api_version,
            default_tries,
        })
    }

    /// Returns the API version being used by this client.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] for an empty path and
    /// [`RestError::Http`] for transport and status errors.
    pub async fn get(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Get, path, None, query).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] for an empty path and
    /// [`RestError::Http`] for transport and status errors.
    pub async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Post, path, Some(body), query)
            .await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] for an empty path and
    /// [`RestError::Http`] for transport and status errors.
    pub async fn put(
        &self,
        path: &str,
        body: serde_json::Value,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Put, path, Some(body), query)
            .await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] for an empty path and
    /// [`RestError::Http`] for transport and status errors.
    pub async fn delete(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Delete, path, None, query)
            .await
    }

    async fn make_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        let normalized_path = normalize_path(path)?;

        let mut builder = HttpRequest::builder(method, normalized_path).tries(self.default_tries);
        if let Some(body_value) = body {
            builder = builder.body(body_value).body_type(DataType::Json);
        }
        if let Some(query_params) = query.filter(|q| !q.is_empty()) {
            builder = builder.query(query_params);
        }

        let request = builder.build().map_err(|e| RestError::Http(e.into()))?;
        self.http_client.request(request).await.map_err(Into::into)
    }
}

/// Strips leading slashes and any `.json` suffix, then appends `.json`.
///
/// ```rust,ignore
/// assert_eq!(normalize_path("/price_rules/1/discount_codes")?, "price_rules/1/discount_codes.json");
/// assert_eq!(normalize_path("price_rules/1/discount_codes.json")?, "price_rules/1/discount_codes.json");
/// ```
fn normalize_path(path: &str) -> Result<String, RestError> {
    let trimmed = path.trim_start_matches('/');
    let trimmed = trimmed.strip_suffix(".json").unwrap_or(trimmed);

    if trimmed.is_empty() {
        return Err(RestError::InvalidPath {
            path: path.to_string(),
        });
    }

    Ok(format!("{trimmed}.json"))
}
