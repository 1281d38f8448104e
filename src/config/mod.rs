//! Client configuration.
//!
//! - [`ShopifyConfig`]: settings shared by every request a client makes
//! - [`ShopifyConfigBuilder`]: builder for [`ShopifyConfig`]
//! - [`ShopDomain`], [`AccessToken`], [`HostUrl`]: validated newtypes
//! - [`ApiVersion`]: the Admin API version to address
//!
//! # Example
//!
//! ```rust
//! use shopify_discount_codes::{ApiVersion, HostUrl, ShopifyConfig};
//!
//! let config = ShopifyConfig::builder()
//!     .api_version(ApiVersion::V2025_10)
//!     .api_host(HostUrl::new("https://proxy.example.com").unwrap())
//!     .user_agent_prefix("PromoSync/2.1")
//!     .default_tries(3)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.default_tries(), 3);
//! ```

mod newtypes;
mod version;

pub use newtypes::{AccessToken, HostUrl, ShopDomain};
pub use version::ApiVersion;

use crate::error::ConfigError;

/// Settings applied to every request made by a [`RestClient`](crate::RestClient).
///
/// All fields have defaults, so `ShopifyConfig::default()` is a valid
/// configuration addressing the latest stable API version directly.
#[derive(Clone, Debug)]
pub struct ShopifyConfig {
    api_version: ApiVersion,
    api_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
    default_tries: u32,
}

impl Default for ShopifyConfig {
    fn default() -> Self {
        Self {
            api_version: ApiVersion::latest(),
            api_host: None,
            user_agent_prefix: None,
            default_tries: 1,
        }
    }
}

impl ShopifyConfig {
    /// Creates a new builder for constructing a `ShopifyConfig`.
    #[must_use]
    pub fn builder() -> ShopifyConfigBuilder {
        ShopifyConfigBuilder::new()
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the base URI override, if configured.
    #[must_use]
    pub const fn api_host(&self) -> Option<&HostUrl> {
        self.api_host.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns how many times a request is attempted when it receives a
    /// 429 or 500 response.
    #[must_use]
    pub const fn default_tries(&self) -> u32 {
        self.default_tries
    }
}

// Verify ShopifyConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopifyConfig>();
};

/// Builder for [`ShopifyConfig`].
///
/// # Defaults
///
/// - `api_version`: [`ApiVersion::latest()`]
/// - `api_host`: `None` (requests go to `https://{shop}.myshopify.com`)
/// - `user_agent_prefix`: `None`
/// - `default_tries`: `1` (no retries)
#[derive(Debug, Default)]
pub struct ShopifyConfigBuilder {
    api_version: Option<ApiVersion>,
    api_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
    default_tries: Option<u32>,
}

impl ShopifyConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Routes every request to `host` instead of the shop's own domain.
    ///
    /// The shop domain is still sent in the `Host` header.
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the number of attempts for requests answered with 429 or 500.
    #[must_use]
    pub const fn default_tries(mut self, tries: u32) -> Self {
        self.default_tries = Some(tries);
        self
    }

    /// Builds the [`ShopifyConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTries`] if `default_tries` is zero.
    pub fn build(self) -> Result<ShopifyConfig, ConfigError> {
        let default_tries = self.default_tries.unwrap_or(1);
        if default_tries == 0 {
            return Err(ConfigError::InvalidTries {
                tries: default_tries,
            });
        }

        Ok(ShopifyConfig {
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            api_host: self.api_host,
            user_agent_prefix: self.user_agent_prefix,
            default_tries,
        })
    }
}
