//! Validated newtype wrappers for configuration and session values.
//!
//! Each wrapper checks its contents on construction, so a value that exists
//! is known to be usable when building request URLs and headers.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use url::Url;

/// An Admin API access token.
///
/// The token is sent as the `X-Shopify-Access-Token` header. Its `Debug`
/// output is masked so it never ends up in logs.
///
/// # Example
///
/// ```rust
/// use shopify_discount_codes::AccessToken;
///
/// let token = AccessToken::new("shpat_123").unwrap();
/// assert_eq!(token.as_ref(), "shpat_123");
/// assert_eq!(format!("{token:?}"), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty or
    /// only whitespace.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token: String = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// A validated Shopify shop domain.
///
/// Accepts either `shop-name` or `shop-name.myshopify.com` and always stores
/// the full domain.
///
/// ```rust
/// use shopify_discount_codes::ShopDomain;
///
/// let domain = ShopDomain::new("my-store").unwrap();
/// assert_eq!(domain.as_ref(), "my-store.myshopify.com");
/// assert_eq!(domain.shop_name(), "my-store");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopDomain {
    full_domain: String,
}

impl ShopDomain {
    const SUFFIX: &'static str = ".myshopify.com";

    /// Creates a new validated shop domain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShopDomain`] if the domain is invalid.
    pub fn new(domain: impl Into<String>) -> Result<Self, ConfigError> {
        let domain: String = domain.into();
        let domain = domain.trim().to_lowercase();

        let shop_name = match domain.strip_suffix(Self::SUFFIX) {
            Some(name) => name.to_string(),
            None if domain.contains('.') => {
                return Err(ConfigError::InvalidShopDomain {
                    domain: domain.clone(),
                });
            }
            None => domain.clone(),
        };

        if !Self::is_valid_shop_name(&shop_name) {
            return Err(ConfigError::InvalidShopDomain { domain });
        }

        Ok(Self {
            full_domain: format!("{shop_name}{}", Self::SUFFIX),
        })
    }

    /// Returns the shop name without the `.myshopify.com` suffix.
    #[must_use]
    pub fn shop_name(&self) -> &str {
        self.full_domain
            .strip_suffix(Self::SUFFIX)
            .unwrap_or(&self.full_domain)
    }

    // Lowercase letters, digits and inner hyphens.
    fn is_valid_shop_name(name: &str) -> bool {
        !name.is_empty()
            && !name.starts_with('-')
            && !name.ends_with('-')
            && name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }
}

impl AsRef<str> for ShopDomain {
    fn as_ref(&self) -> &str {
        &self.full_domain
    }
}

impl fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_domain)
    }
}

impl Serialize for ShopDomain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.full_domain)
    }
}

impl<'de> Deserialize<'de> for ShopDomain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A base URI that replaces `https://{shop}` for API requests.
///
/// Used to route traffic through a proxy or a local test server. Only
/// scheme, host and port are accepted; a root path (`/`) is allowed and
/// dropped. Credentials, other paths, queries and fragments are rejected.
///
/// ```rust
/// use shopify_discount_codes::HostUrl;
///
/// let url = HostUrl::new("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(url.scheme(), "http");
/// assert_eq!(url.host_name(), "127.0.0.1");
/// assert_eq!(url.as_ref(), "http://127.0.0.1:8080");
///
/// assert!(HostUrl::new("http://user@proxy.example.com").is_err());
/// assert!(HostUrl::new("https://proxy.example.com/shopify").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrl {
    url: String,
    scheme: String,
    host: String,
}

impl HostUrl {
    /// Creates a new validated host URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the URL does not parse, has
    /// no host, or carries anything beyond scheme, host and port.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw: String = url.into();
        let invalid = || ConfigError::InvalidHostUrl { url: raw.clone() };

        let parsed = Url::parse(raw.trim()).map_err(|_| invalid())?;
        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(invalid)?;

        let has_credentials = !parsed.username().is_empty() || parsed.password().is_some();
        let has_path = !matches!(parsed.path(), "" | "/");
        if has_credentials || has_path || parsed.query().is_some() || parsed.fragment().is_some()
        {
            return Err(invalid());
        }

        let scheme = parsed.scheme();
        let url = match parsed.port() {
            Some(port) => format!("{scheme}://{host}:{port}"),
            None => format!("{scheme}://{host}"),
        };

        Ok(Self {
            url,
            scheme: scheme.to_string(),
            host: host.to_string(),
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.host
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}
