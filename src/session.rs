//! Shop session used to authenticate API calls.

use crate::config::{AccessToken, ShopDomain};
use crate::error::ConfigError;

/// The shop being addressed and the access token that authorizes calls to it.
///
/// Obtaining the token (OAuth, custom app install) happens outside this
/// crate; a session only carries the result.
///
/// # Example
///
/// ```rust
/// use shopify_discount_codes::Session;
///
/// let session = Session::from_parts("my-store", "shpat_123").unwrap();
/// assert_eq!(session.shop.as_ref(), "my-store.myshopify.com");
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    /// The shop this session is for.
    pub shop: ShopDomain,

    /// The Admin API access token.
    pub access_token: AccessToken,
}

impl Session {
    /// Creates a session from validated parts.
    #[must_use]
    pub const fn new(shop: ShopDomain, access_token: AccessToken) -> Self {
        Self { shop, access_token }
    }

    /// Validates raw strings and creates a session from them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShopDomain`] or
    /// [`ConfigError::EmptyAccessToken`] when either part is invalid.
    pub fn from_parts(
        shop: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(
            ShopDomain::new(shop)?,
            AccessToken::new(access_token)?,
        ))
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};
