//! Admin API version selection.

use crate::error::ConfigError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Shopify Admin API version.
///
/// Shopify releases a new version every quarter (January, April, July,
/// October). Known releases have their own variant; any other well-formed
/// `YYYY-MM` release is kept as [`ApiVersion::Custom`].
///
/// ```rust
/// use shopify_discount_codes::ApiVersion;
///
/// let version: ApiVersion = "2025-07".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2025_07);
/// assert_eq!(version.to_string(), "2025-07");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// 2025-01
    V2025_01,
    /// 2025-04
    V2025_04,
    /// 2025-07
    V2025_07,
    /// 2025-10
    V2025_10,
    /// 2026-01
    V2026_01,
    /// The unstable development version.
    Unstable,
    /// A `YYYY-MM` release this crate has no variant for.
    Custom(String),
}

impl ApiVersion {
    /// Returns the latest stable API version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2026_01
    }

    /// Returns `true` for the named stable releases.
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        !matches!(self, Self::Unstable | Self::Custom(_))
    }

    const fn ordinal(&self) -> u32 {
        match self {
            Self::V2025_01 => 1,
            Self::V2025_04 => 2,
            Self::V2025_07 => 3,
            Self::V2025_10 => 4,
            Self::V2026_01 => 5,
            Self::Unstable => 100,
            Self::Custom(_) => 101,
        }
    }

    // YYYY-MM with a quarterly month.
    fn is_valid_version_format(s: &str) -> bool {
        let Some((year, month)) = s.split_once('-') else {
            return false;
        };
        year.len() == 4
            && year.chars().all(|c| c.is_ascii_digit())
            && matches!(month, "01" | "04" | "07" | "10")
    }
}

impl PartialOrd for ApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ApiVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Custom(a), Self::Custom(b)) => a.cmp(b),
            _ => self.ordinal().cmp(&other.ordinal()),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::V2025_01 => "2025-01",
            Self::V2025_04 => "2025-04",
            Self::V2025_07 => "2025-07",
            Self::V2025_10 => "2025-10",
            Self::V2026_01 => "2026-01",
            Self::Unstable => "unstable",
            Self::Custom(s) => s,
        })
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        match s.as_str() {
            "2025-01" => Ok(Self::V2025_01),
            "2025-04" => Ok(Self::V2025_04),
            "2025-07" => Ok(Self::V2025_07),
            "2025-10" => Ok(Self::V2025_10),
            "2026-01" => Ok(Self::V2026_01),
            "unstable" => Ok(Self::Unstable),
            _ if Self::is_valid_version_format(&s) => Ok(Self::Custom(s)),
            _ => Err(ConfigError::InvalidApiVersion { version: s }),
        }
    }
}
