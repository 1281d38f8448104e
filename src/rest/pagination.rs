//! Cursor pagination from the `Link` response header.
//!
//! Shopify advertises neighbouring pages as
//!
//! ```text
//! Link: <https://shop.myshopify.com/admin/api/2026-01/price_rules/1/discount_codes.json?page_info=abc&limit=50>; rel="next",
//!       <https://shop.myshopify.com/admin/api/2026-01/price_rules/1/discount_codes.json?page_info=xyz&limit=50>; rel="previous"
//! ```
//!
//! [`Pagination::from_link_header`] turns that into [`ListOptions`] that can
//! be passed back to a list call. Parsing is strict: an entry that
//! does not match the `<URL>; rel="next|previous"` shape, a URL that does not
//! parse, a missing `page_info`, or a non-numeric `limit` is an error rather
//! than a silently dropped page.

use thiserror::Error;
use url::Url;

use crate::rest::ListOptions;

/// Error parsing a `Link` response header.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LinkHeaderError {
    /// An entry does not have the form `<URL>; rel="next|previous"`.
    #[error("Invalid link entry: {entry}")]
    MalformedLink {
        /// The offending entry.
        entry: String,
    },

    /// The URL inside the angle brackets could not be parsed.
    #[error("Invalid link URL '{url}': {message}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// The parser's complaint.
        message: String,
    },

    /// The URL has no `page_info`, or an empty one.
    #[error("Link URL has no page_info: {url}")]
    MissingPageInfo {
        /// The offending URL.
        url: String,
    },

    /// The URL's `limit` is not an integer.
    #[error("Link URL has a non-numeric limit '{value}'")]
    InvalidLimit {
        /// The offending value.
        value: String,
    },
}

/// Options for the pages adjacent to the one just fetched.
///
/// Either side is `None` when the server did not advertise it, so the first
/// page has no `previous_page_options` and the last has no
/// `next_page_options`.
///
/// ```rust,ignore
/// let mut options = None;
/// loop {
///     let (codes, pagination) = client.list_with_pagination(507328175, options).await?;
///     process(codes);
///     match pagination.next_page_options {
///         Some(next) => options = Some(next.into()),
///         None => break,
///     }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pagination {
    /// Options that fetch the next page.
    pub next_page_options: Option<ListOptions>,
    /// Options that fetch the previous page.
    pub previous_page_options: Option<ListOptions>,
}

impl Pagination {
    /// Parses the value of a `Link` header.
    ///
    /// A missing or blank header yields an empty `Pagination`. Entries with a
    /// `rel` other than `next` or `previous` are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`LinkHeaderError`] for the first entry that fails to parse.
    pub fn from_link_header(header: Option<&str>) -> Result<Self, LinkHeaderError> {
        let mut pagination = Self::default();

        let Some(header) = header.map(str::trim).filter(|h| !h.is_empty()) else {
            return Ok(pagination);
        };

        for entry in split_entries(header) {
            let (url, rel) = parse_entry(entry)?;
            let options = options_from_url(url)?;
            match rel {
                Rel::Next => pagination.next_page_options = Some(options),
                Rel::Previous => pagination.previous_page_options = Some(options),
            }
        }

        Ok(pagination)
    }

    /// Returns `true` if a next page is available.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.next_page_options.is_some()
    }

    /// Returns `true` if a previous page is available.
    #[must_use]
    pub const fn has_previous_page(&self) -> bool {
        self.previous_page_options.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rel {
    Next,
    Previous,
}

/// Splits on commas outside angle brackets, so a URL carrying a raw comma
/// (`fields=id,code`) stays in one entry.
fn split_entries(header: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, ch) in header.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                entries.push(&header[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    entries.push(&header[start..]);

    entries.into_iter().map(str::trim).collect()
}

fn parse_entry(entry: &str) -> Result<(&str, Rel), LinkHeaderError> {
    let malformed = || LinkHeaderError::MalformedLink {
        entry: entry.to_string(),
    };

    let rest = entry.strip_prefix('<').ok_or_else(malformed)?;
    let (url, params) = rest.split_once('>').ok_or_else(malformed)?;
    let rel = params
        .trim_start()
        .strip_prefix(';')
        .map(str::trim)
        .and_then(|p| p.strip_prefix("rel="))
        .and_then(|r| r.strip_prefix('"'))
        .and_then(|r| r.strip_suffix('"'))
        .ok_or_else(malformed)?;

    match rel {
        "next" => Ok((url, Rel::Next)),
        "previous" => Ok((url, Rel::Previous)),
        _ => Err(malformed()),
    }
}

fn options_from_url(raw: &str) -> Result<ListOptions, LinkHeaderError> {
    let url = Url::parse(raw).map_err(|e| LinkHeaderError::InvalidUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })?;

    let mut options = ListOptions::default();
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "page_info" => options.page_info = Some(value.into_owned()),
            "limit" => {
                let limit = value
                    .parse::<u32>()
                    .map_err(|_| LinkHeaderError::InvalidLimit {
                        value: value.to_string(),
                    })?;
                options.limit = Some(limit);
            }
            "fields" => options.fields = Some(value.into_owned()),
            _ => {}
        }
    }

    if options.page_info.as_deref().map_or(true, str::is_empty) {
        return Err(LinkHeaderError::MissingPageInfo {
            url: raw.to_string(),
        });
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://test-shop.myshopify.com/admin/api/2026-01/price_rules/1/discount_codes.json";

    #[test]
    fn test_missing_or_blank_header_is_empty_pagination() {
        assert_eq!(Pagination::from_link_header(None).unwrap(), Pagination::default());
        assert_eq!(
            Pagination::from_link_header(Some("  ")).unwrap(),
            Pagination::default()
        );
    }

    #[test]
    fn test_parses_next_only() {
        let header = format!(r#"<{BASE}?page_info=abc123&limit=50>; rel="next""#);
        let pagination = Pagination::from_link_header(Some(header.as_str())).unwrap();

        let next = pagination.next_page_options.unwrap();
        assert_eq!(next.page_info.as_deref(), Some("abc123"));
        assert_eq!(next.limit, Some(50));
        assert_eq!(next.fields, None);
        assert!(pagination.previous_page_options.is_none());
    }

    #[test]
    fn test_parses_both_directions_with_fields() {
        let header = format!(
            r#"<{BASE}?page_info=prev1&fields=id%2Ccode>; rel="previous", <{BASE}?limit=10&page_info=next1&fields=id,code>; rel="next""#
        );
        let pagination = Pagination::from_link_header(Some(header.as_str())).unwrap();

        assert!(pagination.has_next_page());
        assert!(pagination.has_previous_page());

        let prev = pagination.previous_page_options.unwrap();
        assert_eq!(prev.page_info.as_deref(), Some("prev1"));
        assert_eq!(prev.fields.as_deref(), Some("id,code"));
        assert_eq!(prev.limit, None);

        let next = pagination.next_page_options.unwrap();
        assert_eq!(next.page_info.as_deref(), Some("next1"));
        assert_eq!(next.limit, Some(10));
        assert_eq!(next.fields.as_deref(), Some("id,code"));
    }

    #[test]
    fn test_pagination_options_only_carry_cursor_fields() {
        let header = format!(r#"<{BASE}?page_info=abc&limit=5&since_id=9&order=id>; rel="next""#);
        let next = Pagination::from_link_header(Some(header.as_str()))
            .unwrap()
            .next_page_options
            .unwrap();

        assert_eq!(next.since_id, None);
        assert_eq!(next.order, None);
    }

    #[test]
    fn test_malformed_entries_are_rejected() {
        let cases = [
            "garbage".to_string(),
            format!(r#"{BASE}?page_info=a; rel="next""#),
            format!(r#"<{BASE}?page_info=a> rel="next""#),
            format!(r#"<{BASE}?page_info=a>; rel=next"#),
            format!(r#"<{BASE}?page_info=a>; rel="last""#),
            format!(r#"<{BASE}?page_info=a>; rel="next", "#),
        ];

        for header in &cases {
            assert!(
                matches!(
                    Pagination::from_link_header(Some(header.as_str())),
                    Err(LinkHeaderError::MalformedLink { .. })
                ),
                "expected {header:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_undecodable_header_is_rejected_not_ignored() {
        let result = Pagination::from_link_header(Some("\u{FFFD}\u{FFFD}"));
        assert!(matches!(result, Err(LinkHeaderError::MalformedLink { .. })));
    }

    #[test]
    fn test_unparseable_url_is_rejected() {
        let result = Pagination::from_link_header(Some(r#"<not a url>; rel="next""#));
        assert!(matches!(result, Err(LinkHeaderError::InvalidUrl { .. })));
    }

    #[test]
    fn test_missing_page_info_is_rejected() {
        for query in ["?limit=50", "?page_info=&limit=50", ""] {
            let header = format!(r#"<{BASE}{query}>; rel="next""#);
            assert!(
                matches!(
                    Pagination::from_link_header(Some(header.as_str())),
                    Err(LinkHeaderError::MissingPageInfo { .. })
                ),
                "expected {header:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_non_numeric_limit_is_rejected() {
        let header = format!(r#"<{BASE}?page_info=abc&limit=many>; rel="next""#);
        assert_eq!(
            Pagination::from_link_header(Some(header.as_str())),
            Err(LinkHeaderError::InvalidLimit {
                value: "many".to_string()
            })
        );
    }
}
