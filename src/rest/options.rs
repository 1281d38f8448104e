//! Query options shared by list and count endpoints.
//!
//! Options are plain serde structs. Before a request they are flattened into
//! query parameters by [`to_query`]: unset fields are dropped, scalars are
//! stringified, and lists are comma-joined.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rest::ResourceError;

/// Options accepted by list endpoints.
///
/// With cursor pagination only `page_info`, `limit` and `fields` may be
/// combined; [`Pagination`](crate::rest::Pagination) hands back options of
/// exactly that shape.
///
/// ```rust
/// use shopify_discount_codes::rest::ListOptions;
///
/// let options = ListOptions {
///     limit: Some(50),
///     ids: Some(vec![1, 2, 3]),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Cursor from a previous page's `Link` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_info: Option<String>,

    /// Legacy page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Maximum number of results to return (default: 50, max: 250).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Restrict results to after the specified ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_min: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_max: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_max: Option<DateTime<Utc>>,

    /// Sort order, e.g. `created_at asc`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,

    /// Comma-separated list of fields to include in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    /// Restrict results to these IDs. Sent comma-joined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<u64>>,
}

/// Options accepted by count endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CountOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_min: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_max: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_max: Option<DateTime<Utc>>,
}

/// Flattens serializable options into query parameters.
///
/// # Errors
///
/// Returns [`ResourceError::InvalidOptions`] if the options do not serialize
/// to a JSON object, or if a field holds a nested object.
pub fn to_query<P: Serialize>(options: &P) -> Result<HashMap<String, String>, ResourceError> {
    let value = serde_json::to_value(options).map_err(|e| ResourceError::InvalidOptions {
        message: e.to_string(),
    })?;

    let serde_json::Value::Object(map) = value else {
        return Err(ResourceError::InvalidOptions {
            message: format!("expected an object of options, got {value}"),
        });
    };

    let mut query = HashMap::with_capacity(map.len());
    for (key, val) in map {
        let rendered = match val {
            serde_json::Value::Null => continue,
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| scalar_to_string(&key, item))
                .collect::<Result<Vec<_>, _>>()?
                .join(","),
            other => scalar_to_string(&key, &other)?,
        };
        query.insert(key, rendered);
    }
    Ok(query)
}

fn scalar_to_string(key: &str, value: &serde_json::Value) -> Result<String, ResourceError> {
    match value {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ResourceError::InvalidOptions {
            message: format!("option '{key}' must be a scalar or a list of scalars"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_list_options_produce_empty_query() {
        assert!(to_query(&ListOptions::default()).unwrap().is_empty());
        assert!(to_query(&CountOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn test_list_options_are_flattened() {
        let options = ListOptions {
            limit: Some(25),
            since_id: Some(1054381139),
            created_at_min: Some(
                DateTime::parse_from_rfc3339("2025-03-01T00:00:00Z")
                    .unwrap()
                    .with_timezone(&Utc),
            ),
            fields: Some("id,code".to_string()),
            ids: Some(vec![1, 2, 3]),
            ..Default::default()
        };

        let query = to_query(&options).unwrap();

        assert_eq!(query.len(), 5);
        assert_eq!(query["limit"], "25");
        assert_eq!(query["since_id"], "1054381139");
        assert_eq!(query["created_at_min"], "2025-03-01T00:00:00Z");
        assert_eq!(query["fields"], "id,code");
        assert_eq!(query["ids"], "1,2,3");
    }

    #[test]
    fn test_nested_objects_are_rejected() {
        let options = serde_json::json!({"filter": {"a": 1}});
        assert!(matches!(
            to_query(&options),
            Err(ResourceError::InvalidOptions { message }) if message.contains("filter")
        ));
    }

    #[test]
    fn test_non_object_options_are_rejected() {
        assert!(matches!(
            to_query(&vec![1, 2]),
            Err(ResourceError::InvalidOptions { .. })
        ));
    }
}
