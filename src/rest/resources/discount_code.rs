//! DiscountCode resource.
//!
//! Discount codes are the customer-facing codes shoppers enter at checkout.
//! Each one belongs to a price rule, so every path except lookup is nested:
//!
//! - `GET    price_rules/{price_rule_id}/discount_codes.json`
//! - `POST   price_rules/{price_rule_id}/discount_codes.json`
//! - `GET    price_rules/{price_rule_id}/discount_codes/count.json`
//! - `GET    price_rules/{price_rule_id}/discount_codes/{id}.json`
//! - `PUT    price_rules/{price_rule_id}/discount_codes/{id}.json`
//! - `DELETE price_rules/{price_rule_id}/discount_codes/{id}.json`
//! - `GET    discount_codes/lookup.json?code={code}`
//! - `POST   price_rules/{price_rule_id}/batch.json`
//! - `GET    price_rules/{price_rule_id}/batch/{batch_id}.json`
//! - `GET    price_rules/{price_rule_id}/batch/{batch_id}/discount_codes.json`
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shopify_discount_codes::{DiscountCode, DiscountCodeClient, DiscountCodeService, RestClient};
//!
//! let client = Arc::new(RestClient::new(&session, None)?);
//! let discount_codes = DiscountCodeClient::new(client);
//!
//! let created = discount_codes
//!     .create(507328175, DiscountCode {
//!         code: Some("SUMMER20".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let found = discount_codes.lookup("SUMMER20").await?;
//! assert_eq!(found.id, created.id);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::clients::{HttpResponse, RestClient};
use crate::rest::{to_query, CountOptions, ListOptions, Pagination, ResourceError};

const RESOURCE: &str = "DiscountCode";

/// A discount code associated with a price rule.
///
/// # Fields
///
/// ## Read-Only Fields
/// - `usage_count`, `errors`, `created_at`, `updated_at`
///
/// ## Writable Fields
/// - `code` - The discount code string customers enter
///
/// `id` is assigned by Shopify. It is sent when present, which
/// [`DiscountCodeService::update`] relies on.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DiscountCode {
    /// The unique identifier of the discount code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// The ID of the parent price rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_rule_id: Option<u64>,

    /// The discount code that customers enter at checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// The number of times this discount code has been used.
    #[serde(skip_serializing)]
    pub usage_count: Option<u64>,

    /// Errors reported for this code by a batch creation job.
    #[serde(skip_serializing)]
    pub errors: Option<Vec<DiscountCodeError>>,

    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An error reported for a single code of a batch.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DiscountCodeError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A batch discount code creation job.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DiscountCodeBatch {
    pub id: Option<u64>,
    pub price_rule_id: Option<u64>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,

    /// The job state: `queued`, `running` or `completed`.
    pub status: Option<String>,

    /// The number of codes submitted.
    pub codes_count: Option<u64>,

    /// The number of codes created successfully.
    pub imported_count: Option<u64>,

    /// The number of codes that failed to import.
    pub failed_count: Option<u64>,

    pub logs: Option<Vec<String>>,
}

/// `{"discount_code": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DiscountCodeEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<DiscountCode>,
}

/// `{"discount_codes": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DiscountCodesEnvelope {
    pub discount_codes: Vec<DiscountCode>,
}

#[derive(Debug, Deserialize)]
struct CountEnvelope {
    count: u64,
}

#[derive(Debug, Deserialize)]
struct BatchEnvelope {
    discount_code_creation: Option<DiscountCodeBatch>,
}

/// Options for listing discount codes.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DiscountCodeListOptions {
    #[serde(flatten)]
    pub list: ListOptions,
}

impl From<ListOptions> for DiscountCodeListOptions {
    fn from(list: ListOptions) -> Self {
        Self { list }
    }
}

/// Options for counting discount codes.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DiscountCodeCountOptions {
    #[serde(flatten)]
    pub count: CountOptions,

    /// Filter by times used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub times_used: Option<u64>,

    /// Filter by minimum times used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub times_used_min: Option<u64>,

    /// Filter by maximum times used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub times_used_max: Option<u64>,
}

/// Operations on the discount codes of a price rule.
///
/// Implemented by [`DiscountCodeClient`]. The trait is object safe, so
/// callers can hold an `Arc<dyn DiscountCodeService>` and substitute a fake
/// in tests.
#[async_trait]
pub trait DiscountCodeService: Send + Sync {
    /// Creates a discount code under a price rule.
    async fn create(
        &self,
        price_rule_id: u64,
        code: DiscountCode,
    ) -> Result<DiscountCode, ResourceError>;

    /// Updates a discount code. Fails with [`ResourceError::MissingId`]
    /// without sending a request if `code.id` is `None`.
    async fn update(
        &self,
        price_rule_id: u64,
        code: DiscountCode,
    ) -> Result<DiscountCode, ResourceError>;

    /// Lists the discount codes of a price rule.
    async fn list(&self, price_rule_id: u64) -> Result<Vec<DiscountCode>, ResourceError>;

    /// Lists one page of discount codes along with cursors for the adjacent
    /// pages.
    async fn list_with_pagination(
        &self,
        price_rule_id: u64,
        options: Option<DiscountCodeListOptions>,
    ) -> Result<(Vec<DiscountCode>, Pagination), ResourceError>;

    /// Counts the discount codes of a price rule.
    async fn count(
        &self,
        price_rule_id: u64,
        options: Option<DiscountCodeCountOptions>,
    ) -> Result<u64, ResourceError>;

    /// Fetches one discount code.
    async fn get(
        &self,
        price_rule_id: u64,
        discount_code_id: u64,
    ) -> Result<DiscountCode, ResourceError>;

    /// Deletes one discount code.
    async fn delete(&self, price_rule_id: u64, discount_code_id: u64)
        -> Result<(), ResourceError>;

    /// Finds a discount code by the string customers enter, without knowing
    /// its price rule.
    async fn lookup(&self, code: &str) -> Result<DiscountCode, ResourceError>;

    /// Starts a job creating up to 100 codes under a price rule.
    async fn batch_create(
        &self,
        price_rule_id: u64,
        codes: Vec<String>,
    ) -> Result<DiscountCodeBatch, ResourceError>;

    /// Fetches the state of a batch creation job.
    async fn batch_status(
        &self,
        price_rule_id: u64,
        batch_id: u64,
    ) -> Result<DiscountCodeBatch, ResourceError>;

    /// Fetches the codes of a batch creation job, including per-code errors.
    async fn batch_codes(
        &self,
        price_rule_id: u64,
        batch_id: u64,
    ) -> Result<Vec<DiscountCode>, ResourceError>;
}

/// [`DiscountCodeService`] backed by a shared [`RestClient`].
///
/// # Thread Safety
///
/// `DiscountCodeClient` is `Send + Sync` and cheap to clone.
#[derive(Debug, Clone)]
pub struct DiscountCodeClient {
    client: Arc<RestClient>,
}

// Verify DiscountCodeClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DiscountCodeClient>();
};

impl DiscountCodeClient {
    /// Creates a client issuing requests through `client`.
    #[must_use]
    pub const fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }

    /// Returns the underlying REST client.
    #[must_use]
    pub fn rest_client(&self) -> &RestClient {
        &self.client
    }
}

#[async_trait]
impl DiscountCodeService for DiscountCodeClient {
    async fn create(
        &self,
        price_rule_id: u64,
        code: DiscountCode,
    ) -> Result<DiscountCode, ResourceError> {
        tracing::debug!(price_rule_id, "Creating discount code");

        let body = serde_json::json!({ "discount_code": code });
        let response = self
            .client
            .post(&collection_path(price_rule_id), body, None)
            .await?;
        decode_single(response)
    }

    async fn update(
        &self,
        price_rule_id: u64,
        code: DiscountCode,
    ) -> Result<DiscountCode, ResourceError> {
        let discount_code_id = code.id.ok_or(ResourceError::MissingId {
            resource: RESOURCE,
            operation: "update",
        })?;
        tracing::debug!(price_rule_id, discount_code_id, "Updating discount code");

        let body = serde_json::json!({ "discount_code": code });
        let response = self
            .client
            .put(&item_path(price_rule_id, discount_code_id), body, None)
            .await?;
        decode_single(response)
    }

    async fn list(&self, price_rule_id: u64) -> Result<Vec<DiscountCode>, ResourceError> {
        tracing::debug!(price_rule_id, "Listing discount codes");

        let response = self.client.get(&collection_path(price_rule_id), None).await?;
        let envelope: DiscountCodesEnvelope = decode(response)?;
        Ok(envelope.discount_codes)
    }

    async fn list_with_pagination(
        &self,
        price_rule_id: u64,
        options: Option<DiscountCodeListOptions>,
    ) -> Result<(Vec<DiscountCode>, Pagination), ResourceError> {
        tracing::debug!(price_rule_id, "Listing discount codes with pagination");

        let query = options.as_ref().map(to_query).transpose()?;
        let response = self.client.get(&collection_path(price_rule_id), query).await?;

        let pagination = Pagination::from_link_header(response.link_header().as_deref())?;
        let envelope: DiscountCodesEnvelope = decode(response)?;
        Ok((envelope.discount_codes, pagination))
    }

    async fn count(
        &self,
        price_rule_id: u64,
        options: Option<DiscountCodeCountOptions>,
    ) -> Result<u64, ResourceError> {
        tracing::debug!(price_rule_id, "Counting discount codes");

        let query = options.as_ref().map(to_query).transpose()?;
        let response = self.client.get(&count_path(price_rule_id), query).await?;
        let envelope: CountEnvelope = decode(response)?;
        Ok(envelope.count)
    }

    async fn get(
        &self,
        price_rule_id: u64,
        discount_code_id: u64,
    ) -> Result<DiscountCode, ResourceError> {
        tracing::debug!(price_rule_id, discount_code_id, "Fetching discount code");

        let response = self
            .client
            .get(&item_path(price_rule_id, discount_code_id), None)
            .await?;
        decode_single(response)
    }

    async fn delete(
        &self,
        price_rule_id: u64,
        discount_code_id: u64,
    ) -> Result<(), ResourceError> {
        tracing::debug!(price_rule_id, discount_code_id, "Deleting discount code");

        self.client
            .delete(&item_path(price_rule_id, discount_code_id), None)
            .await?;
        Ok(())
    }

    async fn lookup(&self, code: &str) -> Result<DiscountCode, ResourceError> {
        tracing::debug!(code, "Looking up discount code");

        let query = HashMap::from([("code".to_string(), code.to_string())]);
        let response = self.client.get("discount_codes/lookup", Some(query)).await?;
        decode_single(response)
    }

    async fn batch_create(
        &self,
        price_rule_id: u64,
        codes: Vec<String>,
    ) -> Result<DiscountCodeBatch, ResourceError> {
        tracing::debug!(price_rule_id, codes = codes.len(), "Creating discount code batch");

        let discount_codes: Vec<serde_json::Value> = codes
            .into_iter()
            .map(|code| serde_json::json!({ "code": code }))
            .collect();
        let body = serde_json::json!({ "discount_codes": discount_codes });

        let response = self
            .client
            .post(&format!("price_rules/{price_rule_id}/batch"), body, None)
            .await?;
        decode_batch(response)
    }

    async fn batch_status(
        &self,
        price_rule_id: u64,
        batch_id: u64,
    ) -> Result<DiscountCodeBatch, ResourceError> {
        tracing::debug!(price_rule_id, batch_id, "Fetching discount code batch");

        let response = self
            .client
            .get(&batch_path(price_rule_id, batch_id), None)
            .await?;
        decode_batch(response)
    }

    async fn batch_codes(
        &self,
        price_rule_id: u64,
        batch_id: u64,
    ) -> Result<Vec<DiscountCode>, ResourceError> {
        tracing::debug!(price_rule_id, batch_id, "Listing discount codes of batch");

        let path = format!("{}/discount_codes", batch_path(price_rule_id, batch_id));
        let response = self.client.get(&path, None).await?;
        let envelope: DiscountCodesEnvelope = decode(response)?;
        Ok(envelope.discount_codes)
    }
}

fn collection_path(price_rule_id: u64) -> String {
    format!("price_rules/{price_rule_id}/discount_codes")
}

fn item_path(price_rule_id: u64, discount_code_id: u64) -> String {
    format!("price_rules/{price_rule_id}/discount_codes/{discount_code_id}")
}

fn count_path(price_rule_id: u64) -> String {
    format!("price_rules/{price_rule_id}/discount_codes/count")
}

fn batch_path(price_rule_id: u64, batch_id: u64) -> String {
    format!("price_rules/{price_rule_id}/batch/{batch_id}")
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ResourceError> {
    let request_id = response.request_id().map(ToString::to_string);
    serde_json::from_value(response.body).map_err(|e| ResourceError::Decode {
        resource: RESOURCE,
        message: e.to_string(),
        request_id,
    })
}

fn decode_single(response: HttpResponse) -> Result<DiscountCode, ResourceError> {
    let request_id = response.request_id().map(ToString::to_string);
    let envelope: DiscountCodeEnvelope = decode(response)?;
    envelope.discount_code.ok_or_else(|| ResourceError::Decode {
        resource: RESOURCE,
        message: "Missing 'discount_code' in response".to_string(),
        request_id,
    })
}

fn decode_batch(response: HttpResponse) -> Result<DiscountCodeBatch, ResourceError> {
    let request_id = response.request_id().map(ToString::to_string);
    let envelope: BatchEnvelope = decode(response)?;
    envelope
        .discount_code_creation
        .ok_or_else(|| ResourceError::Decode {
            resource: RESOURCE,
            message: "Missing 'discount_code_creation' in response".to_string(),
            request_id,
        })
}
