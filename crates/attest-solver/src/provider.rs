//! DNS provider record contract
//!
//! This trait allows the solver to work against different record backends:
//! name.com for production, a mock implementation for testing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Record type used for DNS-01 validation
pub const TXT_TYPE: &str = "TXT";

/// A provider-side DNS record.
///
/// `host` is relative to the zone; an **empty** host means the record sits at
/// the zone apex (name.com omits the field for apex records).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Provider-assigned record identifier
    pub id: i32,
    /// Record type (e.g. `TXT`)
    #[serde(rename = "type")]
    pub record_type: String,
    /// Hostname relative to the zone, empty at the apex
    #[serde(default)]
    pub host: String,
    /// Zone the record belongs to, without trailing dot
    #[serde(default)]
    pub domain_name: String,
    /// Record value
    pub answer: String,
    /// Time to live in seconds
    #[serde(default)]
    pub ttl: u32,
}

/// A record to be created at the provider
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub record_type: String,
    pub host: String,
    pub domain_name: String,
    pub answer: String,
    pub ttl: u32,
}

/// Errors from provider record operations
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Request(String),

    #[error("API error: {0}")]
    Api(String),
}

/// Create/list/delete operations against a DNS provider's record API.
///
/// Implementations perform a single attempt per call and surface every
/// failure; retry policy lives with the caller.
#[async_trait]
pub trait RecordClient: Send + Sync {
    /// Create a record and return it with its provider-assigned ID
    async fn create_record(&self, record: &NewRecord) -> Result<Record, ProviderError>;

    /// List all records in the given zone
    async fn list_records(&self, domain_name: &str) -> Result<Vec<Record>, ProviderError>;

    /// Delete a record by its provider-assigned ID
    async fn delete_record(&self, domain_name: &str, id: i32) -> Result<(), ProviderError>;
}
