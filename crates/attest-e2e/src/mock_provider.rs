//! Mock record client for E2E tests
//!
//! This module provides a mock implementation of the RecordClient trait that
//! can be used in tests without making real provider API calls. Like the real
//! provider, it happily stores duplicate TXT records at the same host.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use attest_solver::{NewRecord, ProviderError, Record, RecordClient};

/// Mock record client that tracks operations without making real API calls
pub struct MockRecordClient {
    /// Stored records: record id -> record
    records: DashMap<i32, Record>,
    /// Counter for generating unique record IDs
    record_counter: AtomicI32,
    /// Whether to simulate failures on create
    fail_create: AtomicBool,
    /// Whether to simulate failures on list
    fail_list: AtomicBool,
    /// Whether to simulate failures on delete
    fail_delete: AtomicBool,
}

impl MockRecordClient {
    /// Create a new mock record client
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Get all stored records (for test assertions)
    pub fn records(&self) -> Vec<Record> {
        self.records.iter().map(|r| r.value().clone()).collect()
    }

    /// Get the number of stored records
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Check if a TXT record with the given host and answer exists
    pub fn has_txt(&self, host: &str, answer: &str) -> bool {
        self.records
            .iter()
            .any(|r| r.record_type == "TXT" && r.host == host && r.answer == answer)
    }

    /// Configure mock to fail on create operations
    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    /// Configure mock to fail on list operations
    pub fn set_fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    /// Configure mock to fail on delete operations
    pub fn set_fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    /// Clear all records (useful between tests)
    pub fn clear(&self) {
        self.records.clear();
    }
}

impl Default for MockRecordClient {
    fn default() -> Self {
        Self {
            records: DashMap::new(),
            record_counter: AtomicI32::new(1),
            fail_create: AtomicBool::new(false),
            fail_list: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl RecordClient for MockRecordClient {
    async fn create_record(&self, record: &NewRecord) -> Result<Record, ProviderError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(ProviderError::Api("Simulated create failure".into()));
        }

        let id = self.record_counter.fetch_add(1, Ordering::Relaxed);
        let created = Record {
            id,
            record_type: record.record_type.clone(),
            host: record.host.clone(),
            domain_name: record.domain_name.clone(),
            answer: record.answer.clone(),
            ttl: record.ttl,
        };
        self.records.insert(id, created.clone());
        tracing::debug!(
            "MockRecordClient: created record {} for host '{}'",
            id,
            record.host
        );
        Ok(created)
    }

    async fn list_records(&self, domain_name: &str) -> Result<Vec<Record>, ProviderError> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ProviderError::Api("Simulated list failure".into()));
        }

        Ok(self
            .records
            .iter()
            .filter(|r| r.domain_name == domain_name)
            .map(|r| r.value().clone())
            .collect())
    }

    async fn delete_record(&self, _domain_name: &str, id: i32) -> Result<(), ProviderError> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(ProviderError::Api("Simulated delete failure".into()));
        }

        if self.records.remove(&id).is_none() {
            return Err(ProviderError::Api(format!("No record with id {}", id)));
        }
        tracing::debug!("MockRecordClient: deleted record {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txt_record(host: &str, answer: &str) -> NewRecord {
        NewRecord {
            record_type: "TXT".to_string(),
            host: host.to_string(),
            domain_name: "example.com".to_string(),
            answer: answer.to_string(),
            ttl: 300,
        }
    }

    #[tokio::test]
    async fn test_create_list_delete() {
        let client = MockRecordClient::new();

        let created = client
            .create_record(&txt_record("_acme-challenge", "proof"))
            .await
            .unwrap();
        assert!(client.has_txt("_acme-challenge", "proof"));

        let listed = client.list_records("example.com").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);

        client
            .delete_record("example.com", created.id)
            .await
            .unwrap();
        assert_eq!(client.record_count(), 0);
    }

    #[tokio::test]
    async fn test_duplicates_coexist() {
        let client = MockRecordClient::new();
        client
            .create_record(&txt_record("_acme-challenge", "proof"))
            .await
            .unwrap();
        client
            .create_record(&txt_record("_acme-challenge", "proof"))
            .await
            .unwrap();
        assert_eq!(client.record_count(), 2);
    }

    #[tokio::test]
    async fn test_failure_simulation() {
        let client = MockRecordClient::new();

        client.set_fail_create(true);
        assert!(client
            .create_record(&txt_record("failing", "x"))
            .await
            .is_err());

        client.set_fail_create(false);
        let created = client
            .create_record(&txt_record("working", "x"))
            .await
            .unwrap();

        client.set_fail_delete(true);
        assert!(client.delete_record("example.com", created.id).await.is_err());
    }
}
