//! In-memory secret store
//!
//! Secrets are registered by the process itself. Used by tests and local
//! development; also doubles as a controllable test double with configurable
//! latency and failure injection.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::SecretError;
use crate::store::{SecretMap, SecretStore};

/// Secret store holding all secrets in process memory
#[derive(Default)]
pub struct MemoryStore {
    /// (namespace, name) -> secret content
    secrets: DashMap<(String, String), SecretMap>,
    /// Artificial latency applied to every lookup, in milliseconds
    delay_ms: AtomicU64,
    /// Whether to simulate an unreachable backend
    fail: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a secret under `namespace`/`name`
    pub fn insert(&self, namespace: &str, name: &str, secret: SecretMap) {
        self.secrets
            .insert((namespace.to_string(), name.to_string()), secret);
    }

    /// Register a secret from string key/value pairs
    pub fn insert_pairs<'a>(
        &self,
        namespace: &str,
        name: &str,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) {
        let secret = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.as_bytes().to_vec()))
            .collect();
        self.insert(namespace, name, secret);
    }

    /// Apply an artificial delay to every subsequent lookup
    pub fn set_delay(&self, delay: Duration) {
        self.delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Configure the store to fail every subsequent lookup
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Remove all registered secrets (useful between tests)
    pub fn clear(&self) {
        self.secrets.clear();
    }
}

#[async_trait]
impl SecretStore for MemoryStore {
    async fn get(&self, namespace: &str, name: &str) -> Result<SecretMap, SecretError> {
        let delay_ms = self.delay_ms.load(Ordering::SeqCst);
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        if self.fail.load(Ordering::SeqCst) {
            return Err(SecretError::backend("memory", "simulated backend failure"));
        }

        tracing::debug!("MemoryStore: looking up secret {}/{}", namespace, name);
        self.secrets
            .get(&(namespace.to_string(), name.to_string()))
            .map(|entry| entry.value().clone())
            .ok_or_else(|| SecretError::not_found(namespace, name))
    }
}
