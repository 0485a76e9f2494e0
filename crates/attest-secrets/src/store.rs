//! The secret store contract

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::SecretError;

/// The decoded content of one secret: key names to raw byte values
pub type SecretMap = HashMap<String, Vec<u8>>;

/// A key-value secret lookup addressed by namespace and name.
///
/// Implementations return the full set of keys stored under the secret, or
/// fail if the secret does not exist or the backend is unreachable. No
/// deadline is imposed here; callers that need bounded latency wrap the call
/// in their own timeout.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the secret stored under `namespace`/`name`
    async fn get(&self, namespace: &str, name: &str) -> Result<SecretMap, SecretError>;
}
