//! Environment variable backend
//!
//! Every key of a secret maps to one environment variable named
//! `PREFIX_NAMESPACE_NAME_KEY` (namespace and name uppercased, with
//! non-alphanumeric characters replaced by `_`). The key part keeps its
//! lowercase spelling on the way back out.

use async_trait::async_trait;

use crate::error::SecretError;
use crate::store::{SecretMap, SecretStore};

/// Default environment variable prefix
const DEFAULT_PREFIX: &str = "ATTEST_SECRET";

/// Secret store reading keys from process environment variables
pub struct EnvStore {
    prefix: String,
}

impl EnvStore {
    /// Create a store using the default `ATTEST_SECRET` prefix
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_PREFIX)
    }

    /// Create a store using a custom variable prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn var_prefix(&self, namespace: &str, name: &str) -> String {
        format!(
            "{}_{}_{}_",
            self.prefix,
            sanitize(namespace),
            sanitize(name)
        )
    }
}

impl Default for EnvStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Uppercase and replace anything outside [A-Za-z0-9] with `_`
fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[async_trait]
impl SecretStore for EnvStore {
    async fn get(&self, namespace: &str, name: &str) -> Result<SecretMap, SecretError> {
        let var_prefix = self.var_prefix(namespace, name);
        tracing::debug!("EnvStore: scanning for variables starting with {}", var_prefix);

        let mut secret = SecretMap::new();
        for (var, value) in std::env::vars() {
            if let Some(key) = var.strip_prefix(&var_prefix) {
                if !key.is_empty() {
                    secret.insert(key.to_ascii_lowercase(), value.into_bytes());
                }
            }
        }

        if secret.is_empty() {
            return Err(SecretError::not_found(namespace, name));
        }
        Ok(secret)
    }
}
