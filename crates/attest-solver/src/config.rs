//! Per-issuer solver configuration and credential resolution
//!
//! Each challenge carries an opaque JSON payload set by the issuer. It either
//! holds the name.com credentials inline, or references a secret in a
//! [`SecretStore`] — never both. Secret-backed resolution is bounded by
//! [`SECRET_FETCH_TIMEOUT`] so an unreachable store cannot stall a challenge
//! indefinitely.

use std::time::Duration;

use serde::Deserialize;
use tokio::time::timeout;

use attest_secrets::{SecretMap, SecretStore};

use crate::error::SolverError;

/// Namespace used when a secret reference does not name one
pub const DEFAULT_SECRET_NAMESPACE: &str = "name-dot-com";

/// Deadline for one secret store lookup
pub const SECRET_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

const USERNAME_KEY: &str = "username";
const TOKEN_KEY: &str = "token";

/// Reference to a secret holding the `username` and `token` keys
#[derive(Debug, Clone, Deserialize)]
pub struct SecretRef {
    pub name: String,
    pub namespace: Option<String>,
}

/// Solver configuration as set on the issuer.
///
/// Exactly one of the inline `username`/`token` pair or `secretMapRef` must
/// be populated.
#[derive(Debug, Clone, Deserialize)]
pub struct SolverConfig {
    pub username: Option<String>,
    pub token: Option<String>,
    #[serde(rename = "secretMapRef")]
    pub secret_ref: Option<SecretRef>,
}

/// Effective name.com API credentials
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

/// Resolve a challenge's configuration payload into effective credentials.
///
/// Validates the exclusivity rule, then either returns the inline pair or
/// fetches the referenced secret. No caching happens here; the solver caches
/// the result for its own lifetime.
pub async fn resolve_credentials(
    raw: Option<&serde_json::Value>,
    store: &dyn SecretStore,
) -> Result<Credentials, SolverError> {
    let raw = raw.ok_or(SolverError::ConfigMissing)?;
    let config: SolverConfig =
        serde_json::from_value(raw.clone()).map_err(SolverError::ConfigDecode)?;
    tracing::debug!("solver config decoded: {:?}", redacted(&config));

    match (config.username, config.token, config.secret_ref) {
        (Some(username), Some(token), None) => Ok(Credentials { username, token }),
        (None, None, Some(secret_ref)) => resolve_from_secret(&secret_ref, store).await,
        _ => Err(SolverError::ConfigValidation(
            "either the username/token pair or secretMapRef must be set, but not both".to_string(),
        )),
    }
}

async fn resolve_from_secret(
    secret_ref: &SecretRef,
    store: &dyn SecretStore,
) -> Result<Credentials, SolverError> {
    let namespace = secret_ref
        .namespace
        .as_deref()
        .unwrap_or(DEFAULT_SECRET_NAMESPACE);

    tracing::debug!(
        "resolving credentials from secret {}/{}",
        namespace,
        secret_ref.name
    );

    let secret = timeout(SECRET_FETCH_TIMEOUT, store.get(namespace, &secret_ref.name))
        .await
        .map_err(|_| SolverError::SecretFetch {
            namespace: namespace.to_string(),
            name: secret_ref.name.clone(),
            message: format!("deadline of {:?} exceeded", SECRET_FETCH_TIMEOUT),
        })?
        .map_err(|err| SolverError::SecretFetch {
            namespace: namespace.to_string(),
            name: secret_ref.name.clone(),
            message: err.to_string(),
        })?;

    let username = secret_value(&secret, USERNAME_KEY, namespace, &secret_ref.name)?;
    let token = secret_value(&secret, TOKEN_KEY, namespace, &secret_ref.name)?;
    Ok(Credentials { username, token })
}

fn secret_value(
    secret: &SecretMap,
    key: &str,
    namespace: &str,
    name: &str,
) -> Result<String, SolverError> {
    let bytes = secret.get(key).ok_or_else(|| SolverError::SecretMalformed {
        namespace: namespace.to_string(),
        name: name.to_string(),
        message: format!("missing key '{}'", key),
    })?;
    String::from_utf8(bytes.clone()).map_err(|_| SolverError::SecretMalformed {
        namespace: namespace.to_string(),
        name: name.to_string(),
        message: format!("key '{}' is not valid UTF-8", key),
    })
}

/// Config with the token blanked, for debug logging
fn redacted(config: &SolverConfig) -> SolverConfig {
    SolverConfig {
        username: config.username.clone(),
        token: config.token.as_ref().map(|_| "<redacted>".to_string()),
        secret_ref: config.secret_ref.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use attest_secrets::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_missing_config() {
        let store = MemoryStore::new();
        let result = resolve_credentials(None, &store).await;
        assert!(matches!(result, Err(SolverError::ConfigMissing)));
    }

    #[tokio::test]
    async fn test_undecodable_config() {
        let store = MemoryStore::new();
        let raw = json!(["not", "an", "object"]);
        let result = resolve_credentials(Some(&raw), &store).await;
        assert!(matches!(result, Err(SolverError::ConfigDecode(_))));
    }

    #[tokio::test]
    async fn test_inline_credentials() {
        let store = MemoryStore::new();
        let raw = json!({"username": "acme", "token": "t0k3n"});
        let creds = resolve_credentials(Some(&raw), &store).await.unwrap();
        assert_eq!(creds.username, "acme");
        assert_eq!(creds.token, "t0k3n");
    }

    #[tokio::test]
    async fn test_neither_form_rejected() {
        let store = MemoryStore::new();
        let raw = json!({});
        let result = resolve_credentials(Some(&raw), &store).await;
        assert!(matches!(result, Err(SolverError::ConfigValidation(_))));
    }

    #[tokio::test]
    async fn test_both_forms_rejected() {
        let store = MemoryStore::new();
        let raw = json!({
            "username": "acme",
            "token": "t0k3n",
            "secretMapRef": {"name": "creds", "namespace": "dns"}
        });
        let result = resolve_credentials(Some(&raw), &store).await;
        assert!(matches!(result, Err(SolverError::ConfigValidation(_))));
    }

    #[tokio::test]
    async fn test_partial_inline_pair_rejected() {
        let store = MemoryStore::new();
        let raw = json!({"username": "acme"});
        let result = resolve_credentials(Some(&raw), &store).await;
        assert!(matches!(result, Err(SolverError::ConfigValidation(_))));
    }

    #[tokio::test]
    async fn test_secret_reference() {
        let store = MemoryStore::new();
        store.insert_pairs("dns", "creds", [("username", "acme"), ("token", "t0k3n")]);

        let raw = json!({"secretMapRef": {"name": "creds", "namespace": "dns"}});
        let creds = resolve_credentials(Some(&raw), &store).await.unwrap();
        assert_eq!(creds.username, "acme");
        assert_eq!(creds.token, "t0k3n");
    }

    #[tokio::test]
    async fn test_secret_reference_default_namespace() {
        let store = MemoryStore::new();
        store.insert_pairs(
            DEFAULT_SECRET_NAMESPACE,
            "creds",
            [("username", "acme"), ("token", "t0k3n")],
        );

        let raw = json!({"secretMapRef": {"name": "creds"}});
        let creds = resolve_credentials(Some(&raw), &store).await.unwrap();
        assert_eq!(creds.username, "acme");
    }

    #[tokio::test]
    async fn test_secret_missing_key() {
        let store = MemoryStore::new();
        store.insert_pairs("dns", "creds", [("username", "acme")]);

        let raw = json!({"secretMapRef": {"name": "creds", "namespace": "dns"}});
        let result = resolve_credentials(Some(&raw), &store).await;
        match result {
            Err(SolverError::SecretMalformed { message, .. }) => {
                assert!(message.contains("token"));
            }
            other => panic!("expected SecretMalformed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_secret_invalid_utf8() {
        let store = MemoryStore::new();
        let mut secret = SecretMap::new();
        secret.insert("username".to_string(), b"acme".to_vec());
        secret.insert("token".to_string(), vec![0xff, 0xfe]);
        store.insert("dns", "creds", secret);

        let raw = json!({"secretMapRef": {"name": "creds", "namespace": "dns"}});
        let result = resolve_credentials(Some(&raw), &store).await;
        assert!(matches!(result, Err(SolverError::SecretMalformed { .. })));
    }

    #[tokio::test]
    async fn test_secret_store_error() {
        let store = MemoryStore::new();
        store.set_fail(true);

        let raw = json!({"secretMapRef": {"name": "creds", "namespace": "dns"}});
        let result = resolve_credentials(Some(&raw), &store).await;
        assert!(matches!(result, Err(SolverError::SecretFetch { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_secret_fetch_deadline() {
        let store = MemoryStore::new();
        store.insert_pairs("dns", "creds", [("username", "acme"), ("token", "t0k3n")]);
        store.set_delay(Duration::from_secs(30));

        let raw = json!({"secretMapRef": {"name": "creds", "namespace": "dns"}});
        let result = resolve_credentials(Some(&raw), &store).await;
        match result {
            Err(SolverError::SecretFetch { message, .. }) => {
                assert!(message.contains("deadline"));
            }
            other => panic!("expected SecretFetch, got {:?}", other),
        }
    }
}
