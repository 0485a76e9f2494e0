use thiserror::Error;

use crate::provider::ProviderError;

/// Errors surfaced by one present/cleanup invocation.
///
/// Every failure is terminal for the current call and propagates unchanged to
/// the orchestration layer, which owns retry policy. Configuration errors
/// need operator intervention; secret/provider errors are transient and worth
/// retrying as a whole.
#[derive(Debug, Error)]
pub enum SolverError {
    /// No configuration payload was supplied with the challenge
    #[error("challenge configuration must be provided")]
    ConfigMissing,

    /// The configuration payload could not be parsed
    #[error("error decoding solver config: {0}")]
    ConfigDecode(#[source] serde_json::Error),

    /// The configuration payload violates the credential exclusivity rule
    #[error("invalid solver config: {0}")]
    ConfigValidation(String),

    /// The secret store call failed or exceeded its deadline
    #[error("failed to fetch secret {namespace}/{name}: {message}")]
    SecretFetch {
        namespace: String,
        name: String,
        message: String,
    },

    /// The secret exists but is missing a required key or holds invalid data
    #[error("secret {namespace}/{name} is malformed: {message}")]
    SecretMalformed {
        namespace: String,
        name: String,
        message: String,
    },

    /// Cleanup found no TXT record matching the challenge
    #[error("no TXT record for host '{host}' in {domain_name} matches the challenge key")]
    RecordNotFound { host: String, domain_name: String },

    /// Cleanup found several records matching the challenge; deleting any one
    /// of them could remove a concurrent validation's proof
    #[error("{count} TXT records for host '{host}' in {domain_name} match the challenge key")]
    RecordAmbiguous {
        host: String,
        domain_name: String,
        count: usize,
    },

    /// The provider rejected or failed the record creation
    #[error("failed to create TXT record: {0}")]
    ProviderCreate(#[source] ProviderError),

    /// The provider rejected or failed the record listing
    #[error("failed to list records: {0}")]
    ProviderList(#[source] ProviderError),

    /// The provider rejected or failed the record deletion
    #[error("failed to delete TXT record: {0}")]
    ProviderDelete(#[source] ProviderError),
}
