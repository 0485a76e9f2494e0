//! Present/cleanup orchestration for DNS-01 challenges

use std::sync::Arc;

use tokio::sync::OnceCell;

use attest_secrets::SecretStore;

use crate::challenge::ChallengeRequest;
use crate::config::{resolve_credentials, Credentials};
use crate::error::SolverError;
use crate::namecom::NameComClient;
use crate::provider::{NewRecord, Record, RecordClient, TXT_TYPE};

/// Solver name registered with the webhook group
pub const SOLVER_NAME: &str = "name-dot-com-solver";

/// TTL for validation TXT records, in seconds
pub const TXT_RECORD_TTL: u32 = 300;

/// Builds a record client from freshly resolved credentials
pub type ClientFactory = Box<dyn Fn(&Credentials) -> Arc<dyn RecordClient> + Send + Sync>;

/// DNS-01 challenge solver for the name.com record API.
///
/// One solver instance serves many challenges. Credentials are resolved from
/// the first challenge's configuration and the record client is built exactly
/// once, guarded by an initialize-once cell so concurrent first calls cannot
/// race; both then live for the solver's lifetime. Stale credentials persist
/// until process restart — a deliberate tradeoff.
pub struct Solver {
    group_name: String,
    store: Arc<dyn SecretStore>,
    build_client: ClientFactory,
    client: OnceCell<Arc<dyn RecordClient>>,
}

impl Solver {
    /// Create a solver that talks to the production name.com API.
    ///
    /// `group_name` is the webhook API group this solver registers under; it
    /// is validated here, once, instead of being read from ambient process
    /// state.
    pub fn new(
        group_name: impl Into<String>,
        store: Arc<dyn SecretStore>,
    ) -> Result<Self, SolverError> {
        Self::with_client_factory(
            group_name,
            store,
            Box::new(|credentials| Arc::new(NameComClient::new(credentials))),
        )
    }

    /// Create a solver with a custom record client factory (used by tests and
    /// alternative endpoints)
    pub fn with_client_factory(
        group_name: impl Into<String>,
        store: Arc<dyn SecretStore>,
        build_client: ClientFactory,
    ) -> Result<Self, SolverError> {
        let group_name = group_name.into();
        if group_name.is_empty() {
            return Err(SolverError::ConfigValidation(
                "group name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            group_name,
            store,
            build_client,
            client: OnceCell::new(),
        })
    }

    /// Name under which this solver is referenced on an issuer
    pub fn name(&self) -> &'static str {
        SOLVER_NAME
    }

    /// Webhook API group this solver registers under
    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    /// Get the record client, resolving credentials and constructing it on
    /// first use. A failed initialization is not cached; the next call
    /// retries with its own challenge's configuration.
    async fn client(
        &self,
        config: Option<&serde_json::Value>,
    ) -> Result<&Arc<dyn RecordClient>, SolverError> {
        self.client
            .get_or_try_init(|| async {
                let credentials = resolve_credentials(config, self.store.as_ref()).await?;
                tracing::info!("provider credentials resolved for {}", credentials.username);
                Ok((self.build_client)(&credentials))
            })
            .await
    }

    /// Present the validation TXT record for a challenge.
    ///
    /// Tolerates being invoked multiple times with the same challenge: DNS-01
    /// permits several TXT values coexisting at one name (concurrent
    /// validations, retries), so no pre-existing-record check is made and the
    /// provider is expected to accept parallel entries.
    pub async fn present(&self, challenge: &ChallengeRequest) -> Result<(), SolverError> {
        let host = derive_host(&challenge.resolved_fqdn, &challenge.resolved_zone);
        let domain_name = unfqdn(&challenge.resolved_zone);

        tracing::info!("creating TXT record '{}' in {}", host, domain_name);
        let client = self.client(challenge.config.as_ref()).await?;

        let record = NewRecord {
            record_type: TXT_TYPE.to_string(),
            host: host.to_string(),
            domain_name: domain_name.to_string(),
            answer: challenge.key.clone(),
            ttl: TXT_RECORD_TTL,
        };

        let created = match client.create_record(&record).await {
            Ok(created) => created,
            Err(err) => {
                tracing::error!("TXT record creation in {} failed: {}", domain_name, err);
                return Err(SolverError::ProviderCreate(err));
            }
        };

        tracing::info!(
            "TXT record '{}' created in {} with id {}",
            host,
            domain_name,
            created.id
        );
        Ok(())
    }

    /// Remove the one TXT record presented for this exact challenge.
    ///
    /// Several records may share the challenge's host (concurrent validations
    /// of the same domain); the answer value disambiguates. Exactly one
    /// record may match: none fails with [`SolverError::RecordNotFound`]
    /// rather than issuing a delete with a sentinel ID, and more than one
    /// fails with [`SolverError::RecordAmbiguous`] rather than guessing which
    /// challenge's proof to destroy.
    pub async fn cleanup(&self, challenge: &ChallengeRequest) -> Result<(), SolverError> {
        let host = derive_host(&challenge.resolved_fqdn, &challenge.resolved_zone);
        let domain_name = unfqdn(&challenge.resolved_zone);

        tracing::info!("removing TXT record '{}' in {}", host, domain_name);
        let client = self.client(challenge.config.as_ref()).await?;

        let records = match client.list_records(domain_name).await {
            Ok(records) => records,
            Err(err) => {
                tracing::error!("record listing for {} failed: {}", domain_name, err);
                return Err(SolverError::ProviderList(err));
            }
        };

        let matches: Vec<&Record> = records
            .iter()
            .filter(|r| r.record_type == TXT_TYPE && r.host == host && r.answer == challenge.key)
            .collect();

        let record = match matches.as_slice() {
            [] => {
                return Err(SolverError::RecordNotFound {
                    host: host.to_string(),
                    domain_name: domain_name.to_string(),
                })
            }
            [record] => record,
            _ => {
                return Err(SolverError::RecordAmbiguous {
                    host: host.to_string(),
                    domain_name: domain_name.to_string(),
                    count: matches.len(),
                })
            }
        };

        if let Err(err) = client.delete_record(domain_name, record.id).await {
            tracing::error!("TXT record deletion in {} failed: {}", domain_name, err);
            return Err(SolverError::ProviderDelete(err));
        }

        tracing::info!(
            "TXT record '{}' deleted in {} (id {})",
            host,
            domain_name,
            record.id
        );
        Ok(())
    }
}

/// Derive the provider-relative record host from a challenge FQDN and its
/// owning zone, both absolute with trailing dots.
///
/// `_acme-challenge.example.com.` under zone `example.com.` yields
/// `_acme-challenge`. When the challenge targets the zone apex the host is
/// the empty string, which is how name.com addresses apex records.
pub fn derive_host<'a>(fqdn: &'a str, zone: &str) -> &'a str {
    let name = unfqdn(fqdn);
    let zone = unfqdn(zone);
    if name == zone {
        return "";
    }
    match name.find(&format!(".{}", zone)) {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Strip the trailing dot from an absolute DNS name
fn unfqdn(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_host_subdomain() {
        assert_eq!(
            derive_host("_acme-challenge.example.com.", "example.com."),
            "_acme-challenge"
        );
    }

    #[test]
    fn test_derive_host_nested_subdomain() {
        assert_eq!(
            derive_host("_acme-challenge.www.example.com.", "example.com."),
            "_acme-challenge.www"
        );
    }

    #[test]
    fn test_derive_host_apex_is_empty() {
        // name.com's convention: empty host addresses the zone apex
        assert_eq!(derive_host("example.com.", "example.com."), "");
    }

    #[test]
    fn test_derive_host_outside_zone() {
        assert_eq!(derive_host("other.net.", "example.com."), "other.net");
    }

    #[test]
    fn test_unfqdn() {
        assert_eq!(unfqdn("example.com."), "example.com");
        assert_eq!(unfqdn("example.com"), "example.com");
    }

    #[test]
    fn test_empty_group_name_rejected() {
        let store = std::sync::Arc::new(attest_secrets::MemoryStore::new());
        let result = Solver::new("", store);
        assert!(matches!(result, Err(SolverError::ConfigValidation(_))));
    }
}
