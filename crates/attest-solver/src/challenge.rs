//! Inbound challenge request type

use serde::{Deserialize, Serialize};

/// One DNS-01 challenge as delivered by the ACME orchestration layer.
///
/// Immutable for the duration of a present/cleanup call; the solver never
/// persists it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRequest {
    /// Host being validated, absolute with trailing dot
    /// (e.g. `_acme-challenge.example.com.`)
    #[serde(rename = "resolvedFQDN")]
    pub resolved_fqdn: String,

    /// Zone owning the host, absolute with trailing dot (e.g. `example.com.`)
    pub resolved_zone: String,

    /// Expected TXT record value proving control of the domain
    pub key: String,

    /// Opaque per-issuer solver configuration, decoded by
    /// [`crate::resolve_credentials`]
    #[serde(default)]
    pub config: Option<serde_json::Value>,
}
