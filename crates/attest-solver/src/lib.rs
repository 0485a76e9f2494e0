//! ACME DNS-01 challenge solver for the name.com record API
//!
//! This library implements the provider-specific half of DNS-01 domain
//! validation: given a challenge request from an ACME orchestration layer, it
//! provisions the validation TXT record at name.com ([`Solver::present`]) and
//! later locates and deletes that exact record ([`Solver::cleanup`]).
//!
//! The webhook transport that delivers challenge requests over the network,
//! and construction of a cluster-backed secret store, are deliberately out of
//! scope; they plug in at the [`attest_secrets::SecretStore`] and
//! [`RecordClient`] boundaries.

mod challenge;
mod config;
mod error;
mod namecom;
mod provider;
mod solver;

// Re-export public types
pub use challenge::ChallengeRequest;
pub use config::{
    resolve_credentials, Credentials, SecretRef, SolverConfig, DEFAULT_SECRET_NAMESPACE,
    SECRET_FETCH_TIMEOUT,
};
pub use error::SolverError;
pub use namecom::NameComClient;
pub use provider::{NewRecord, ProviderError, Record, RecordClient, TXT_TYPE};
pub use solver::{derive_host, ClientFactory, Solver, SOLVER_NAME, TXT_RECORD_TTL};
