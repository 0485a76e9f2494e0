//! Secret store abstraction with pluggable backends
//!
//! This crate provides a unified interface for fetching named secrets, where a
//! secret is a map of keys to byte values addressed by `(namespace, name)`:
//!
//! - **In-memory** ([`MemoryStore`]): secrets registered by the process itself,
//!   used by tests and local development
//! - **Environment variables** ([`EnvStore`]): each key of the secret is read
//!   from a `PREFIX_NAMESPACE_NAME_KEY` variable
//!
//! A production deployment plugs in its own [`SecretStore`] implementation
//! backed by whatever the platform provides (e.g. cluster secrets); this crate
//! only fixes the contract. Callers own the fetch deadline — implementations
//! are free to block for as long as their backend does.
//!
//! # Example
//!
//! ```rust,ignore
//! use attest_secrets::{MemoryStore, SecretStore};
//!
//! let store = MemoryStore::new();
//! store.insert_pairs("dns", "provider-creds", [("username", "acme"), ("token", "t0k3n")]);
//! let secret = store.get("dns", "provider-creds").await?;
//! ```

mod backends;
mod error;
mod store;

pub use backends::env::EnvStore;
pub use backends::memory::MemoryStore;
pub use error::SecretError;
pub use store::{SecretMap, SecretStore};
