use thiserror::Error;

/// Errors that can occur while fetching a secret
#[derive(Debug, Error)]
pub enum SecretError {
    /// No secret exists under the given namespace/name
    #[error("secret {namespace}/{name} not found")]
    NotFound { namespace: String, name: String },

    /// Backend runtime error (unreachable store, permission failure, ...)
    #[error("{backend} error: {message}")]
    Backend { backend: String, message: String },
}

impl SecretError {
    /// Create a not-found error
    pub fn not_found(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Create a backend error
    pub fn backend(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            backend: backend.into(),
            message: message.into(),
        }
    }
}
