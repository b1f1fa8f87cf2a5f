//! Provisioning error types.

use thiserror::Error;

use eaa_client::EaaError;

/// Error that can occur while reconciling declared resources.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Failure from the underlying API client.
    #[error(transparent)]
    Client(#[from] EaaError),

    /// The declared resource is malformed or incomplete.
    #[error("invalid resource definition: {0}")]
    InvalidResource(String),

    /// State mapping failed to serialize or deserialize.
    #[error("state mapping error: {0}")]
    State(String),
}

/// Result type for provisioning operations.
pub type ProvisionResult<T> = Result<T, ProvisionError>;
