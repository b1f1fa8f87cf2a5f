//! CLI error types and exit codes.
//!
//! Exit codes: 1 general, 2 configuration, 3 network, 4 validation,
//! 5 API error.

use thiserror::Error;

use eaa_client::EaaError;
use eaa_provision::ProvisionError;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Client(#[from] EaaError),

    #[error(transparent)]
    Provision(#[from] ProvisionError),

    #[error("I/O error: {0}")]
    Io(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 2,
            CliError::Client(EaaError::Network(_))
            | CliError::Provision(ProvisionError::Client(EaaError::Network(_))) => 3,
            CliError::Provision(ProvisionError::InvalidResource(_)) => 4,
            CliError::Client(_) | CliError::Provision(_) => 5,
            CliError::Io(_) => 1,
        }
    }

    pub fn print(&self) {
        eprintln!("Error: {self}");
    }
}
