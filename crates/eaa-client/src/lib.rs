//! Signed REST client for the EAA application-access management API.
//!
//! The API manages applications, connectors (agents), identity providers
//! with their directories and groups, certificates, points of presence and
//! per-application access-control services. Every request is signed with
//! the account credentials loaded from an edgerc file; lifecycle state is
//! server-owned and this client only reflects it.
//!
//! ```ignore
//! use eaa_client::{EaaClient, Edgerc};
//!
//! let credentials = Edgerc::load("~/.edgerc")?.credentials("default")?;
//! let client = EaaClient::new(credentials, "C-CONTRACT", None)?;
//! let pops = client.list_pops().await?;
//! ```

pub mod agents;
pub mod appdirectories;
pub mod appidp;
pub mod apps;
pub mod categories;
pub mod certificates;
pub mod config;
pub mod error;
pub mod http;
pub mod idp;
pub mod membership;
pub mod pops;
pub mod services;
pub mod signer;
pub mod types;

pub use config::{Credentials, Edgerc, DEFAULT_SECTION};
pub use error::{ApiProblem, EaaError, EaaResult};
pub use http::EaaClient;
pub use signer::Signer;
