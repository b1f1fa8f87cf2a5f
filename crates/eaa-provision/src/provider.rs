//! Provider configuration: credentials file, section and contract scoping.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use eaa_client::{EaaClient, Edgerc, DEFAULT_SECTION};

use crate::error::ProvisionResult;

/// Provider block: where the credentials live and which contract to act on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Path to the edgerc credentials file.
    pub edgerc: PathBuf,
    /// Credentials section within the file.
    #[serde(default = "default_section")]
    pub section: String,
    /// Contract the provider operates on.
    pub contractid: String,
    /// Optional account switch key.
    #[serde(default)]
    pub accountswitchkey: Option<String>,
}

fn default_section() -> String {
    DEFAULT_SECTION.to_string()
}

impl ProviderConfig {
    /// Load and validate the credentials file and build the API client.
    pub fn connect(&self) -> ProvisionResult<EaaClient> {
        let credentials = Edgerc::load(&self.edgerc)?.credentials(&self.section)?;
        let client = EaaClient::new(
            credentials,
            self.contractid.clone(),
            self.accountswitchkey.clone(),
        )?;
        Ok(client)
    }
}
