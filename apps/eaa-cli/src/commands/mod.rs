//! Command implementations.

pub mod agents;
pub mod categories;
pub mod idps;
pub mod import;
pub mod pops;

use eaa_client::EaaClient;
use eaa_provision::ProviderConfig;

use crate::error::CliResult;
use crate::GlobalArgs;

/// Build a connected API client from the global options.
pub(crate) fn connect(global: &GlobalArgs) -> CliResult<EaaClient> {
    let config = ProviderConfig {
        edgerc: global.edgerc.clone(),
        section: global.section.clone(),
        contractid: global.contract_id.clone(),
        accountswitchkey: global.account_switch_key.clone(),
    };
    Ok(config.connect()?)
}
