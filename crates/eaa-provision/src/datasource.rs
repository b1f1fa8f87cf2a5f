//! Read-only lookups: points of presence, connectors, app categories and
//! identity providers.

use eaa_client::agents::Connector;
use eaa_client::categories::AppCategory;
use eaa_client::idp::IdpData;
use eaa_client::pops::Pop;
use eaa_client::EaaClient;

use crate::error::ProvisionResult;

/// List points of presence, optionally narrowed to one region.
pub async fn pops(client: &EaaClient, region: Option<&str>) -> ProvisionResult<Vec<Pop>> {
    let mut pops = client.list_pops().await?;
    if let Some(region) = region {
        pops.retain(|pop| pop.region == region);
    }
    Ok(pops)
}

/// List connectors, optionally narrowed to one name.
pub async fn agents(client: &EaaClient, name: Option<&str>) -> ProvisionResult<Vec<Connector>> {
    let mut agents = client.list_agents().await?;
    if let Some(name) = name {
        agents.retain(|agent| agent.name == name);
    }
    Ok(agents)
}

/// List application categories, optionally narrowed to one name.
pub async fn app_categories(
    client: &EaaClient,
    name: Option<&str>,
) -> ProvisionResult<Vec<AppCategory>> {
    let mut categories = client.list_app_categories().await?;
    if let Some(name) = name {
        categories.retain(|category| category.name == name);
    }
    Ok(categories)
}

/// List identity providers with directories expanded, optionally narrowed
/// to one name.
pub async fn idps(client: &EaaClient, name: Option<&str>) -> ProvisionResult<Vec<IdpData>> {
    let mut idps = client.list_idps().await?;
    if let Some(name) = name {
        idps.retain(|idp| idp.name == name);
    }
    Ok(idps)
}
