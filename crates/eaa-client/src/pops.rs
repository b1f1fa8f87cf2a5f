//! Points of presence.

use serde::{Deserialize, Serialize};

use crate::error::{EaaError, EaaResult};
use crate::http::{EaaClient, POPS_URL};
use crate::types::Meta;

/// Point-of-presence mirror.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pop {
    pub created_at: String,
    pub description: Option<String>,
    pub facility: String,
    pub modified_at: String,
    pub name: String,
    pub pop_category: Vec<String>,
    pub pop_type: String,
    pub region: String,
    pub related_failover_pop: String,
    #[serde(rename = "related_failover_pop_name")]
    pub related_failover_name: String,
    pub uuid_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PopResponse {
    #[allow(dead_code)]
    meta: Meta,
    #[serde(rename = "objects")]
    pops: Vec<Pop>,
}

impl EaaClient {
    /// List shared points of presence (GET `…/pops?shared=true`). The
    /// endpoint is global: no contract scoping is applied. Placeholder
    /// rows without a region, name or id are dropped.
    pub async fn list_pops(&self) -> EaaResult<Vec<Pop>> {
        let response: PopResponse = self
            .get_global_json(&format!("{POPS_URL}?shared=true"))
            .await
            .map_err(|e| e.op(EaaError::PopsGet))?;
        Ok(response
            .pops
            .into_iter()
            .filter(|pop| !pop.region.is_empty() && !pop.name.is_empty() && !pop.uuid_url.is_empty())
            .collect())
    }

    /// Resolve a region to its point of presence, returning `(name, uuid)`.
    pub async fn pop_by_region(&self, pop_region: &str) -> EaaResult<(String, String)> {
        let pops = self.list_pops().await?;
        pops.into_iter()
            .find(|pop| pop.region == pop_region)
            .map(|pop| (pop.name, pop.uuid_url))
            .ok_or_else(|| EaaError::NameNotFound {
                entity: "pop region",
                name: pop_region.to_string(),
            })
    }
}
