//! Connector (agent) mirrors and app assignment operations.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{EaaError, EaaResult};
use crate::http::{EaaClient, AGENTS_URL, APPS_URL};
use crate::types::Meta;

/// Connector entity mirror.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Connector {
    pub name: String,
    pub uuid_url: String,
    pub activation_code: Option<String>,
    pub agent_infra_type: i64,
    pub agent_type: i64,
    pub agent_version: Option<String>,
    pub cpu: Option<String>,
    pub data_service: bool,
    pub debug_channel_permitted: bool,
    pub description: Option<String>,
    pub dhcp: String,
    pub disk_size: Option<String>,
    pub dns_server: Option<String>,
    pub down_apps_count: i64,
    pub down_dir_count: i64,
    pub download_url: Option<String>,
    pub gateway: Option<String>,
    pub geo_location: Option<String>,
    pub hostname: Option<String>,
    pub ip_addr: Option<String>,
    pub last_checkin: Option<String>,
    pub load_status: Option<String>,
    pub mac: Option<String>,
    pub manual_override: bool,
    pub os_upgrades_up_to_date: bool,
    pub os_version: Option<String>,
    pub package: i64,
    pub policy: String,
    pub private_ip: Option<String>,
    pub public_ip: Option<String>,
    pub ram_size: Option<String>,
    pub reach: i64,
    pub region: Option<String>,
    pub state: i64,
    pub status: i64,
    pub subnet: Option<String>,
    #[serde(rename = "tz")]
    pub timezone: Option<String>,
    pub unification_status: i64,
    pub up_apps_count: i64,
    pub up_dir_count: i64,
    pub uuid: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConnectorResponse {
    #[allow(dead_code)]
    meta: Meta,
    #[serde(rename = "objects")]
    connectors: Vec<Connector>,
}

/// One entry of an app's assigned-agents listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AppAgentEntry {
    agent: AgentSummary,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AgentSummary {
    name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AppAgentsResponse {
    #[serde(rename = "objects")]
    agents: Vec<AppAgentEntry>,
}

#[derive(Debug, Serialize)]
struct AgentRef<'a> {
    uuid_url: &'a str,
}

#[derive(Debug, Serialize)]
struct AssignAgentsRequest<'a> {
    agents: Vec<AgentRef<'a>>,
}

#[derive(Debug, Serialize)]
struct UnassignAgentsRequest {
    agents: Vec<String>,
}

impl EaaClient {
    /// List connectors (GET `…/agents`), dropping placeholder rows without
    /// a name or id.
    pub async fn list_agents(&self) -> EaaResult<Vec<Connector>> {
        let response: ConnectorResponse = self
            .get_json(AGENTS_URL)
            .await
            .map_err(|e| e.op(EaaError::AgentsGet))?;
        Ok(response
            .connectors
            .into_iter()
            .filter(|c| !c.name.is_empty() && !c.uuid_url.is_empty())
            .collect())
    }

    /// Resolve connector names to ids. Unknown names are skipped.
    pub async fn agent_uuids(&self, agent_names: &[String]) -> EaaResult<Vec<String>> {
        let agents = self.list_agents().await?;
        let mut uuids = Vec::with_capacity(agent_names.len());
        for name in agent_names {
            if let Some(agent) = agents.iter().find(|a| &a.name == name) {
                uuids.push(agent.uuid_url.clone());
            }
        }
        Ok(uuids)
    }

    /// Assign connectors to an application by name
    /// (POST `…/apps/{id}/agents`). Assigning an empty set is a no-op.
    pub async fn assign_agents(&self, app_uuid_url: &str, agent_names: &[String]) -> EaaResult<()> {
        let uuids = self
            .agent_uuids(agent_names)
            .await
            .map_err(|e| e.op(EaaError::AssignAgents))?;
        if uuids.is_empty() {
            warn!(app = %app_uuid_url, "no connectors to assign");
            return Ok(());
        }

        let request = AssignAgentsRequest {
            agents: uuids.iter().map(|u| AgentRef { uuid_url: u }).collect(),
        };
        self.post_unit(&format!("{APPS_URL}/{app_uuid_url}/agents"), &request)
            .await
            .map_err(|e| e.op(EaaError::AssignAgents))?;
        info!(app = %app_uuid_url, count = uuids.len(), "connectors assigned");
        Ok(())
    }

    /// Unassign connectors from an application by name
    /// (POST `…/apps/{id}/agents?method=delete`).
    pub async fn unassign_agents(
        &self,
        app_uuid_url: &str,
        agent_names: &[String],
    ) -> EaaResult<()> {
        let uuids = self
            .agent_uuids(agent_names)
            .await
            .map_err(|e| e.op(EaaError::UnassignAgents))?;
        if uuids.is_empty() {
            warn!(app = %app_uuid_url, "no connectors to unassign");
            return Ok(());
        }

        let request = UnassignAgentsRequest { agents: uuids };
        self.post_unit(
            &format!("{APPS_URL}/{app_uuid_url}/agents?method=delete"),
            &request,
        )
        .await
        .map_err(|e| e.op(EaaError::UnassignAgents))?;
        info!(app = %app_uuid_url, "connectors unassigned");
        Ok(())
    }

    /// Names of the connectors assigned to an application, sorted for
    /// stable comparison (GET `…/apps/{id}/agents`).
    pub async fn app_agent_names(&self, app_uuid_url: &str) -> EaaResult<Vec<String>> {
        let response: AppAgentsResponse = self
            .get_json(&format!("{APPS_URL}/{app_uuid_url}/agents"))
            .await
            .map_err(|e| e.op(EaaError::AgentsGet))?;
        let mut names: Vec<String> = response
            .agents
            .into_iter()
            .map(|entry| entry.agent.name)
            .collect();
        names.sort();
        Ok(names)
    }
}
