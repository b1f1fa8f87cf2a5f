//! Application lifecycle orchestration.
//!
//! Each operation is a straight-line sequence of API calls with early
//! returns: create, then assign, then update, then deploy, then read the
//! server state back. Lifecycle state is server-owned; `read` only
//! reflects it.

use tracing::{info, warn};

use eaa_client::appdirectories::{GroupAssignment, ENABLE_MFA_INHERIT};
use eaa_client::apps::{
    AdvancedSettings, AdvancedSettingsComplete, AppCategoryRef, Application,
    ApplicationUpdateRequest, CreateAppRequest, Server, TunnelInternalHost,
};
use eaa_client::membership::AppAuthentication;
use eaa_client::types::{AppDomain, AppProfile, AppType, ClientAppMode};
use eaa_client::EaaClient;

use crate::error::{ProvisionError, ProvisionResult};
use crate::resource::{AppAuthenticationConfig, ApplicationResource};
use crate::state::{difference_ignore_case, merge_settings};
use crate::access;

const DEPLOY_NOTE: &str = "deploying application from declarative configuration";

/// Server state of an application, mapped back to configuration terms.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ApplicationState {
    pub uuid_url: String,
    pub name: String,
    pub description: Option<String>,
    pub app_profile: Option<AppProfile>,
    pub app_type: Option<AppType>,
    pub client_app_mode: Option<ClientAppMode>,
    pub domain: Option<AppDomain>,

    pub host: Option<String>,
    pub bookmark_url: Option<String>,
    pub origin_host: Option<String>,
    pub orig_tls: Option<String>,
    pub origin_port: Option<i64>,

    pub pop: String,
    pub popname: String,
    pub popregion: String,
    pub cname: Option<String>,
    pub auth_enabled: String,

    pub servers: Vec<Server>,
    pub tunnel_internal_hosts: Vec<TunnelInternalHost>,
    pub advanced_settings: AdvancedSettings,

    pub agents: Vec<String>,
    pub app_authentication: Option<AppAuthentication>,
}

/// Create an application from its declared state and deploy it.
pub async fn create(
    client: &EaaClient,
    resource: &ApplicationResource,
) -> ProvisionResult<ApplicationState> {
    let request = build_create_request(resource)?;
    let response = client.create_application(&request).await?;
    let app = Application::from_response(&response);
    let app_uuid_url = app.uuid_url.clone();

    if !resource.agents.is_empty() {
        client.assign_agents(&app_uuid_url, &resource.agents).await?;
        info!(app = %app_uuid_url, "connectors assigned on create");
    }

    let update_request = build_update_request(client, app, resource).await?;
    client.update_application(&update_request).await?;

    if resource.auth_enabled() {
        if let Some(authentication) = &resource.app_authentication {
            apply_authentication(client, &app_uuid_url, authentication).await?;
        }
    }

    if !resource.services.is_empty() {
        access::apply_access_services(client, &app_uuid_url, &resource.services).await?;
    }

    client.deploy_application(&app_uuid_url, DEPLOY_NOTE).await?;
    read(client, &app_uuid_url).await
}

/// Read an application's server state.
pub async fn read(client: &EaaClient, uuid_url: &str) -> ProvisionResult<ApplicationState> {
    let model = client.get_application(uuid_url).await?;
    let app = model.application;

    let app_profile = decode_or_warn(AppProfile::from_code(app.app_profile), "app_profile");
    let app_type = decode_or_warn(AppType::from_code(app.app_type), "app_type");
    let client_app_mode =
        decode_or_warn(ClientAppMode::from_code(app.client_app_mode), "client_app_mode");
    let domain = decode_or_warn(AppDomain::from_code(model.domain), "domain");

    let is_tunnel = app_type == Some(AppType::Tunnel);

    let (origin_host, orig_tls, origin_port) = match app.origin_host.as_deref() {
        Some(host) if !host.is_empty() => (
            app.origin_host.clone(),
            Some(app.orig_tls.clone()),
            Some(app.origin_port),
        ),
        _ => (None, None, None),
    };

    let agents = match client.app_agent_names(uuid_url).await {
        Ok(names) => names,
        Err(error) => {
            warn!(app = %uuid_url, %error, "could not read assigned connectors");
            Vec::new()
        }
    };

    let app_authentication = if app.auth_enabled == "true" {
        match client.app_authentication(uuid_url).await {
            Ok(authentication) => Some(authentication),
            Err(error) => {
                warn!(app = %uuid_url, %error, "could not read authentication assignments");
                None
            }
        }
    } else {
        None
    };

    Ok(ApplicationState {
        uuid_url: app.uuid_url,
        name: app.name,
        description: app.description,
        app_profile,
        app_type,
        client_app_mode,
        domain,
        host: app.host,
        bookmark_url: (!app.bookmark_url.is_empty()).then_some(app.bookmark_url),
        origin_host,
        orig_tls,
        origin_port,
        pop: app.pop,
        popname: app.pop_name,
        popregion: app.pop_region,
        cname: app.cname,
        auth_enabled: app.auth_enabled,
        servers: app.servers,
        tunnel_internal_hosts: if is_tunnel {
            app.tunnel_internal_hosts
        } else {
            Vec::new()
        },
        advanced_settings: managed_settings(&app.advanced_settings, is_tunnel),
        agents,
        app_authentication,
    })
}

/// Update an application to match its declared state and redeploy it.
pub async fn update(
    client: &EaaClient,
    uuid_url: &str,
    resource: &ApplicationResource,
) -> ProvisionResult<ApplicationState> {
    let model = client.get_application(uuid_url).await?;
    let app = model.application;

    // Reconcile connector assignment against the declared set.
    let current_agents = client.app_agent_names(uuid_url).await?;
    let to_assign = difference_ignore_case(&resource.agents, &current_agents);
    let to_unassign = difference_ignore_case(&current_agents, &resource.agents);
    if !to_assign.is_empty() {
        client.assign_agents(uuid_url, &to_assign).await?;
    }
    if !to_unassign.is_empty() {
        client.unassign_agents(uuid_url, &to_unassign).await?;
    }

    let update_request = build_update_request(client, app, resource).await?;
    client.update_application(&update_request).await?;

    if !resource.services.is_empty() {
        access::apply_access_services(client, uuid_url, &resource.services).await?;
    }

    client.deploy_application(uuid_url, DEPLOY_NOTE).await?;
    read(client, uuid_url).await
}

/// Delete an application.
pub async fn delete(client: &EaaClient, uuid_url: &str) -> ProvisionResult<()> {
    client.delete_application(uuid_url).await?;
    info!(app = %uuid_url, "application deleted");
    Ok(())
}

fn build_create_request(resource: &ApplicationResource) -> ProvisionResult<CreateAppRequest> {
    if resource.name.is_empty() {
        return Err(ProvisionError::InvalidResource("name is required".into()));
    }

    let app_type = resource.app_type.unwrap_or(AppType::Enterprise);
    let app_profile = resource.app_profile.unwrap_or(AppProfile::Http);
    let client_app_mode = resource.client_app_mode.unwrap_or(ClientAppMode::Tcp);

    Ok(CreateAppRequest {
        name: resource.name.clone(),
        description: resource.description.clone(),
        app_profile: app_profile.code(),
        app_type: app_type.code(),
        client_app_mode: client_app_mode.code(),
    })
}

/// Overlay the declared state onto a fetched application model, resolving
/// name references (category, pop region) and reconciling advanced
/// settings, including the G2O credential flow.
async fn build_update_request(
    client: &EaaClient,
    mut app: Application,
    resource: &ApplicationResource,
) -> ProvisionResult<ApplicationUpdateRequest> {
    app.tunnel_internal_hosts = resource.tunnel_internal_hosts.clone();
    app.servers = resource.servers.clone();

    if let Some(category) = resource.app_category.as_deref().filter(|c| !c.is_empty()) {
        match client.app_category_uuid(category).await {
            Ok(uuid_url) => {
                app.app_category = AppCategoryRef {
                    name: category.to_string(),
                    uuid_url,
                };
            }
            Err(error) => {
                warn!(%category, %error, "app category lookup failed, leaving category unset");
            }
        }
    }

    if let Some(configured) = &resource.advanced_settings {
        let mut delta = configured.clone();
        if delta.g2o_enabled.as_deref() == Some("true") {
            let g2o = client.rotate_g2o(&app.uuid_url).await?;
            delta.g2o_nonce = Some(g2o.g2o_nonce);
            delta.g2o_key = Some(g2o.g2o_key);
        }
        merge_settings(&mut app.advanced_settings, &delta)?;
    }

    if let Some(bookmark_url) = &resource.bookmark_url {
        app.bookmark_url = bookmark_url.clone();
    }
    if let Some(host) = &resource.host {
        app.host = Some(host.clone());
    }
    if let Some(auth_enabled) = &resource.auth_enabled {
        app.auth_enabled = auth_enabled.clone();
    }

    if let Some(region) = resource.popregion.as_deref().filter(|r| !r.is_empty()) {
        app.pop_region = region.to_string();
        match client.pop_by_region(region).await {
            Ok((pop_name, pop_uuid)) => {
                app.pop_name = pop_name;
                app.pop = pop_uuid;
            }
            Err(error) => {
                warn!(%region, %error, "pop region lookup failed, keeping current pop");
            }
        }
    }

    let domain = resource.domain.unwrap_or(AppDomain::Custom);
    Ok(ApplicationUpdateRequest {
        application: app,
        domain: domain.code().to_string(),
    })
}

/// Assign the declared IDP, directories and groups to an application.
async fn apply_authentication(
    client: &EaaClient,
    app_uuid_url: &str,
    authentication: &AppAuthenticationConfig,
) -> ProvisionResult<()> {
    if authentication.app_idp.is_empty() {
        return Err(ProvisionError::InvalidResource(
            "app_authentication.app_idp is required".into(),
        ));
    }

    let idp = client.idp_by_name(&authentication.app_idp).await?;
    client.assign_idp(app_uuid_url, &idp.uuid_url).await?;
    info!(app = %app_uuid_url, idp = %idp.name, "IDP assigned on create");

    for directory_config in &authentication.app_directories {
        let directory = match idp.directory_by_name(&directory_config.name) {
            Ok(directory) => directory,
            Err(_) => {
                warn!(directory = %directory_config.name, "directory does not exist, skipping");
                continue;
            }
        };

        client
            .assign_directory(app_uuid_url, &directory.uuid, directory_config.enable_mfa)
            .await?;

        let Some(group_configs) = &directory_config.app_groups else {
            continue;
        };

        let assignments: Vec<GroupAssignment> = if group_configs.is_empty() {
            // No groups named: attach every group with inherited MFA.
            directory
                .groups
                .iter()
                .map(|group| GroupAssignment {
                    uuid_url: group.uuid_url.clone(),
                    enable_mfa: Some(ENABLE_MFA_INHERIT.to_string()),
                })
                .collect()
        } else {
            group_configs
                .iter()
                .filter(|config| !config.name.is_empty())
                .filter_map(|config| {
                    directory
                        .group_by_name(&config.name)
                        .ok()
                        .map(|group| GroupAssignment {
                            uuid_url: group.uuid_url.clone(),
                            enable_mfa: config.enable_mfa.clone(),
                        })
                })
                .collect()
        };

        client.assign_groups(app_uuid_url, &assignments).await?;
    }
    Ok(())
}

/// Project the managed subset out of the complete settings mirror.
/// Tunnel-only settings are included only for tunnel applications.
fn managed_settings(complete: &AdvancedSettingsComplete, is_tunnel: bool) -> AdvancedSettings {
    let mut settings = AdvancedSettings {
        g2o_enabled: complete.g2o_enabled.clone(),
        g2o_nonce: complete.g2o_nonce.clone(),
        g2o_key: complete.g2o_key.clone(),
        is_ssl_verification_enabled: complete.is_ssl_verification_enabled.clone(),
        ignore_cname_resolution: complete.ignore_cname_resolution.clone(),
        ..AdvancedSettings::default()
    };
    if is_tunnel {
        settings.x_wapp_read_timeout = complete.x_wapp_read_timeout.clone();
        settings.internal_hostname = complete.internal_hostname.clone();
        settings.internal_host_port = complete.internal_host_port.clone();
        settings.wildcard_internal_hostname = complete.wildcard_internal_hostname.clone();
        settings.ip_access_allow = complete.ip_access_allow.clone();
    }
    settings
}

fn decode_or_warn<T>(decoded: Option<T>, field: &'static str) -> Option<T> {
    if decoded.is_none() {
        warn!(field, "unknown wire code, leaving unset");
    }
    decoded
}
