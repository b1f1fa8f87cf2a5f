//! Application resource mirrors and CRUD operations.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::{EaaError, EaaResult};
use crate::http::{EaaClient, APPS_URL};
use crate::types::Meta;

/// Origin server entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub origin_host: String,
    pub orig_tls: bool,
    pub origin_port: i64,
    pub origin_protocol: String,
}

/// Internal host reachable through a tunnel application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunnelInternalHost {
    pub host: String,
    pub port_range: String,
    pub proto_type: i64,
}

/// Category reference carried on an application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppCategoryRef {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uuid_url: String,
}

/// G2O credential rotation response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct G2oResponse {
    pub g2o_enabled: String,
    pub g2o_nonce: String,
    pub g2o_key: String,
}

/// The managed subset of advanced settings, as written by configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_ssl_verification_enabled: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_cname_resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_authentication_enabled: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub g2o_enabled: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub g2o_nonce: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub g2o_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_wapp_read_timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_host_port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wildcard_internal_hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_access_allow: Option<String>,
}

/// Full advanced-settings mirror as the API returns it.
///
/// Updates overlay the managed [`AdvancedSettings`] delta onto this mirror
/// so unmanaged settings survive the PUT round-trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedSettingsComplete {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logout_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_host_port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wildcard_internal_hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_access_allow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_parameters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging_enabled: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_auth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wapp_auth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sso: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_only_cookie: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body_rewrite: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idp_idle_expiry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idp_max_expiry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https_sslv3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spdy_enabled: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub websocket_enabled: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden_app: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_cookie_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_auth_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_balancing_metric: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_http_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_http_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_http_host_header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_buffer_size_kb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_sticky: Option<String>,
    #[serde(
        rename = "session_sticky_cookie_maxage",
        skip_serializing_if = "Option::is_none"
    )]
    pub session_sticky_cookie_max_age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_sticky_server_cookie: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_phrase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_cookie_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_principle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_cert_validate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_cname_resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_audit_enabled: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mfa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_sticky_cookie: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_server_read_timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_conn_floor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_conn_ceil: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_conn_step: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_close_time_seconds: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<String>,
    #[serde(
        rename = "authenticated_server_request_limit",
        skip_serializing_if = "Option::is_none"
    )]
    pub authenticated_server_req_limit: Option<String>,
    #[serde(
        rename = "anonymous_server_request_limit",
        skip_serializing_if = "Option::is_none"
    )]
    pub anonymous_server_req_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authenticated_server_conn_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anonymous_server_conn_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_request_burst: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_rise: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_fall: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kerberos_negotiate_once: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inject_ajax_javascript: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentry_redirect_401: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_disable_clipboard: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preauth_enforce_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_mfa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_bypass_mfa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saas_enabled: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_cors: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors_origin_list: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors_method_list: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors_header_list: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors_support_credential: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors_max_age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keepalive_enable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keepalive_connection_pool: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keepalive_timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyed_keepalive_enable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keytab: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_cookie_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sla_object_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward_ticket_granting_ticket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_authentication_enabled: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsts_age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rdp_initial_program: Option<String>,
    #[serde(
        rename = "remote_spark_mapClipboard",
        skip_serializing_if = "Option::is_none"
    )]
    pub remote_spark_map_clipboard: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rdp_legacy_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_spark_audio: Option<String>,
    #[serde(
        rename = "remote_spark_mapPrinter",
        skip_serializing_if = "Option::is_none"
    )]
    pub remote_spark_map_printer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_spark_printer: Option<String>,
    #[serde(
        rename = "remote_spark_mapDisk",
        skip_serializing_if = "Option::is_none"
    )]
    pub remote_spark_map_disk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_spark_disk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_spark_recording: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_cert_auth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_cert_user_param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub g2o_enabled: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub g2o_nonce: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub g2o_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rdp_tls1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_exception_list: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceleration: Option<String>,
    #[serde(
        rename = "offload_onpremise_traffic",
        skip_serializing_if = "Option::is_none"
    )]
    pub offload_on_premise_traffic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_client_cert_auth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preauth_consent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mdc_enable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_host_enable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_host_fqdn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_host_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_host_content_rw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_ssl_verification_enabled: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_host_cookie_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_wapp_read_timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_ip_route: Option<String>,
}

/// Minimal payload for creating an application.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAppRequest {
    pub name: String,
    pub description: Option<String>,
    pub app_profile: i64,
    pub app_type: i64,
    pub client_app_mode: i64,
}

/// Application model used for update payloads and read-backs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Application {
    pub name: String,
    pub description: Option<String>,
    pub app_profile: i64,
    pub app_type: i64,
    pub client_app_mode: i64,

    pub host: Option<String>,
    pub bookmark_url: String,
    pub app_logo: Option<String>,

    pub orig_tls: String,
    pub origin_host: Option<String>,
    pub origin_port: i64,
    pub tunnel_internal_hosts: Vec<TunnelInternalHost>,
    pub servers: Vec<Server>,

    pub pop: String,
    #[serde(rename = "popName")]
    pub pop_name: String,
    #[serde(rename = "popRegion")]
    pub pop_region: String,

    pub auth_type: i64,
    pub cert: Option<String>,
    pub auth_enabled: String,
    pub ssl_ca_cert: String,

    pub app_deployed: bool,
    pub app_operational: i64,
    pub app_status: i64,
    pub cname: Option<String>,
    pub status: i64,

    pub advanced_settings: AdvancedSettingsComplete,
    pub app_category: AppCategoryRef,

    pub uuid_url: String,
}

impl Application {
    /// Seed an application model from a create/get response.
    #[must_use]
    pub fn from_response(response: &ApplicationResponse) -> Self {
        Self {
            name: response.name.clone(),
            description: response.description.clone(),
            app_profile: response.app_profile,
            app_type: response.app_type,
            client_app_mode: response.client_app_mode,
            host: response.host.clone(),
            bookmark_url: response.bookmark_url.clone(),
            app_logo: response.app_logo.clone(),
            orig_tls: response.orig_tls.clone(),
            origin_host: response.origin_host.clone(),
            origin_port: response.origin_port,
            tunnel_internal_hosts: response.tunnel_internal_hosts.clone(),
            servers: response.servers.clone(),
            pop: response.pop.clone(),
            pop_name: response.pop_name.clone(),
            pop_region: response.pop_region.clone(),
            auth_type: response.auth_type,
            cert: response.cert.clone(),
            auth_enabled: response.auth_enabled.clone(),
            ssl_ca_cert: response.ssl_ca_cert.clone(),
            app_deployed: response.app_deployed,
            app_operational: response.app_operational,
            app_status: response.app_status,
            cname: response.cname.clone(),
            status: response.status,
            advanced_settings: response.advanced_settings.clone(),
            app_category: response.app_category.clone(),
            uuid_url: response.uuid_url.clone(),
        }
    }
}

/// Update payload: the application model plus the stringified domain code.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplicationUpdateRequest {
    #[serde(flatten)]
    pub application: Application,
    pub domain: String,
}

/// Read model: the application plus the numeric domain code.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplicationDataModel {
    #[serde(flatten)]
    pub application: Application,
    pub domain: i64,
}

/// Full application response mirror.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplicationResponse {
    pub advanced_settings: AdvancedSettingsComplete,
    pub app_category: AppCategoryRef,

    pub app_deployed: bool,
    pub app_logo: Option<String>,
    pub app_operational: i64,
    pub app_profile: i64,
    pub app_profile_id: String,
    pub app_status: i64,
    pub app_type: i64,
    pub application_access_group: Value,
    pub auth_agent: Value,
    pub auth_enabled: String,
    pub auth_type: i64,
    pub bookmark_url: String,
    pub cert: Option<String>,
    pub client_app_mode: i64,
    pub cname: Option<String>,
    pub connector_pools: Vec<Value>,
    pub created_at: String,
    pub data_agent: Value,
    pub description: Option<String>,
    pub domain_suffix: String,
    #[serde(rename = "failover_popName")]
    pub failover_pop_name: String,
    pub fqdn_bridge_enabled: bool,
    pub host: Option<String>,
    pub modified_at: String,
    pub name: String,
    pub oidc: bool,
    pub oidc_settings: Value,
    pub orig_tls: String,
    pub origin_host: Option<String>,
    pub origin_port: i64,
    pub pop: String,
    #[serde(rename = "popName")]
    pub pop_name: String,
    #[serde(rename = "popRegion")]
    pub pop_region: String,
    pub rdp_version: String,
    pub resource: String,
    pub resource_uri: Value,
    pub saml: bool,
    pub saml_settings: Vec<Value>,
    pub servers: Vec<Server>,
    pub sites: Vec<Value>,
    pub ssl_ca_cert: String,
    pub status: i64,
    pub supported_client_version: i64,
    pub tls_suite_name: String,
    pub tunnel_internal_hosts: Vec<TunnelInternalHost>,
    pub uuid_url: String,
    pub wsfed: bool,
    pub wsfed_settings: Vec<Value>,
}

/// Application listing envelope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppsResponse {
    pub meta: Meta,
    #[serde(rename = "objects")]
    pub applications: Vec<ApplicationDataModel>,
}

impl EaaClient {
    /// Create an application (POST `…/apps`).
    pub async fn create_application(
        &self,
        request: &CreateAppRequest,
    ) -> EaaResult<ApplicationResponse> {
        let response: ApplicationResponse = self
            .post_json(APPS_URL, request)
            .await
            .map_err(|e| e.op(EaaError::AppCreate))?;
        info!(name = %request.name, uuid_url = %response.uuid_url, "application created");
        Ok(response)
    }

    /// Fetch an application by its server-assigned id (GET `…/apps/{id}`).
    pub async fn get_application(&self, uuid_url: &str) -> EaaResult<ApplicationDataModel> {
        self.get_json(&format!("{APPS_URL}/{uuid_url}"))
            .await
            .map_err(|e| e.op(EaaError::AppGet))
    }

    /// List all applications visible to the contract (GET `…/apps`).
    pub async fn list_applications(&self) -> EaaResult<Vec<ApplicationDataModel>> {
        let response: AppsResponse = self
            .get_json(APPS_URL)
            .await
            .map_err(|e| e.op(EaaError::AppGet))?;
        Ok(response.applications)
    }

    /// Replace an application's full definition (PUT `…/apps/{id}`).
    pub async fn update_application(&self, request: &ApplicationUpdateRequest) -> EaaResult<()> {
        let uuid_url = &request.application.uuid_url;
        self.put_unit(&format!("{APPS_URL}/{uuid_url}"), request)
            .await
            .map_err(|e| e.op(EaaError::AppUpdate))?;
        info!(uuid_url = %uuid_url, "application updated");
        Ok(())
    }

    /// Delete an application (DELETE `…/apps/{id}`).
    pub async fn delete_application(&self, uuid_url: &str) -> EaaResult<()> {
        self.delete_unit(&format!("{APPS_URL}/{uuid_url}"))
            .await
            .map_err(|e| e.op(EaaError::AppDelete))
    }

    /// Deploy an application to its point of presence
    /// (POST `…/apps/{id}/deploy`).
    pub async fn deploy_application(&self, uuid_url: &str, deploy_note: &str) -> EaaResult<()> {
        let body = serde_json::json!({ "deploy_note": deploy_note });
        self.post_unit(&format!("{APPS_URL}/{uuid_url}/deploy"), &body)
            .await
            .map_err(|e| e.op(EaaError::Deploy))?;
        info!(uuid_url = %uuid_url, "application deploy requested");
        Ok(())
    }

    /// Rotate G2O credentials for an application (POST `…/apps/{id}/g2o`).
    pub async fn rotate_g2o(&self, uuid_url: &str) -> EaaResult<G2oResponse> {
        self.post_empty_json(&format!("{APPS_URL}/{uuid_url}/g2o"))
            .await
            .map_err(|e| e.op(EaaError::AppUpdate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_flattens_application_fields() {
        let request = ApplicationUpdateRequest {
            application: Application {
                name: "intranet".into(),
                uuid_url: "abc-123".into(),
                ..Application::default()
            },
            domain: "1".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["name"], "intranet");
        assert_eq!(value["uuid_url"], "abc-123");
        assert_eq!(value["domain"], "1");
    }

    #[test]
    fn advanced_settings_skip_unset_fields() {
        let settings = AdvancedSettings {
            g2o_enabled: Some("true".into()),
            ..AdvancedSettings::default()
        };
        let value = serde_json::to_value(&settings).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["g2o_enabled"], "true");
    }

    #[test]
    fn complete_settings_round_trip_wire_names() {
        let json = r#"{
            "session_sticky_cookie_maxage": "30",
            "remote_spark_mapClipboard": "on",
            "authenticated_server_request_limit": "100",
            "offload_onpremise_traffic": "false"
        }"#;
        let settings: AdvancedSettingsComplete = serde_json::from_str(json).unwrap();
        assert_eq!(settings.session_sticky_cookie_max_age.as_deref(), Some("30"));
        assert_eq!(settings.remote_spark_map_clipboard.as_deref(), Some("on"));

        let back = serde_json::to_value(&settings).unwrap();
        assert_eq!(back["session_sticky_cookie_maxage"], "30");
        assert_eq!(back["remote_spark_mapClipboard"], "on");
        assert_eq!(back["authenticated_server_request_limit"], "100");
        assert_eq!(back["offload_onpremise_traffic"], "false");
    }

    #[test]
    fn application_seeds_from_response() {
        let response = ApplicationResponse {
            name: "intranet".into(),
            app_profile: 1,
            app_type: 4,
            client_app_mode: 2,
            uuid_url: "abc-123".into(),
            auth_enabled: "true".into(),
            ..ApplicationResponse::default()
        };
        let app = Application::from_response(&response);
        assert_eq!(app.name, "intranet");
        assert_eq!(app.app_type, 4);
        assert_eq!(app.uuid_url, "abc-123");
        assert_eq!(app.auth_enabled, "true");
    }

    #[test]
    fn data_model_parses_domain_alongside_flattened_fields() {
        let json = r#"{"name":"intranet","uuid_url":"abc","domain":2,"app_profile":1}"#;
        let model: ApplicationDataModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.domain, 2);
        assert_eq!(model.application.name, "intranet");
    }
}
