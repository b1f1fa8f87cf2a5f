//! Desired-state resource definitions.
//!
//! These structs are the declarative face of the provisioner: a resource
//! file deserializes into [`ApplicationResource`], and the lifecycle
//! functions map it onto API call sequences.

use serde::{Deserialize, Serialize};

use eaa_client::apps::{AdvancedSettings, Server, TunnelInternalHost};
use eaa_client::types::{AppDomain, AppProfile, AppType, ClientAppMode, ServiceType};

/// Declared application.
///
/// Only `name` is required; every other field falls back to the API
/// defaults (enterprise app, http profile, tcp client mode, custom domain).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationResource {
    pub name: String,
    pub description: Option<String>,
    pub app_profile: Option<AppProfile>,
    pub app_type: Option<AppType>,
    pub client_app_mode: Option<ClientAppMode>,
    pub domain: Option<AppDomain>,

    pub host: Option<String>,
    pub bookmark_url: Option<String>,
    pub popregion: Option<String>,

    pub servers: Vec<Server>,
    pub tunnel_internal_hosts: Vec<TunnelInternalHost>,

    /// `"true"` enables authentication assignment on create.
    pub auth_enabled: Option<String>,
    /// Connector names to assign.
    pub agents: Vec<String>,
    /// Category name, resolved to its id at apply time.
    pub app_category: Option<String>,

    pub advanced_settings: Option<AdvancedSettings>,
    pub app_authentication: Option<AppAuthenticationConfig>,

    /// Service blocks; only the access-control type is reconciled.
    #[serde(rename = "service")]
    pub services: Vec<ServiceConfig>,
}

impl ApplicationResource {
    /// Whether authentication assignment is requested.
    #[must_use]
    pub fn auth_enabled(&self) -> bool {
        self.auth_enabled.as_deref() == Some("true")
    }
}

/// Declared authentication assignment: an IDP and its directories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppAuthenticationConfig {
    pub app_idp: String,
    pub app_directories: Vec<DirectoryConfig>,
}

/// One directory to attach, with optional group selection.
///
/// `app_groups` distinguishes three cases: absent (directory only),
/// present but empty (attach every group with inherited MFA), and a named
/// list (attach exactly those groups).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub name: String,
    pub enable_mfa: Option<bool>,
    pub app_groups: Option<Vec<GroupConfig>>,
}

/// One group to attach.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupConfig {
    pub name: String,
    pub enable_mfa: Option<String>,
}

/// Declared service block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub service_type: ServiceType,
    pub status: String,
    #[serde(default)]
    pub access_rule: Vec<AccessRuleConfig>,
}

/// Declared access-control rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessRuleConfig {
    pub name: String,
    /// `"on"`/`"off"`; anything else is treated as off.
    pub status: Option<String>,
    #[serde(rename = "rule")]
    pub rules: Vec<RuleSettingConfig>,
}

/// One condition of a declared rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettingConfig {
    pub operator: String,
    #[serde(rename = "type")]
    pub setting_type: String,
    pub value: String,
}
