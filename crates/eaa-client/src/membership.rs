//! Read-back of an application's authentication assignments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{EaaError, EaaResult};
use crate::http::{EaaClient, APPS_URL};
use crate::types::Meta;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppMembershipRef {
    pub app_uuid_url: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IdpMembershipRef {
    pub idp_uuid_url: String,
    pub name: String,
}

/// IDP membership row for an application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppIdpMembership {
    pub app: AppMembershipRef,
    pub enable_mfa: String,
    pub idp: IdpMembershipRef,
    pub resource: String,
    pub uuid_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AppIdpMembershipResponse {
    #[allow(dead_code)]
    meta: Meta,
    #[serde(rename = "objects")]
    memberships: Vec<AppIdpMembership>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DirectoryMembershipRef {
    pub directory_uuid_url: String,
    pub name: String,
}

/// Directory membership row for an application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppDirectoryMembership {
    pub app: AppMembershipRef,
    pub directory: DirectoryMembershipRef,
    pub enable_mfa: String,
    pub resource: String,
    pub uuid_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AppDirectoryMembershipResponse {
    #[allow(dead_code)]
    meta: Meta,
    #[serde(rename = "objects")]
    memberships: Vec<AppDirectoryMembership>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GroupMembershipRef {
    pub dir_name: String,
    pub dir_uuid_url: String,
    pub group_uuid_url: String,
    #[serde(rename = "name")]
    pub group_name: String,
}

/// Group membership row for an application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppGroupMembership {
    pub app: AppMembershipRef,
    pub enable_mfa: String,
    pub group: GroupMembershipRef,
    pub uuid_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AppGroupMembershipResponse {
    #[allow(dead_code)]
    meta: Meta,
    #[serde(rename = "objects")]
    memberships: Vec<AppGroupMembership>,
}

/// Nested authentication view of an application: the assigned IDP and the
/// directories (with groups) attached to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppAuthentication {
    pub app_idp: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub app_directories: Vec<DirectoryAuthentication>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectoryAuthentication {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub app_groups: Vec<GroupAuthentication>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupAuthentication {
    pub name: String,
}

impl EaaClient {
    /// The application's IDP membership (GET `…/apps/{id}/idp_membership`).
    pub async fn app_idp_membership(&self, app_uuid_url: &str) -> EaaResult<AppIdpMembership> {
        let response: AppIdpMembershipResponse = self
            .get_json(&format!("{APPS_URL}/{app_uuid_url}/idp_membership"))
            .await
            .map_err(|e| e.op(EaaError::IdpMembershipGet))?;
        response
            .memberships
            .into_iter()
            .next()
            .ok_or_else(|| EaaError::IdpMembershipGet("no IDP assigned".into()))
    }

    /// The application's directory memberships
    /// (GET `…/apps/{id}/directories_membership`).
    pub async fn app_directory_memberships(
        &self,
        app_uuid_url: &str,
    ) -> EaaResult<Vec<AppDirectoryMembership>> {
        let response: AppDirectoryMembershipResponse = self
            .get_json(&format!("{APPS_URL}/{app_uuid_url}/directories_membership"))
            .await
            .map_err(|e| e.op(EaaError::DirectoryMembershipGet))?;
        Ok(response.memberships)
    }

    /// The application's group memberships (GET `…/apps/{id}/groups`).
    pub async fn app_group_memberships(
        &self,
        app_uuid_url: &str,
    ) -> EaaResult<Vec<AppGroupMembership>> {
        let response: AppGroupMembershipResponse = self
            .get_json(&format!("{APPS_URL}/{app_uuid_url}/groups"))
            .await
            .map_err(|e| e.op(EaaError::GroupMembershipGet))?;
        Ok(response.memberships)
    }

    /// Compose the three membership reads into the nested authentication
    /// view. Directories are sorted by name; only directories that carry
    /// at least one group are included.
    pub async fn app_authentication(&self, app_uuid_url: &str) -> EaaResult<AppAuthentication> {
        let idp = self.app_idp_membership(app_uuid_url).await?;
        let directories = self.app_directory_memberships(app_uuid_url).await?;
        let groups = self.app_group_memberships(app_uuid_url).await?;

        let mut by_directory: BTreeMap<String, Vec<GroupAuthentication>> = directories
            .into_iter()
            .map(|membership| (membership.directory.name, Vec::new()))
            .collect();

        for membership in groups {
            if let Some(entries) = by_directory.get_mut(&membership.group.dir_name) {
                entries.push(GroupAuthentication {
                    name: membership.group.group_name,
                });
            }
        }

        let app_directories = by_directory
            .into_iter()
            .filter(|(_, groups)| !groups.is_empty())
            .map(|(name, app_groups)| DirectoryAuthentication { name, app_groups })
            .collect();

        Ok(AppAuthentication {
            app_idp: idp.idp.name,
            app_directories,
        })
    }
}
