//! Identity-provider hierarchy: IDPs, their directories and groups.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EaaError, EaaResult};
use crate::http::{EaaClient, IDP_URL};
use crate::types::Meta;

/// Directory group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupData {
    pub name: String,
    pub uuid_url: String,
}

/// Directory under an identity provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryData {
    pub name: String,
    #[serde(rename = "uuid_url")]
    pub uuid: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupData>,
}

impl DirectoryData {
    /// Find a group of this directory by name.
    pub fn group_by_name(&self, group_name: &str) -> EaaResult<&GroupData> {
        self.groups
            .iter()
            .find(|group| group.name == group_name)
            .ok_or_else(|| EaaError::NameNotFound {
                entity: "group",
                name: group_name.to_string(),
            })
    }
}

/// Identity provider with its expanded directory list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdpData {
    pub name: String,
    pub uuid_url: String,
    #[serde(rename = "directories_list", skip_serializing_if = "Vec::is_empty")]
    pub directories: Vec<DirectoryData>,
}

impl IdpData {
    /// Find a directory of this IDP by name.
    pub fn directory_by_name(&self, directory_name: &str) -> EaaResult<&DirectoryData> {
        self.directories
            .iter()
            .find(|dir| dir.name == directory_name)
            .ok_or_else(|| EaaError::NameNotFound {
                entity: "directory",
                name: directory_name.to_string(),
            })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct IdpSummary {
    name: String,
    uuid_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct IdpResponse {
    #[allow(dead_code)]
    meta: Meta,
    #[serde(rename = "objects")]
    idps: Vec<IdpSummary>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct DirectoryResponse {
    #[allow(dead_code)]
    meta: Meta,
    #[serde(rename = "objects")]
    directories: Vec<DirectoryData>,
}

impl EaaClient {
    /// List identity providers with their directories expanded
    /// (GET `…/idp`, then GET `…/idp/{id}/directories` per IDP).
    pub async fn list_idps(&self) -> EaaResult<Vec<IdpData>> {
        let response: IdpResponse = self
            .get_json(IDP_URL)
            .await
            .map_err(|e| e.op(EaaError::IdpGet))?;

        let mut idps = Vec::new();
        for idp in response.idps {
            if idp.name.is_empty() || idp.uuid_url.is_empty() {
                continue;
            }
            let directories = self.idp_directories(&idp.uuid_url).await?;
            idps.push(IdpData {
                name: idp.name,
                uuid_url: idp.uuid_url,
                directories,
            });
        }
        Ok(idps)
    }

    /// Look up one identity provider by name, directories expanded.
    pub async fn idp_by_name(&self, idp_name: &str) -> EaaResult<IdpData> {
        let response: IdpResponse = self
            .get_json(IDP_URL)
            .await
            .map_err(|e| e.op(EaaError::IdpGet))?;

        for idp in response.idps {
            if idp.name == idp_name {
                let directories = self.idp_directories(&idp.uuid_url).await?;
                return Ok(IdpData {
                    name: idp.name,
                    uuid_url: idp.uuid_url,
                    directories,
                });
            }
        }
        Err(EaaError::NameNotFound {
            entity: "IDP",
            name: idp_name.to_string(),
        })
    }

    /// Directories of an identity provider, with placeholder rows dropped
    /// (GET `…/idp/{id}/directories`).
    pub async fn idp_directories(&self, idp_uuid_url: &str) -> EaaResult<Vec<DirectoryData>> {
        debug!(idp = %idp_uuid_url, "fetching IDP directories");
        let response: DirectoryResponse = self
            .get_json(&format!("{IDP_URL}/{idp_uuid_url}/directories"))
            .await
            .map_err(|e| e.op(EaaError::IdpDirectoriesGet))?;

        let directories = response
            .directories
            .into_iter()
            .filter(|dir| !dir.name.is_empty() && !dir.uuid.is_empty())
            .map(|dir| {
                let groups = dir
                    .groups
                    .into_iter()
                    .filter(|g| !g.name.is_empty() && !g.uuid_url.is_empty())
                    .collect();
                DirectoryData {
                    name: dir.name,
                    uuid: dir.uuid,
                    groups,
                }
            })
            .collect();
        Ok(directories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_idp() -> IdpData {
        IdpData {
            name: "corporate-idp".into(),
            uuid_url: "idp-1".into(),
            directories: vec![DirectoryData {
                name: "cloud-directory".into(),
                uuid: "dir-1".into(),
                groups: vec![
                    GroupData {
                        name: "engineering".into(),
                        uuid_url: "grp-1".into(),
                    },
                    GroupData {
                        name: "support".into(),
                        uuid_url: "grp-2".into(),
                    },
                ],
            }],
        }
    }

    #[test]
    fn directory_lookup_by_name() {
        let idp = sample_idp();
        let dir = idp.directory_by_name("cloud-directory").unwrap();
        assert_eq!(dir.uuid, "dir-1");

        let err = idp.directory_by_name("missing").unwrap_err();
        assert!(err.to_string().contains("directory with name 'missing'"));
    }

    #[test]
    fn group_lookup_by_name() {
        let idp = sample_idp();
        let dir = idp.directory_by_name("cloud-directory").unwrap();
        assert_eq!(dir.group_by_name("support").unwrap().uuid_url, "grp-2");
        assert!(dir.group_by_name("sales").is_err());
    }

    #[test]
    fn directories_list_uses_wire_name() {
        let json = r#"{"name":"idp","uuid_url":"u","directories_list":[{"name":"d","uuid_url":"du"}]}"#;
        let idp: IdpData = serde_json::from_str(json).unwrap();
        assert_eq!(idp.directories.len(), 1);
        assert_eq!(idp.directories[0].uuid, "du");
    }
}
