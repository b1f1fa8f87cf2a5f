//! Directory and group ⇄ application assignment.
//!
//! Both endpoints take the same nested shape: a `data` array of
//! `{apps: [...], directories|groups: [...]}` batches.

use serde_json::json;
use tracing::info;

use crate::error::{EaaError, EaaResult};
use crate::http::{EaaClient, MGMT_POP_URL};

/// MFA flag value for groups assigned implicitly with their directory.
pub const ENABLE_MFA_INHERIT: &str = "inherit";

/// One group assignment, with its optional MFA override.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAssignment {
    pub uuid_url: String,
    pub enable_mfa: Option<String>,
}

impl EaaClient {
    /// Assign a directory to an application (POST `…/appdirectories`).
    pub async fn assign_directory(
        &self,
        app_uuid_url: &str,
        directory_uuid: &str,
        enable_mfa: Option<bool>,
    ) -> EaaResult<()> {
        if app_uuid_url.is_empty() || directory_uuid.is_empty() {
            return Err(EaaError::AssignDirectory("app or dir is empty".into()));
        }
        let body = json!({
            "data": [{
                "apps": [app_uuid_url],
                "directories": [{
                    "uuid_url": directory_uuid,
                    "enable_mfa": enable_mfa,
                }],
            }],
        });
        self.post_unit(&format!("{MGMT_POP_URL}/appdirectories"), &body)
            .await
            .map_err(|e| e.op(EaaError::AssignDirectory))?;
        info!(app = %app_uuid_url, directory = %directory_uuid, "directory assigned to application");
        Ok(())
    }

    /// Assign directory groups to an application (POST `…/appgroups`).
    /// An empty assignment set is a no-op.
    pub async fn assign_groups(
        &self,
        app_uuid_url: &str,
        groups: &[GroupAssignment],
    ) -> EaaResult<()> {
        if groups.is_empty() {
            return Ok(());
        }
        let entries: Vec<_> = groups
            .iter()
            .map(|group| {
                json!({
                    "uuid_url": group.uuid_url,
                    "enable_mfa": group.enable_mfa,
                })
            })
            .collect();
        let body = json!({
            "data": [{
                "apps": [app_uuid_url],
                "groups": entries,
            }],
        });
        self.post_unit(&format!("{MGMT_POP_URL}/appgroups"), &body)
            .await
            .map_err(|e| e.op(EaaError::AssignGroup))?;
        info!(app = %app_uuid_url, count = groups.len(), "groups assigned to application");
        Ok(())
    }
}
