//! IDP ⇄ application assignment.

use serde::Serialize;
use tracing::info;

use crate::error::{EaaError, EaaResult};
use crate::http::{EaaClient, MGMT_POP_URL};

#[derive(Debug, Serialize)]
struct AppIdp<'a> {
    app: &'a str,
    idp: &'a str,
}

#[derive(Debug, Serialize)]
struct UnassignIdpRequest<'a> {
    deleted_objects: Vec<&'a str>,
}

impl EaaClient {
    /// Assign an identity provider to an application (POST `…/appidp`).
    pub async fn assign_idp(&self, app_uuid_url: &str, idp_uuid_url: &str) -> EaaResult<()> {
        if app_uuid_url.is_empty() || idp_uuid_url.is_empty() {
            return Err(EaaError::AssignIdp("app or idp is empty".into()));
        }
        let body = AppIdp {
            app: app_uuid_url,
            idp: idp_uuid_url,
        };
        self.post_unit(&format!("{MGMT_POP_URL}/appidp"), &body)
            .await
            .map_err(|e| e.op(EaaError::AssignIdp))?;
        info!(app = %app_uuid_url, idp = %idp_uuid_url, "IDP assigned to application");
        Ok(())
    }

    /// Unassign an identity provider from an application
    /// (POST `…/appidp?method=DELETE`).
    pub async fn unassign_idp(&self, app_uuid_url: &str, idp_uuid_url: &str) -> EaaResult<()> {
        if app_uuid_url.is_empty() || idp_uuid_url.is_empty() {
            return Err(EaaError::AssignIdp("app or idp is empty".into()));
        }
        let body = UnassignIdpRequest {
            deleted_objects: vec![idp_uuid_url],
        };
        self.post_unit(&format!("{MGMT_POP_URL}/appidp?method=DELETE"), &body)
            .await
            .map_err(|e| e.op(EaaError::AssignIdp))?;
        info!(app = %app_uuid_url, idp = %idp_uuid_url, "IDP unassigned from application");
        Ok(())
    }
}
