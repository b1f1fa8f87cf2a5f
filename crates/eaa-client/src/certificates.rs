//! Certificate mirrors and operations.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{EaaError, EaaResult};
use crate::http::{EaaClient, CERTIFICATES_URL};
use crate::types::cert_type;

/// Full certificate mirror.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CertificateResponse {
    pub app_count: i64,
    pub cert: String,
    pub cert_type: i64,
    #[serde(rename = "cert_file_name")]
    pub cert_file: Option<String>,
    pub cn: String,
    pub created_at: String,
    pub days_left: i64,
    pub description: Option<String>,
    pub dir_count: i64,
    pub expired_at: String,
    pub host_name: String,
    pub issued_at: String,
    pub issuer: String,
    pub modified_at: String,
    pub name: String,
    pub resource: String,
    pub status: i64,
    pub subject: String,
    pub uploaded: Option<String>,
    pub uuid_url: String,
}

/// Thin certificate listing row.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CertObject {
    pub name: String,
    pub uuid_url: String,
    pub cert_type: i64,
    pub expired_at: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CertsResponse {
    objects: Vec<CertObject>,
}

#[derive(Debug, Serialize)]
struct CreateSelfSignedCertRequest<'a> {
    host_name: &'a str,
    cert_type: i64,
}

impl EaaClient {
    /// Generate a self-signed certificate for a host
    /// (POST `…/certificates`).
    pub async fn create_self_signed_certificate(
        &self,
        host_name: &str,
    ) -> EaaResult<CertificateResponse> {
        if host_name.is_empty() {
            return Err(EaaError::InvalidValue {
                field: "host_name",
                value: String::new(),
            });
        }
        let request = CreateSelfSignedCertRequest {
            host_name,
            cert_type: cert_type::APP_SELF_SIGNED,
        };
        let response: CertificateResponse = self
            .post_json(CERTIFICATES_URL, &request)
            .await
            .map_err(|e| e.op(EaaError::AppUpdate))?;
        info!(host = %host_name, uuid_url = %response.uuid_url, "self-signed certificate created");
        Ok(response)
    }

    /// List certificates in thin form (GET `…/certificates/thin`),
    /// dropping placeholder rows.
    pub async fn list_certificates(&self) -> EaaResult<Vec<CertObject>> {
        let response: CertsResponse = self
            .get_json(&format!("{CERTIFICATES_URL}/thin"))
            .await
            .map_err(|e| e.op(EaaError::CertificatesGet))?;
        Ok(response
            .objects
            .into_iter()
            .filter(|cert| !cert.name.is_empty() && !cert.uuid_url.is_empty())
            .collect())
    }

    /// Fetch one certificate (GET `…/certificates/{id}`).
    pub async fn get_certificate(&self, cert_uuid_url: &str) -> EaaResult<CertificateResponse> {
        self.get_json(&format!("{CERTIFICATES_URL}/{cert_uuid_url}"))
            .await
            .map_err(|e| e.op(EaaError::CertificatesGet))
    }

    /// Self-signed certificate for a host, if one exists.
    pub async fn self_signed_cert_for_host(&self, host: &str) -> EaaResult<Option<CertObject>> {
        let certs = self.list_certificates().await?;
        Ok(certs
            .into_iter()
            .find(|cert| cert.name == host && cert.cert_type == cert_type::APP_SELF_SIGNED))
    }

    /// Uploaded (non-self-signed, non-CA) certificate for a host.
    pub async fn uploaded_cert_for_host(&self, host: &str) -> EaaResult<CertObject> {
        let certs = self.list_certificates().await?;
        certs
            .into_iter()
            .find(|cert| {
                cert.name == host
                    && cert.cert_type != cert_type::APP_SELF_SIGNED
                    && cert.cert_type != cert_type::CA
            })
            .ok_or_else(|| EaaError::CertNotFound(host.to_string()))
    }
}
