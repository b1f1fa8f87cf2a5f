//! Signed HTTP transport for the EAA management API.

use std::time::Duration;

use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::Credentials;
use crate::error::{EaaError, EaaResult};
use crate::signer::Signer;

/// Management API endpoint paths, relative to the API host.
pub const MGMT_POP_URL: &str = "crux/v1/mgmt-pop";
pub const APPS_URL: &str = "crux/v1/mgmt-pop/apps";
pub const POPS_URL: &str = "crux/v1/mgmt-pop/pops";
pub const AGENTS_URL: &str = "crux/v1/mgmt-pop/agents";
pub const APP_CATEGORIES_URL: &str = "crux/v1/mgmt-pop/appcategories";
pub const IDP_URL: &str = "crux/v1/mgmt-pop/idp";
pub const CERTIFICATES_URL: &str = "crux/v1/mgmt-pop/certificates";
pub const SERVICES_URL: &str = "crux/v1/mgmt-pop/services";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Whether a request is scoped to the configured contract or global.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    /// Contract-scoped: `contractId`/`accountSwitchKey` query parameters
    /// are appended, plus `expand=true&limit=0` on GET.
    Contract,
    /// Global endpoint: no account scoping.
    Global,
}

/// Signed client for the EAA management API.
///
/// Holds the per-instance HTTP client, request signer and account scoping.
/// Operations are sequential request/response calls; the client keeps no
/// other state.
#[derive(Debug, Clone)]
pub struct EaaClient {
    http: reqwest::Client,
    signer: Signer,
    base_url: String,
    contract_id: String,
    account_switch_key: Option<String>,
}

impl EaaClient {
    /// Build a client from credentials and contract scoping.
    pub fn new(
        credentials: Credentials,
        contract_id: impl Into<String>,
        account_switch_key: Option<String>,
    ) -> EaaResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| EaaError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

        let base_url = format!("https://{}", credentials.host);
        Ok(Self {
            http,
            signer: Signer::new(credentials),
            base_url,
            contract_id: contract_id.into(),
            account_switch_key,
        })
    }

    /// Override the base URL (scheme + authority), for tests against a
    /// local mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The contract the client is scoped to.
    #[must_use]
    pub fn contract_id(&self) -> &str {
        &self.contract_id
    }

    // ── Typed helpers ─────────────────────────────────────────────────

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> EaaResult<T> {
        let response = self
            .execute::<()>(Method::GET, path, None, Scope::Contract)
            .await?;
        Self::decode(response).await
    }

    pub(crate) async fn get_global_json<T: DeserializeOwned>(&self, path: &str) -> EaaResult<T> {
        let response = self
            .execute::<()>(Method::GET, path, None, Scope::Global)
            .await?;
        Self::decode(response).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> EaaResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(Method::POST, path, Some(body), Scope::Contract)
            .await?;
        Self::decode(response).await
    }

    pub(crate) async fn post_empty_json<T: DeserializeOwned>(&self, path: &str) -> EaaResult<T> {
        let response = self
            .execute::<()>(Method::POST, path, None, Scope::Contract)
            .await?;
        Self::decode(response).await
    }

    pub(crate) async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> EaaResult<()> {
        self.execute(Method::POST, path, Some(body), Scope::Contract)
            .await?;
        Ok(())
    }

    pub(crate) async fn put_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> EaaResult<()> {
        self.execute(Method::PUT, path, Some(body), Scope::Contract)
            .await?;
        Ok(())
    }

    pub(crate) async fn delete_unit(&self, path: &str) -> EaaResult<()> {
        self.execute::<()>(Method::DELETE, path, None, Scope::Contract)
            .await?;
        Ok(())
    }

    // ── Transport ─────────────────────────────────────────────────────

    /// Build, sign and execute one request. `path` is relative to the base
    /// URL and may carry its own query string. Non-2xx responses are mapped
    /// to [`EaaError::Api`] with the problem-body detail.
    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        scope: Scope,
    ) -> EaaResult<reqwest::Response> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|e| EaaError::InvalidConfig(format!("invalid request URL: {e}")))?;

        if scope == Scope::Contract {
            let mut pairs = url.query_pairs_mut();
            if !self.contract_id.is_empty() {
                pairs.append_pair("contractId", &self.contract_id);
            }
            if let Some(key) = &self.account_switch_key {
                pairs.append_pair("accountSwitchKey", key);
            }
            if method == Method::GET {
                pairs.append_pair("expand", "true");
                pairs.append_pair("limit", "0");
            }
        }

        let payload = match body {
            Some(body) => {
                serde_json::to_vec(body).map_err(|e| EaaError::Serialize(e.to_string()))?
            }
            None => Vec::new(),
        };

        let authorization = self.signer.authorization(&method, &url, &payload);
        debug!(method = %method, url = %url, "sending API request");

        let mut request = self
            .http
            .request(method, url)
            .header(header::AUTHORIZATION, authorization)
            .header(header::CONTENT_TYPE, "application/json");
        if !payload.is_empty() {
            request = request.body(payload);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body_text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "API request failed");
            Err(EaaError::from_response(status, &body_text))
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> EaaResult<T> {
        let status = response.status();
        if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
            return Err(EaaError::Deserialize(format!(
                "expected a response body, got HTTP {}",
                status.as_u16()
            )));
        }
        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| EaaError::Deserialize(format!("failed to parse response: {e}")))
    }
}
