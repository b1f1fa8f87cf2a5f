//! EAA API error types.
//!
//! Failures are static variants wrapped with the response-derived detail
//! string from the API's problem body (`problemId`/`detail`).

use serde::Deserialize;
use thiserror::Error;

/// Error body returned by the EAA management API on failed requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiProblem {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub instance: String,
    pub detail: String,
    #[serde(rename = "problemId")]
    pub problem_id: String,
}

/// Error that can occur during EAA API operations.
#[derive(Debug, Error)]
pub enum EaaError {
    /// Client or credentials configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to serialize a request body.
    #[error("marshaling input: {0}")]
    Serialize(String),

    /// Failed to deserialize a response body.
    #[error("unmarshaling output: {0}")]
    Deserialize(String),

    /// Transport-level failure from the HTTP client.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response that no operation has claimed yet.
    #[error("api request failed with status {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("app creation failed: {0}")]
    AppCreate(String),

    #[error("app update failed: {0}")]
    AppUpdate(String),

    #[error("app delete failed: {0}")]
    AppDelete(String),

    #[error("app get failed: {0}")]
    AppGet(String),

    #[error("app deploy failed: {0}")]
    Deploy(String),

    #[error("connectors assign failed: {0}")]
    AssignAgents(String),

    #[error("connectors unassign failed: {0}")]
    UnassignAgents(String),

    #[error("agents get failed: {0}")]
    AgentsGet(String),

    #[error("assigning IDP to the app failed: {0}")]
    AssignIdp(String),

    #[error("idps get failed: {0}")]
    IdpGet(String),

    #[error("idp directories get failed: {0}")]
    IdpDirectoriesGet(String),

    #[error("assigning directory to the app failed: {0}")]
    AssignDirectory(String),

    #[error("assigning groups to the app failed: {0}")]
    AssignGroup(String),

    #[error("unable to get app idp membership: {0}")]
    IdpMembershipGet(String),

    #[error("unable to get app directory membership: {0}")]
    DirectoryMembershipGet(String),

    #[error("unable to get app group membership: {0}")]
    GroupMembershipGet(String),

    #[error("get app services failed: {0}")]
    ServicesGet(String),

    #[error("enable service failed: {0}")]
    EnableService(String),

    #[error("create rule failed: {0}")]
    RuleCreate(String),

    #[error("modify rule failed: {0}")]
    RuleModify(String),

    #[error("delete rule failed: {0}")]
    RuleDelete(String),

    #[error("certificates get failed: {0}")]
    CertificatesGet(String),

    #[error("certificate does not exist: {0}")]
    CertNotFound(String),

    #[error("app categories get failed: {0}")]
    AppCategoriesGet(String),

    #[error("pops get failed: {0}")]
    PopsGet(String),

    /// A name-based lookup found no matching entity.
    #[error("{entity} with name '{name}' not found")]
    NameNotFound {
        entity: &'static str,
        name: String,
    },

    /// A configuration field holds a value outside the allowed set.
    #[error("invalid value for {field}: '{value}'")]
    InvalidValue { field: &'static str, value: String },
}

impl EaaError {
    /// Build an error from a failed HTTP response, extracting the `detail`
    /// field of the problem body when one is present.
    pub(crate) fn from_response(status: reqwest::StatusCode, body: &str) -> Self {
        let detail = serde_json::from_str::<ApiProblem>(body)
            .ok()
            .map(|p| p.detail)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| {
                if body.is_empty() {
                    format!("HTTP {}", status.as_u16())
                } else {
                    body.to_string()
                }
            });
        EaaError::Api {
            status: status.as_u16(),
            detail,
        }
    }

    /// Claim an unattributed API failure for a specific operation, keeping
    /// the response-derived detail. Other error kinds pass through.
    pub(crate) fn op(self, wrap: fn(String) -> EaaError) -> EaaError {
        match self {
            EaaError::Api { detail, .. } => wrap(detail),
            other => other,
        }
    }

    /// HTTP status of an unclaimed API failure, if that is what this is.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            EaaError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for EAA API operations.
pub type EaaResult<T> = Result<T, EaaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_response_prefers_problem_detail() {
        let body = r#"{"type":"/err","title":"Bad","detail":"name already in use","problemId":"abc-123"}"#;
        let err = EaaError::from_response(reqwest::StatusCode::CONFLICT, body);
        match err {
            EaaError::Api { status, detail } => {
                assert_eq!(status, 409);
                assert_eq!(detail, "name already in use");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn from_response_falls_back_to_raw_body() {
        let err = EaaError::from_response(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(err.status(), Some(502));
        assert!(err.to_string().contains("upstream down"));
    }

    #[test]
    fn from_response_empty_body_reports_status() {
        let err = EaaError::from_response(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "");
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[test]
    fn op_claims_api_errors_only() {
        let api = EaaError::Api {
            status: 400,
            detail: "bad profile".into(),
        };
        match api.op(EaaError::AppCreate) {
            EaaError::AppCreate(detail) => assert_eq!(detail, "bad profile"),
            other => panic!("expected AppCreate, got {other:?}"),
        }

        let cfg = EaaError::InvalidConfig("no host".into());
        assert!(matches!(
            cfg.op(EaaError::AppCreate),
            EaaError::InvalidConfig(_)
        ));
    }

    #[test]
    fn display_matches_operation_wording() {
        let err = EaaError::AssignAgents("no capacity".into());
        assert_eq!(err.to_string(), "connectors assign failed: no capacity");
    }
}
