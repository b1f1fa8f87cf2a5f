//! Application services and access-control rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{EaaError, EaaResult};
use crate::http::{EaaClient, APPS_URL, SERVICES_URL};
use crate::types::{rule, ServiceType};

/// Service attached to an application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppService {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub service_type: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uuid_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AppServiceData {
    service: AppService,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AppServicesResponse {
    #[serde(rename = "objects")]
    services: Vec<AppServiceData>,
}

/// One condition of an access-control rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AclSetting {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub operator: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub setting_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
}

impl AclSetting {
    /// Validate operator and setting type against the allowed sets.
    pub fn validate(&self) -> EaaResult<()> {
        match self.operator.as_str() {
            rule::OPERATOR_IS | rule::OPERATOR_IS_NOT => {}
            other => {
                return Err(EaaError::InvalidValue {
                    field: "rule operator",
                    value: other.to_string(),
                })
            }
        }
        if !rule::SETTING_TYPES.contains(&self.setting_type.as_str()) {
            return Err(EaaError::InvalidValue {
                field: "rule type",
                value: self.setting_type.clone(),
            });
        }
        Ok(())
    }
}

/// Access-control rule as listed under a service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessRule {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub status: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub settings: Vec<AclSetting>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uuid_url: String,
}

impl AccessRule {
    /// Whether two rules carry the same status and ordered settings.
    #[must_use]
    pub fn is_equivalent(&self, other: &AccessRule) -> bool {
        self.status == other.status && self.settings == other.settings
    }
}

/// Full rule payload for create/modify calls.
#[derive(Debug, Clone, Serialize)]
struct AccessRuleRequest<'a> {
    action: i64,
    authz_rule: Option<String>,
    created_at: DateTime<Utc>,
    description: Option<String>,
    global_rule: bool,
    merge_global: bool,
    modified_at: DateTime<Utc>,
    name: &'a str,
    rule_type: i64,
    service: &'a str,
    settings: &'a [AclSetting],
    status: i64,
}

impl<'a> AccessRuleRequest<'a> {
    fn from_rule(rule: &'a AccessRule, service_uuid_url: &'a str) -> Self {
        let now = Utc::now();
        Self {
            action: rule::ACTION_DENY,
            authz_rule: None,
            created_at: now,
            description: None,
            global_rule: false,
            merge_global: true,
            modified_at: now,
            name: &rule.name,
            rule_type: rule::TYPE_ACCESS_CONTROL,
            service: service_uuid_url,
            settings: &rule.settings,
            status: rule.status,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AclRulesResponse {
    #[serde(rename = "objects")]
    rules: Vec<AccessRule>,
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

impl EaaClient {
    /// The application's access-control service
    /// (GET `…/apps/{id}/services`, filtered to the access type).
    pub async fn acl_service(&self, app_uuid_url: &str) -> EaaResult<AppService> {
        if app_uuid_url.is_empty() {
            return Err(EaaError::ServicesGet("empty uuid_url".into()));
        }
        let response: AppServicesResponse = self
            .get_json(&format!("{APPS_URL}/{app_uuid_url}/services"))
            .await
            .map_err(|e| e.op(EaaError::ServicesGet))?;

        response
            .services
            .into_iter()
            .map(|entry| entry.service)
            .find(|service| service.service_type == ServiceType::Access.code())
            .ok_or_else(|| EaaError::ServicesGet("no access-control service".into()))
    }

    /// Set a service's status (PUT `…/services/{id}`).
    pub async fn enable_service(&self, service: &AppService) -> EaaResult<()> {
        if service.uuid_url.is_empty() {
            return Err(EaaError::EnableService("empty uuid_url".into()));
        }
        self.put_unit(&format!("{SERVICES_URL}/{}", service.uuid_url), service)
            .await
            .map_err(|e| e.op(EaaError::EnableService))?;
        info!(service = %service.uuid_url, status = %service.status, "service status set");
        Ok(())
    }

    /// List a service's access-control rules (GET `…/services/{id}/rules`).
    pub async fn access_rules(&self, service_uuid_url: &str) -> EaaResult<Vec<AccessRule>> {
        if service_uuid_url.is_empty() {
            return Err(EaaError::ServicesGet("empty uuid_url".into()));
        }
        let response: AclRulesResponse = self
            .get_json(&format!("{SERVICES_URL}/{service_uuid_url}/rules"))
            .await
            .map_err(|e| e.op(EaaError::ServicesGet))?;
        Ok(response.rules)
    }

    /// Create an access-control rule (POST `…/services/{id}/rules`).
    pub async fn create_access_rule(
        &self,
        service_uuid_url: &str,
        access_rule: &AccessRule,
    ) -> EaaResult<()> {
        if service_uuid_url.is_empty() {
            return Err(EaaError::RuleCreate("empty uuid_url".into()));
        }
        let request = AccessRuleRequest::from_rule(access_rule, service_uuid_url);
        self.post_unit(&format!("{SERVICES_URL}/{service_uuid_url}/rules"), &request)
            .await
            .map_err(|e| e.op(EaaError::RuleCreate))?;
        info!(rule = %access_rule.name, "access rule created");
        Ok(())
    }

    /// Modify an access-control rule (PUT `…/services/{id}/rules/{rid}`).
    pub async fn modify_access_rule(
        &self,
        service_uuid_url: &str,
        access_rule: &AccessRule,
    ) -> EaaResult<()> {
        if service_uuid_url.is_empty() || access_rule.uuid_url.is_empty() {
            return Err(EaaError::RuleModify("empty uuid_url".into()));
        }
        let request = AccessRuleRequest::from_rule(access_rule, service_uuid_url);
        self.put_unit(
            &format!("{SERVICES_URL}/{service_uuid_url}/rules/{}", access_rule.uuid_url),
            &request,
        )
        .await
        .map_err(|e| e.op(EaaError::RuleModify))?;
        info!(rule = %access_rule.name, "access rule modified");
        Ok(())
    }

    /// Delete an access-control rule (DELETE `…/services/{id}/rules/{rid}`).
    pub async fn delete_access_rule(
        &self,
        service_uuid_url: &str,
        rule_uuid_url: &str,
    ) -> EaaResult<()> {
        if service_uuid_url.is_empty() || rule_uuid_url.is_empty() {
            return Err(EaaError::RuleDelete("empty uuid_url".into()));
        }
        self.delete_unit(&format!(
            "{SERVICES_URL}/{service_uuid_url}/rules/{rule_uuid_url}"
        ))
        .await
        .map_err(|e| e.op(EaaError::RuleDelete))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setting(operator: &str, setting_type: &str, value: &str) -> AclSetting {
        AclSetting {
            operator: operator.into(),
            setting_type: setting_type.into(),
            value: value.into(),
        }
    }

    #[test]
    fn validates_operator_and_type() {
        assert!(setting("==", "country", "US").validate().is_ok());
        assert!(setting("!=", "clientip", "10.0.0.0/8").validate().is_ok());

        let bad_op = setting(">=", "country", "US").validate().unwrap_err();
        assert!(bad_op.to_string().contains("rule operator"));

        let bad_type = setting("==", "browser", "chrome").validate().unwrap_err();
        assert!(bad_type.to_string().contains("rule type"));
    }

    #[test]
    fn rule_equivalence_compares_status_and_ordered_settings() {
        let a = AccessRule {
            name: "deny-countries".into(),
            status: rule::ADMIN_STATE_ENABLED,
            settings: vec![setting("==", "country", "US"), setting("==", "country", "CA")],
            uuid_url: "r-1".into(),
        };
        let mut b = a.clone();
        b.uuid_url = "r-2".into();
        assert!(a.is_equivalent(&b));

        b.status = rule::ADMIN_STATE_DISABLED;
        assert!(!a.is_equivalent(&b));

        b.status = rule::ADMIN_STATE_ENABLED;
        b.settings.swap(0, 1);
        assert!(!a.is_equivalent(&b));
    }

    #[test]
    fn empty_fields_are_omitted_from_service_payloads() {
        let service = AppService {
            name: "Access Control".into(),
            service_type: 6,
            status: "on".into(),
            uuid_url: String::new(),
        };
        let value = serde_json::to_value(&service).unwrap();
        let map = value.as_object().unwrap();
        assert!(map.contains_key("service_type"));
        assert!(!map.contains_key("uuid_url"));
    }
}
