//! Access-control service reconciliation.
//!
//! Declared rules are reconciled by name against the service's existing
//! rules: missing ones are created, drifted ones modified, unmanaged ones
//! deleted.

use tracing::{debug, info};

use eaa_client::services::{AccessRule, AclSetting};
use eaa_client::types::{rule, ServiceType};
use eaa_client::{EaaClient, EaaError};

use crate::error::ProvisionResult;
use crate::resource::{AccessRuleConfig, RuleSettingConfig, ServiceConfig};

/// Snapshot of an application's access-control service, sorted for stable
/// comparison against declared state.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AccessServiceState {
    pub service_type: ServiceType,
    pub status: String,
    pub access_rule: Vec<AccessRuleState>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AccessRuleState {
    pub name: String,
    pub status: String,
    pub rule: Vec<RuleSettingConfig>,
}

/// Apply every declared access-control service block. Other service types
/// are not reconciled.
pub async fn apply_access_services(
    client: &EaaClient,
    app_uuid_url: &str,
    services: &[ServiceConfig],
) -> ProvisionResult<()> {
    for config in services {
        if config.service_type != ServiceType::Access {
            debug!(service_type = config.service_type.as_str(), "skipping unmanaged service type");
            continue;
        }
        apply_access_service(client, app_uuid_url, config).await?;
    }
    Ok(())
}

async fn apply_access_service(
    client: &EaaClient,
    app_uuid_url: &str,
    config: &ServiceConfig,
) -> ProvisionResult<()> {
    let desired = desired_rules(&config.access_rule)?;

    let mut service = client.acl_service(app_uuid_url).await?;
    service.status = config.status.clone();
    client.enable_service(&service).await?;

    let existing = client.access_rules(&service.uuid_url).await?;

    for desired_rule in &desired {
        match existing.iter().find(|rule| rule.name == desired_rule.name) {
            None => {
                client
                    .create_access_rule(&service.uuid_url, desired_rule)
                    .await?;
            }
            Some(current) if !current.is_equivalent(desired_rule) => {
                let mut updated = desired_rule.clone();
                updated.uuid_url = current.uuid_url.clone();
                client.modify_access_rule(&service.uuid_url, &updated).await?;
            }
            Some(_) => {
                debug!(rule = %desired_rule.name, "rule already in desired state");
            }
        }
    }

    for current in &existing {
        if !desired.iter().any(|rule| rule.name == current.name) {
            client
                .delete_access_rule(&service.uuid_url, &current.uuid_url)
                .await?;
        }
    }

    info!(app = %app_uuid_url, rules = desired.len(), "access-control service reconciled");
    Ok(())
}

/// Read the access-control service snapshot for an application. Returns
/// `None` when the app carries no access service or the service has no
/// rules.
pub async fn read_access_service(
    client: &EaaClient,
    app_uuid_url: &str,
) -> ProvisionResult<Option<AccessServiceState>> {
    let service = match client.acl_service(app_uuid_url).await {
        Ok(service) => service,
        Err(EaaError::ServicesGet(_)) => return Ok(None),
        Err(error) => return Err(error.into()),
    };

    let rules = client.access_rules(&service.uuid_url).await?;
    if rules.is_empty() {
        return Ok(None);
    }

    let mut access_rule: Vec<AccessRuleState> = rules
        .into_iter()
        .map(|acl_rule| {
            let mut settings: Vec<RuleSettingConfig> = acl_rule
                .settings
                .into_iter()
                .map(|setting| RuleSettingConfig {
                    operator: setting.operator,
                    setting_type: setting.setting_type,
                    value: setting.value,
                })
                .collect();
            settings.sort_by(|a, b| a.setting_type.cmp(&b.setting_type));
            AccessRuleState {
                name: acl_rule.name,
                status: if acl_rule.status == rule::ADMIN_STATE_ENABLED {
                    rule::STATUS_ON.to_string()
                } else {
                    rule::STATUS_OFF.to_string()
                },
                rule: settings,
            }
        })
        .collect();
    access_rule.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Some(AccessServiceState {
        service_type: ServiceType::Access,
        status: service.status,
        access_rule,
    }))
}

/// Validate declared rules and map them onto wire rules. A missing or
/// unrecognized status is treated as off.
fn desired_rules(configs: &[AccessRuleConfig]) -> ProvisionResult<Vec<AccessRule>> {
    let mut rules = Vec::with_capacity(configs.len());
    for config in configs {
        let mut settings = Vec::with_capacity(config.rules.len());
        for setting in &config.rules {
            let acl_setting = AclSetting {
                operator: setting.operator.clone(),
                setting_type: setting.setting_type.clone(),
                value: setting.value.clone(),
            };
            acl_setting.validate()?;
            settings.push(acl_setting);
        }
        let status = match config.status.as_deref() {
            Some(rule::STATUS_ON) => rule::ADMIN_STATE_ENABLED,
            _ => rule::ADMIN_STATE_DISABLED,
        };
        rules.push(AccessRule {
            name: config.name.clone(),
            status,
            settings,
            uuid_url: String::new(),
        });
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desired_rules_map_status_words_to_codes() {
        let configs = vec![
            AccessRuleConfig {
                name: "enabled-rule".into(),
                status: Some("on".into()),
                rules: vec![RuleSettingConfig {
                    operator: "==".into(),
                    setting_type: "country".into(),
                    value: "US".into(),
                }],
            },
            AccessRuleConfig {
                name: "defaulted-rule".into(),
                status: None,
                rules: Vec::new(),
            },
            AccessRuleConfig {
                name: "typoed-rule".into(),
                status: Some("enabled".into()),
                rules: Vec::new(),
            },
        ];
        let rules = desired_rules(&configs).unwrap();
        assert_eq!(rules[0].status, rule::ADMIN_STATE_ENABLED);
        assert_eq!(rules[1].status, rule::ADMIN_STATE_DISABLED);
        assert_eq!(rules[2].status, rule::ADMIN_STATE_DISABLED);
    }

    #[test]
    fn desired_rules_reject_invalid_settings() {
        let configs = vec![AccessRuleConfig {
            name: "bad".into(),
            status: Some("on".into()),
            rules: vec![RuleSettingConfig {
                operator: "~=".into(),
                setting_type: "country".into(),
                value: "US".into(),
            }],
        }];
        assert!(desired_rules(&configs).is_err());
    }
}
