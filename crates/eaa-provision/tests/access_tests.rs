//! Access-control service reconciliation against a mock API server.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use eaa_client::{Credentials, EaaClient};
use eaa_provision::access;
use eaa_provision::resource::{AccessRuleConfig, RuleSettingConfig, ServiceConfig};
use eaa_client::types::ServiceType;

fn test_client(server: &MockServer) -> EaaClient {
    let credentials = Credentials {
        client_token: "akab-client".into(),
        client_secret: "secret".into(),
        access_token: "akab-access".into(),
        host: "manage.example-api.net".into(),
        max_body: 131_072,
    };
    EaaClient::new(credentials, "C-123", None)
        .unwrap()
        .with_base_url(server.uri())
}

async fn mount_service_listing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/crux/v1/mgmt-pop/apps/app-1/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [
                { "service": { "name": "Access Control", "service_type": 6, "status": "off", "uuid_url": "svc-acl" } }
            ]
        })))
        .mount(server)
        .await;
}

fn access_config(rules: Vec<AccessRuleConfig>) -> ServiceConfig {
    ServiceConfig {
        service_type: ServiceType::Access,
        status: "on".into(),
        access_rule: rules,
    }
}

fn country_rule(name: &str, value: &str) -> AccessRuleConfig {
    AccessRuleConfig {
        name: name.into(),
        status: Some("on".into()),
        rules: vec![RuleSettingConfig {
            operator: "==".into(),
            setting_type: "country".into(),
            value: value.into(),
        }],
    }
}

#[tokio::test]
async fn reconcile_creates_modifies_and_deletes_rules() {
    let server = MockServer::start().await;
    mount_service_listing(&server).await;

    Mock::given(method("PUT"))
        .and(path("/crux/v1/mgmt-pop/services/svc-acl"))
        .and(body_partial_json(json!({ "status": "on" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    // Existing: "keep" (already in desired state), "drifted" (settings
    // differ), "unmanaged" (not declared).
    Mock::given(method("GET"))
        .and(path("/crux/v1/mgmt-pop/services/svc-acl/rules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [
                {
                    "name": "keep",
                    "status": 1,
                    "uuid_url": "rule-keep",
                    "settings": [ { "operator": "==", "type": "country", "value": "US" } ]
                },
                {
                    "name": "drifted",
                    "status": 1,
                    "uuid_url": "rule-drifted",
                    "settings": [ { "operator": "==", "type": "country", "value": "FR" } ]
                },
                {
                    "name": "unmanaged",
                    "status": 1,
                    "uuid_url": "rule-unmanaged",
                    "settings": [ { "operator": "==", "type": "user", "value": "admin" } ]
                }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/crux/v1/mgmt-pop/services/svc-acl/rules"))
        .and(body_partial_json(json!({ "name": "brand-new" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/crux/v1/mgmt-pop/services/svc-acl/rules/rule-drifted"))
        .and(body_partial_json(json!({
            "name": "drifted",
            "settings": [ { "operator": "==", "type": "country", "value": "DE" } ]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/crux/v1/mgmt-pop/services/svc-acl/rules/rule-unmanaged"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let config = access_config(vec![
        country_rule("keep", "US"),
        country_rule("drifted", "DE"),
        country_rule("brand-new", "CA"),
    ]);
    access::apply_access_services(&client, "app-1", &[config])
        .await
        .unwrap();
}

#[tokio::test]
async fn non_access_service_blocks_are_ignored() {
    let server = MockServer::start().await;
    // No mocks: any API call would fail the test.

    let client = test_client(&server);
    let config = ServiceConfig {
        service_type: ServiceType::Waf,
        status: "on".into(),
        access_rule: Vec::new(),
    };
    access::apply_access_services(&client, "app-1", &[config])
        .await
        .unwrap();
}

#[tokio::test]
async fn invalid_rule_setting_aborts_before_any_call() {
    let server = MockServer::start().await;

    let client = test_client(&server);
    let config = access_config(vec![AccessRuleConfig {
        name: "bad".into(),
        status: Some("on".into()),
        rules: vec![RuleSettingConfig {
            operator: "==".into(),
            setting_type: "browser".into(),
            value: "chrome".into(),
        }],
    }]);
    let result = access::apply_access_services(&client, "app-1", &[config]).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn snapshot_sorts_rules_and_settings() {
    let server = MockServer::start().await;
    mount_service_listing(&server).await;

    Mock::given(method("GET"))
        .and(path("/crux/v1/mgmt-pop/services/svc-acl/rules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [
                {
                    "name": "zulu",
                    "status": 0,
                    "uuid_url": "rule-z",
                    "settings": [
                        { "operator": "==", "type": "user", "value": "admin" },
                        { "operator": "==", "type": "country", "value": "US" }
                    ]
                },
                {
                    "name": "alpha",
                    "status": 1,
                    "uuid_url": "rule-a",
                    "settings": [ { "operator": "==", "type": "time", "value": "9-17" } ]
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let snapshot = access::read_access_service(&client, "app-1")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(snapshot.status, "off");
    assert_eq!(snapshot.access_rule[0].name, "alpha");
    assert_eq!(snapshot.access_rule[0].status, "on");
    assert_eq!(snapshot.access_rule[1].name, "zulu");
    assert_eq!(snapshot.access_rule[1].status, "off");
    // Settings ordered by type: country before user.
    assert_eq!(snapshot.access_rule[1].rule[0].setting_type, "country");
    assert_eq!(snapshot.access_rule[1].rule[1].setting_type, "user");
}

#[tokio::test]
async fn snapshot_is_none_without_rules() {
    let server = MockServer::start().await;
    mount_service_listing(&server).await;

    Mock::given(method("GET"))
        .and(path("/crux/v1/mgmt-pop/services/svc-acl/rules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "objects": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let snapshot = access::read_access_service(&client, "app-1").await.unwrap();
    assert!(snapshot.is_none());
}

#[tokio::test]
async fn snapshot_is_none_without_access_service() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crux/v1/mgmt-pop/apps/app-1/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [ { "service": { "name": "WAF", "service_type": 1, "uuid_url": "svc-waf" } } ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let snapshot = access::read_access_service(&client, "app-1").await.unwrap();
    assert!(snapshot.is_none());
}
