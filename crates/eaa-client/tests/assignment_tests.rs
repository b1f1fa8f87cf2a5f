//! Connector, IDP, directory and group assignment flows against a mock
//! API server.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use eaa_client::appdirectories::{GroupAssignment, ENABLE_MFA_INHERIT};
use eaa_client::{Credentials, EaaClient, EaaError};

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

fn agent_listing_mock() -> Mock {
    Mock::given(method("GET"))
        .and(path("/crux/v1/mgmt-pop/agents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [
                { "name": "dc1-connector", "uuid_url": "agent-1" },
                { "name": "dc2-connector", "uuid_url": "agent-2" },
                { "name": "", "uuid_url": "" }
            ]
        })))
}

#[tokio::test]
async fn assign_agents_resolves_names_to_uuids() {
    let server = MockServer::start().await;
    agent_listing_mock().mount(&server).await;

    Mock::given(method("POST"))
        .and(path("/crux/v1/mgmt-pop/apps/app-1/agents"))
        .and(body_json(json!({
            "agents": [ { "uuid_url": "agent-1" }, { "uuid_url": "agent-2" } ]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client
        .assign_agents(
            "app-1",
            &["dc1-connector".to_string(), "dc2-connector".to_string()],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn assign_agents_with_no_matches_is_a_noop() {
    let server = MockServer::start().await;
    agent_listing_mock().mount(&server).await;
    // No POST mock mounted: a request would return 404 and fail the call.

    let client = test_client(&server);
    client
        .assign_agents("app-1", &["unknown-connector".to_string()])
        .await
        .unwrap();
}

#[tokio::test]
async fn unassign_agents_uses_delete_method_marker() {
    let server = MockServer::start().await;
    agent_listing_mock().mount(&server).await;

    Mock::given(method("POST"))
        .and(path("/crux/v1/mgmt-pop/apps/app-1/agents"))
        .and(query_param("method", "delete"))
        .and(body_json(json!({ "agents": ["agent-2"] })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client
        .unassign_agents("app-1", &["dc2-connector".to_string()])
        .await
        .unwrap();
}

#[tokio::test]
async fn app_agent_names_are_sorted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crux/v1/mgmt-pop/apps/app-1/agents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [
                { "agent": { "name": "zeta", "uuid_url": "a-z" } },
                { "agent": { "name": "alpha", "uuid_url": "a-a" } }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let names = client.app_agent_names("app-1").await.unwrap();
    assert_eq!(names, vec!["alpha".to_string(), "zeta".to_string()]);
}

#[tokio::test]
async fn assign_idp_posts_the_pair() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/crux/v1/mgmt-pop/appidp"))
        .and(body_json(json!({ "app": "app-1", "idp": "idp-1" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client.assign_idp("app-1", "idp-1").await.unwrap();
}

#[tokio::test]
async fn assign_idp_rejects_empty_ids_without_calling() {
    let server = MockServer::start().await;
    let client = test_client(&server);
    let err = client.assign_idp("", "idp-1").await.unwrap_err();
    assert!(matches!(err, EaaError::AssignIdp(_)));
}

#[tokio::test]
async fn unassign_idp_uses_deleted_objects() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/crux/v1/mgmt-pop/appidp"))
        .and(query_param("method", "DELETE"))
        .and(body_json(json!({ "deleted_objects": ["idp-1"] })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client.unassign_idp("app-1", "idp-1").await.unwrap();
}

#[tokio::test]
async fn assign_directory_nests_the_batch_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/crux/v1/mgmt-pop/appdirectories"))
        .and(body_json(json!({
            "data": [{
                "apps": ["app-1"],
                "directories": [{ "uuid_url": "dir-1", "enable_mfa": true }]
            }]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client
        .assign_directory("app-1", "dir-1", Some(true))
        .await
        .unwrap();
}

#[tokio::test]
async fn assign_groups_carries_mfa_flags() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/crux/v1/mgmt-pop/appgroups"))
        .and(body_json(json!({
            "data": [{
                "apps": ["app-1"],
                "groups": [
                    { "uuid_url": "grp-1", "enable_mfa": "inherit" },
                    { "uuid_url": "grp-2", "enable_mfa": null }
                ]
            }]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let groups = vec![
        GroupAssignment {
            uuid_url: "grp-1".into(),
            enable_mfa: Some(ENABLE_MFA_INHERIT.into()),
        },
        GroupAssignment {
            uuid_url: "grp-2".into(),
            enable_mfa: None,
        },
    ];
    client.assign_groups("app-1", &groups).await.unwrap();
}

#[tokio::test]
async fn idp_listing_expands_directories() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crux/v1/mgmt-pop/idp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [
                { "name": "corporate-idp", "uuid_url": "idp-1" },
                { "name": "", "uuid_url": "" }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/crux/v1/mgmt-pop/idp/idp-1/directories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [
                {
                    "name": "cloud-directory",
                    "uuid_url": "dir-1",
                    "groups": [
                        { "name": "engineering", "uuid_url": "grp-1" },
                        { "name": "", "uuid_url": "" }
                    ]
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let idps = client.list_idps().await.unwrap();
    assert_eq!(idps.len(), 1);
    assert_eq!(idps[0].directories.len(), 1);
    assert_eq!(idps[0].directories[0].groups.len(), 1);

    let idp = client.idp_by_name("corporate-idp").await.unwrap();
    assert_eq!(idp.uuid_url, "idp-1");
    assert!(client.idp_by_name("other").await.is_err());
}

#[tokio::test]
async fn app_authentication_composes_memberships() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crux/v1/mgmt-pop/apps/app-1/idp_membership"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [
                { "idp": { "idp_uuid_url": "idp-1", "name": "corporate-idp" }, "uuid_url": "m-1" }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/crux/v1/mgmt-pop/apps/app-1/directories_membership"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [
                { "directory": { "directory_uuid_url": "dir-1", "name": "cloud-directory" } },
                { "directory": { "directory_uuid_url": "dir-2", "name": "empty-directory" } }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/crux/v1/mgmt-pop/apps/app-1/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [
                { "group": { "dir_name": "cloud-directory", "dir_uuid_url": "dir-1", "group_uuid_url": "grp-1", "name": "engineering" } }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let auth = client.app_authentication("app-1").await.unwrap();
    assert_eq!(auth.app_idp, "corporate-idp");
    // Directories without groups are dropped from the view.
    assert_eq!(auth.app_directories.len(), 1);
    assert_eq!(auth.app_directories[0].name, "cloud-directory");
    assert_eq!(auth.app_directories[0].app_groups[0].name, "engineering");
}

#[tokio::test]
async fn app_authentication_requires_an_assigned_idp() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crux/v1/mgmt-pop/apps/app-1/idp_membership"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "objects": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.app_authentication("app-1").await.unwrap_err();
    assert!(matches!(err, EaaError::IdpMembershipGet(_)));
}
