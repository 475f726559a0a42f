//! Integration tests for organizations, network configurations and artifact
//! metadata

use super::*;
use github::{
    ComputeService, CreateArtifactDeploymentRequest, CreateArtifactStorageRequest,
    GitHubErrorKind, ListOptions, NetworkConfigurationRequest,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, query_param};
use wiremock::{Mock, ResponseTemplate};

const DIGEST: &str = "sha256:1bb1e949e55dcefc6353e7b36c8897d2a107d8e8dca49d4e3c0ea8493fc0bc72";

fn network_configuration_json() -> serde_json::Value {
    json!({
        "id": "123456789ABCDEF",
        "name": "My network configuration",
        "compute_service": "actions",
        "network_settings_ids": ["23456789ABDCEF1", "3456789ABDCEF12"],
        "created_on": "2022-10-09T23:39:01Z"
    })
}

#[tokio::test]
async fn test_get_organization() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/orgs/github")
        .respond_with(success_response(json!({"login": "github", "id": 1, "type": "Organization"})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let (org, _) = client.organizations().get("github").await.unwrap();

    assert_eq!(org.login.as_deref(), Some("github"));
    assert_eq!(org.org_type.as_deref(), Some("Organization"));
}

#[tokio::test]
async fn test_list_network_configurations() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/orgs/o/settings/network-configurations")
        .and(query_param("page", "3"))
        .and(query_param("per_page", "2"))
        .respond_with(
            success_response(json!({
                "total_count": 1,
                "network_configurations": [network_configuration_json()]
            }))
            .insert_header(
                "Link",
                r#"<https://api.github.com/orgs/o/settings/network-configurations?page=4&per_page=2>; rel="next""#,
            ),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let opts = ListOptions::new().page(3).per_page(2);
    let (configs, response) = client
        .organizations()
        .list_network_configurations("o", Some(&opts))
        .await
        .unwrap();

    assert_eq!(configs.total_count, Some(1));
    let config = &configs.network_configurations[0];
    assert_eq!(config.compute_service, Some(ComputeService::Actions));
    assert_eq!(
        config.created_on.map(|t| t.to_string()),
        Some("2022-10-09 23:39:01 +0000 UTC".to_string())
    );
    assert_eq!(response.next_page(), Some(4));
}

#[tokio::test]
async fn test_create_network_configuration() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/orgs/o/settings/network-configurations"))
        .and(body_json(json!({
            "name": "my-network",
            "compute_service": "actions",
            "network_settings_ids": ["23456789ABDCEF1"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(network_configuration_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = NetworkConfigurationRequest::new("my-network", "23456789ABDCEF1")
        .compute_service(ComputeService::Actions);
    let (config, response) = client
        .organizations()
        .create_network_configuration("o", &request)
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 201);
    assert_eq!(config.id.as_deref(), Some("123456789ABCDEF"));
}

#[tokio::test]
async fn test_invalid_network_configuration_is_not_sent() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = NetworkConfigurationRequest::new("has spaces", "23456789ABDCEF1");
    let err = client
        .organizations()
        .create_network_configuration("o", &request)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), &GitHubErrorKind::InvalidParameter);
}

#[tokio::test]
async fn test_update_and_delete_network_configuration() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("PATCH"))
        .and(path("/orgs/o/settings/network-configurations/123456789ABCDEF"))
        .respond_with(success_response(network_configuration_json()))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/orgs/o/settings/network-configurations/123456789ABCDEF"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let orgs = client.organizations();
    let request = NetworkConfigurationRequest::new("renamed", "23456789ABDCEF1");
    orgs.update_network_configuration("o", "123456789ABCDEF", &request)
        .await
        .unwrap();
    let response = orgs
        .delete_network_configuration("o", "123456789ABCDEF")
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 204);
}

#[tokio::test]
async fn test_get_network_configuration_resource() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/orgs/o/settings/network-settings/220F78DACB92BBFBC5E6F22DE1CCF52309D")
        .respond_with(success_response(json!({
            "id": "220F78DACB92BBFBC5E6F22DE1CCF52309D",
            "network_configuration_id": "934E208B3EE0BD60CF5F752C426BFB53562",
            "name": "my_network_settings",
            "subnet_id": "/subscriptions/14839728-3ad9-43ab-bd2b-fa6ad0f75e2a/resourceGroups/my-rg/providers/Microsoft.Network/virtualNetworks/my-vnet/subnets/my-subnet",
            "region": "germanywestcentral"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let (resource, _) = client
        .organizations()
        .get_network_configuration_resource("o", "220F78DACB92BBFBC5E6F22DE1CCF52309D")
        .await
        .unwrap();

    assert_eq!(resource.region.as_deref(), Some("germanywestcentral"));
}

#[tokio::test]
async fn test_artifact_storage_records() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/orgs/o/artifacts/metadata/storage-record"))
        .and(body_json(json!({
            "name": "libfoo",
            "digest": DIGEST,
            "registry_url": "https://reg.example.com/artifactory/",
            "status": "active"
        })))
        .respond_with(success_response(json!({
            "total_count": 1,
            "storage_records": [{"id": 1, "name": "libfoo", "digest": DIGEST, "status": "active"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_with_auth("GET", &format!("/orgs/o/artifacts/{}/metadata/storage-records", DIGEST))
        .respond_with(success_response(json!({"total_count": 0})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = CreateArtifactStorageRequest {
        name: "libfoo".into(),
        digest: DIGEST.into(),
        registry_url: "https://reg.example.com/artifactory/".into(),
        status: "active".into(),
        ..Default::default()
    };
    let (created, _) = client
        .organizations()
        .create_artifact_storage_record("o", &request)
        .await
        .unwrap();
    assert_eq!(created.storage_records[0].id, Some(1));

    let (listed, _) = client
        .organizations()
        .list_artifact_storage_records("o", DIGEST)
        .await
        .unwrap();
    assert_eq!(listed.total_count, Some(0));
    assert!(listed.storage_records.is_empty());
}

#[tokio::test]
async fn test_artifact_deployment_records() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/orgs/o/artifacts/metadata/deployment-record"))
        .respond_with(success_response(json!({
            "total_count": 1,
            "deployment_records": [{
                "id": 123,
                "digest": DIGEST,
                "logical_environment": "prod",
                "deployment_name": "deployment-pod",
                "tags": {"data": "sensitive"},
                "created_at": "2023-10-01T12:00:00Z"
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_with_auth("GET", &format!("/orgs/o/artifacts/{}/metadata/deployment-records", DIGEST))
        .respond_with(success_response(json!({"total_count": 0, "deployment_records": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = CreateArtifactDeploymentRequest {
        name: "awesome-image".into(),
        digest: DIGEST.into(),
        status: "deployed".into(),
        logical_environment: "prod".into(),
        deployment_name: "deployment-pod".into(),
        ..Default::default()
    };
    let (created, _) = client
        .organizations()
        .create_artifact_deployment_record("o", &request)
        .await
        .unwrap();
    let record = &created.deployment_records[0];
    assert_eq!(record.tags.get("data").map(String::as_str), Some("sensitive"));

    let (listed, _) = client
        .organizations()
        .list_artifact_deployment_records("o", DIGEST)
        .await
        .unwrap();
    assert!(listed.deployment_records.is_empty());
}
