//! Integration tests for Actions secrets and artifacts

use super::*;
use github::{EncryptedSecret, ListArtifactsOptions, ListOptions};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_repo_public_key_with_integer_key_id() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/repos/o/r/actions/secrets/public-key")
        .respond_with(success_response(json!({
            "key_id": 1234,
            "key": "2Sg8iYjAxxmI2LvUXpJjkYrMxURPc8r+dB7TJyvv1234"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let (key, _) = client.actions().get_repo_public_key("o", "r").await.unwrap();

    assert_eq!(key.key_id.as_deref(), Some("1234"));
}

#[tokio::test]
async fn test_list_repo_secrets() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/repos/o/r/actions/secrets")
        .and(query_param("per_page", "2"))
        .respond_with(success_response(json!({
            "total_count": 2,
            "secrets": [
                {"name": "A", "created_at": "2019-01-02T15:04:05Z", "updated_at": "2020-01-02T15:04:05Z"},
                {"name": "B", "created_at": "2019-01-02T15:04:05Z", "updated_at": "2020-01-02T15:04:05Z"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let opts = ListOptions::new().per_page(2);
    let (secrets, _) = client
        .actions()
        .list_repo_secrets("o", "r", Some(&opts))
        .await
        .unwrap();

    assert_eq!(secrets.total_count, 2);
    assert_eq!(secrets.secrets[1].name, "B");
    assert_eq!(
        secrets.secrets[0].created_at.to_string(),
        "2019-01-02 15:04:05 +0000 UTC"
    );
}

#[tokio::test]
async fn test_create_or_update_org_secret() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("PUT"))
        .and(path("/orgs/o/actions/secrets/NAME"))
        .and(body_json(json!({
            "key_id": "1234",
            "encrypted_value": "QIv=",
            "visibility": "selected",
            "selected_repository_ids": [1296269, 1269280]
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut secret = EncryptedSecret::new("NAME", "1234", "QIv=");
    secret.visibility = Some("selected".into());
    secret.selected_repository_ids = vec![1296269, 1269280];
    let response = client
        .actions()
        .create_or_update_org_secret("o", &secret)
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 201);
}

#[tokio::test]
async fn test_org_secret_selected_repositories() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/orgs/o/actions/secrets/NAME/repositories")
        .respond_with(success_response(json!({
            "total_count": 1,
            "repositories": [{"id": 1}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/orgs/o/actions/secrets/NAME/repositories"))
        .and(body_json(json!({"selected_repository_ids": [64780797]})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/orgs/o/actions/secrets/NAME/repositories/1234"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/orgs/o/actions/secrets/NAME/repositories/1234"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let actions = client.actions();

    let (repos, _) = actions
        .list_selected_repos_for_org_secret("o", "NAME", None)
        .await
        .unwrap();
    assert_eq!(repos.repositories[0].id, Some(1));

    actions
        .set_selected_repos_for_org_secret("o", "NAME", &[64780797])
        .await
        .unwrap();
    actions.add_selected_repo_to_org_secret("o", "NAME", 1234).await.unwrap();
    actions
        .remove_selected_repo_from_org_secret("o", "NAME", 1234)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_env_secret_escapes_environment_name() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/repositories/1/environments/my%20env%2F1/secrets/NAME")
        .respond_with(success_response(json!({
            "name": "NAME",
            "created_at": "2019-01-02T15:04:05Z",
            "updated_at": "2020-01-02T15:04:05Z"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/repositories/1/environments/my%20env%2F1/secrets/NAME"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let (secret, _) = client
        .actions()
        .get_env_secret(1, "my env/1", "NAME")
        .await
        .unwrap();
    assert_eq!(secret.name, "NAME");

    client
        .actions()
        .delete_env_secret(1, "my env/1", "NAME")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_artifacts_with_name_filter() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/repos/o/r/actions/artifacts")
        .and(query_param("name", "build"))
        .and(query_param("page", "2"))
        .respond_with(success_response(json!({
            "total_count": 1,
            "artifacts": [{
                "id": 11,
                "name": "build",
                "size_in_bytes": 556,
                "expired": false,
                "created_at": "2020-01-10T14:59:22Z",
                "workflow_run": {"id": 2332938, "head_branch": "main"}
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let opts = ListArtifactsOptions {
        name: Some("build".into()),
        list_options: ListOptions::new().page(2),
    };
    let (list, _) = client
        .actions()
        .list_artifacts("o", "r", Some(&opts))
        .await
        .unwrap();

    assert_eq!(list.total_count, Some(1));
    assert_eq!(list.artifacts[0].size_in_bytes, Some(556));
}

#[tokio::test]
async fn test_get_and_delete_artifact() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/repos/o/r/actions/artifacts/11")
        .respond_with(success_response(json!({"id": 11, "expired": true})))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_with_auth("GET", "/repos/o/r/actions/runs/7/artifacts")
        .respond_with(success_response(json!({"total_count": 0})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/repos/o/r/actions/artifacts/11"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let actions = client.actions();

    let (artifact, _) = actions.get_artifact("o", "r", 11).await.unwrap();
    assert_eq!(artifact.expired, Some(true));

    let (runs, _) = actions.list_workflow_run_artifacts("o", "r", 7, None).await.unwrap();
    assert!(runs.artifacts.is_empty());

    let response = actions.delete_artifact("o", "r", 11).await.unwrap();
    assert_eq!(response.status().as_u16(), 204);
}
