//! Integration tests for users

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn test_get_authenticated_user() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/user")
        .respond_with(success_response(json!({"login": "monalisa", "id": 1, "type": "User"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let (user, _) = client.users().get("").await.unwrap();

    assert_eq!(user.login.as_deref(), Some("monalisa"));
    assert_eq!(
        github::stringify(&user),
        r#"github.User{Login:"monalisa", ID:1, Type:"User"}"#
    );
}

#[tokio::test]
async fn test_get_user_by_login_and_id() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/users/octocat")
        .respond_with(success_response(json!({"login": "octocat", "id": 583231})))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_with_auth("GET", "/user/583231")
        .respond_with(success_response(json!({"login": "octocat", "id": 583231})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let (by_login, _) = client.users().get("octocat").await.unwrap();
    let (by_id, _) = client.users().get_by_id(583231).await.unwrap();

    assert_eq!(by_login, by_id);
}
