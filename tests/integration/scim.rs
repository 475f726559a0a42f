//! Integration tests for SCIM provisioning

use super::*;
use github::{
    ListScimProvisionedIdentitiesOptions, ScimPatchOperation, ScimUserAttributes, ScimUserEmail,
    ScimUserName, UpdateAttributeForScimUserOptions,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, query_param};
use wiremock::{Mock, ResponseTemplate};

fn user_json() -> serde_json::Value {
    json!({
        "schemas": ["urn:ietf:params:scim:schemas:core:2.0:User"],
        "id": "5fc0c238-1112-11e8-8e45-920c87bdbd75",
        "externalId": "00u1dhhb1fkIGP7RL1d8",
        "userName": "octocat@github.com",
        "displayName": "Mona Octocat",
        "name": {"givenName": "Mona", "familyName": "Octocat", "formatted": "Mona Octocat"},
        "emails": [{"value": "octocat@github.com", "primary": true}],
        "active": true,
        "meta": {
            "resourceType": "User",
            "created": "2018-02-13T15:05:24Z",
            "lastModified": "2018-02-13T15:05:55Z",
            "location": "https://api.github.com/scim/v2/organizations/octo-org/Users/5fc0c238-1112-11e8-8e45-920c87bdbd75"
        }
    })
}

#[tokio::test]
async fn test_list_provisioned_identities() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/scim/v2/organizations/o/Users")
        .and(query_param("startIndex", "1"))
        .and(query_param("count", "10"))
        .and(query_param("filter", r#"userName eq "octocat@github.com""#))
        .respond_with(success_response(json!({
            "schemas": ["urn:ietf:params:scim:api:messages:2.0:ListResponse"],
            "totalResults": 1,
            "itemsPerPage": 1,
            "startIndex": 1,
            "Resources": [user_json()]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let opts = ListScimProvisionedIdentitiesOptions {
        start_index: Some(1),
        count: Some(10),
        filter: Some(r#"userName eq "octocat@github.com""#.into()),
    };
    let (identities, _) = client
        .scim()
        .list_provisioned_identities("o", Some(&opts))
        .await
        .unwrap();

    assert_eq!(identities.total_results, Some(1));
    let user = &identities.resources[0];
    assert_eq!(user.user_name, "octocat@github.com");
    assert_eq!(user.name.given_name, "Mona");
    assert_eq!(
        user.meta.as_ref().and_then(|m| m.created).map(|t| t.to_string()),
        Some("2018-02-13 15:05:24 +0000 UTC".to_string())
    );
}

#[tokio::test]
async fn test_provision_and_get_user() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/scim/v2/organizations/o/Users"))
        .and(body_json(json!({
            "userName": "octocat@github.com",
            "name": {"givenName": "Mona", "familyName": "Octocat"},
            "emails": [{"value": "octocat@github.com", "primary": true, "type": "work"}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(user_json()))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_with_auth("GET", "/scim/v2/organizations/o/Users/5fc0c238-1112-11e8-8e45-920c87bdbd75")
        .respond_with(success_response(user_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let attributes = ScimUserAttributes {
        user_name: "octocat@github.com".into(),
        name: ScimUserName {
            given_name: "Mona".into(),
            family_name: "Octocat".into(),
            formatted: None,
        },
        emails: vec![ScimUserEmail {
            value: "octocat@github.com".into(),
            primary: Some(true),
            email_type: Some("work".into()),
        }],
        ..Default::default()
    };
    let (created, response) = client
        .scim()
        .provision_and_invite_user("o", &attributes)
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
    assert_eq!(created.external_id.as_deref(), Some("00u1dhhb1fkIGP7RL1d8"));

    let (fetched, _) = client
        .scim()
        .get_provisioning_info_for_user("o", "5fc0c238-1112-11e8-8e45-920c87bdbd75")
        .await
        .unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_update_and_delete_user() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("PUT"))
        .and(path("/scim/v2/organizations/o/Users/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/scim/v2/organizations/o/Users/abc"))
        .and(body_json(json!({
            "schemas": ["urn:ietf:params:scim:api:messages:2.0:PatchOp"],
            "Operations": [{"op": "replace", "path": "displayName", "value": "Monalisa"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/scim/v2/organizations/o/Users/abc"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let scim = client.scim();

    let attributes = ScimUserAttributes {
        user_name: "octocat@github.com".into(),
        ..Default::default()
    };
    let response = scim
        .update_provisioned_org_membership("o", "abc", &attributes)
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let patch = UpdateAttributeForScimUserOptions::new(vec![ScimPatchOperation {
        op: "replace".into(),
        path: Some("displayName".into()),
        value: json!("Monalisa"),
    }]);
    scim.update_attribute_for_user("o", "abc", &patch).await.unwrap();

    let response = scim.delete_user_from_org("o", "abc").await.unwrap();
    assert_eq!(response.status().as_u16(), 204);
}
