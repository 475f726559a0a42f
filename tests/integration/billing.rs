//! Integration tests for billing budgets

use super::*;
use github::{Budget, BudgetAlerting, GitHubErrorKind};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method};
use wiremock::{Mock, ResponseTemplate};

fn budget_json() -> serde_json::Value {
    json!({
        "id": "2066deda-923f-43f9-88d2-62395a28c0cdd",
        "budget_type": "ProductPricing",
        "budget_amount": 0,
        "prevent_further_usage": true,
        "budget_scope": "enterprise",
        "budget_entity_name": "example-enterprise",
        "budget_product_sku": "actions_linux",
        "budget_alerting": {
            "will_alert": true,
            "alert_recipients": ["enterprise-admin", "billing-manager"]
        }
    })
}

#[tokio::test]
async fn test_get_organization_budget() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/organizations/o/settings/billing/budgets/1")
        .and(header("X-GitHub-Api-Version", "2022-11-28"))
        .respond_with(
            success_response(budget_json()).insert_header("X-GitHub-Request-Id", "0C1A:2B3C"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let (budget, response) = client
        .billing()
        .get_organization_budget("o", "1")
        .await
        .expect("budget request failed");

    assert_eq!(
        budget,
        Budget {
            id: Some("2066deda-923f-43f9-88d2-62395a28c0cdd".into()),
            budget_type: Some("ProductPricing".into()),
            budget_amount: Some(0),
            prevent_further_usage: Some(true),
            budget_scope: Some("enterprise".into()),
            budget_entity_name: Some("example-enterprise".into()),
            budget_product_sku: Some("actions_linux".into()),
            budget_alerting: Some(BudgetAlerting {
                will_alert: Some(true),
                alert_recipients: vec!["enterprise-admin".into(), "billing-manager".into()],
            }),
        }
    );
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.request_id(), Some("0C1A:2B3C"));
}

#[tokio::test]
async fn test_list_organization_budgets() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/organizations/o/settings/billing/budgets")
        .respond_with(success_response(json!({"budgets": [budget_json()]})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let (list, _) = client.billing().list_organization_budgets("o").await.unwrap();

    assert_eq!(list.budgets.len(), 1);
    assert_eq!(list.budgets[0].budget_scope.as_deref(), Some("enterprise"));
}

#[tokio::test]
async fn test_update_organization_budget_sends_only_set_fields() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("PATCH"))
        .and(path("/organizations/o/settings/billing/budgets/1"))
        .and(body_json(json!({"budget_amount": 10, "prevent_further_usage": false})))
        .respond_with(success_response(json!({
            "message": "Budget successfully updated.",
            "budget": budget_json()
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let update = Budget {
        budget_amount: Some(10),
        prevent_further_usage: Some(false),
        ..Default::default()
    };
    let (result, _) = client
        .billing()
        .update_organization_budget("o", "1", &update)
        .await
        .unwrap();

    assert_eq!(result.message.as_deref(), Some("Budget successfully updated."));
    assert_eq!(
        result.budget.and_then(|b| b.budget_product_sku),
        Some("actions_linux".to_string())
    );
}

#[tokio::test]
async fn test_delete_organization_budget() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("DELETE"))
        .and(path("/organizations/o/settings/billing/budgets/1"))
        .respond_with(success_response(json!({
            "message": "Budget successfully deleted.",
            "id": "1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let (result, _) = client.billing().delete_organization_budget("o", "1").await.unwrap();

    assert_eq!(result.id.as_deref(), Some("1"));
}

#[tokio::test]
async fn test_malformed_budget_id_is_rejected_before_sending() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .billing()
        .get_organization_budget("o", "%zz")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), &GitHubErrorKind::InvalidParameter);
    assert!(err.is_construction_error());
    assert!(err.status_code().is_none());
}
