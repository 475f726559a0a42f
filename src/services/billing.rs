//! Organization billing budget operations.

use crate::client::{GitHubClient, Response};
use crate::errors::GitHubResult;
use crate::stringify::impl_stringify;
use serde::{Deserialize, Serialize};

/// Service for billing budgets.
pub struct BillingService<'a> {
    client: &'a GitHubClient,
}

impl<'a> BillingService<'a> {
    /// Creates a new billing service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    fn budgets_path(org: &str) -> String {
        format!("organizations/{}/settings/billing/budgets", org)
    }

    /// Lists the budgets of an organization.
    pub async fn list_organization_budgets(
        &self,
        org: &str,
    ) -> GitHubResult<(BudgetList, Response)> {
        self.client.get(&Self::budgets_path(org)).await
    }

    /// Gets a single budget.
    pub async fn get_organization_budget(
        &self,
        org: &str,
        budget_id: &str,
    ) -> GitHubResult<(Budget, Response)> {
        self.client
            .get(&format!("{}/{}", Self::budgets_path(org), budget_id))
            .await
    }

    /// Updates a budget; only the fields set on `budget` are sent.
    pub async fn update_organization_budget(
        &self,
        org: &str,
        budget_id: &str,
        budget: &Budget,
    ) -> GitHubResult<(UpdateBudgetResponse, Response)> {
        self.client
            .patch(&format!("{}/{}", Self::budgets_path(org), budget_id), budget)
            .await
    }

    /// Deletes a budget.
    pub async fn delete_organization_budget(
        &self,
        org: &str,
        budget_id: &str,
    ) -> GitHubResult<(DeleteBudgetResponse, Response)> {
        let request = self.client.new_request(
            reqwest::Method::DELETE,
            &format!("{}/{}", Self::budgets_path(org), budget_id),
            Option::<&()>::None,
        )?;
        self.client.send_json(request).await
    }
}

/// Who receives budget alerts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetAlerting {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub will_alert: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alert_recipients: Vec<String>,
}

/// A spending budget for an organization, repository or cost center.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `ProductPricing` or `SkuPricing`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_type: Option<String>,
    /// Limit in whole US dollars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prevent_further_usage: Option<bool>,
    /// `enterprise`, `organization`, `repository` or `cost_center`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_entity_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_product_sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_alerting: Option<BudgetAlerting>,
}

/// Budgets of an organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetList {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub budgets: Vec<Budget>,
}

/// Result of a budget update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBudgetResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<Budget>,
}

/// Result of a budget deletion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteBudgetResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl_stringify! {
    BudgetAlerting { will_alert, alert_recipients }
    Budget {
        id, budget_type, budget_amount, prevent_further_usage, budget_scope,
        budget_entity_name, budget_product_sku, budget_alerting,
    }
    BudgetList { budgets }
    UpdateBudgetResponse { message, budget }
    DeleteBudgetResponse { message, id }
}
