//! SCIM user provisioning for organizations.
//!
//! SCIM resources use camelCase JSON names, unlike the rest of the API.

use crate::client::{GitHubClient, Response};
use crate::errors::GitHubResult;
use crate::stringify::impl_stringify;
use crate::types::Timestamp;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Schema URN for SCIM user resources.
pub const SCIM_USER_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:User";

/// Schema URN for SCIM patch requests.
pub const SCIM_PATCH_OP_SCHEMA: &str = "urn:ietf:params:scim:api:messages:2.0:PatchOp";

/// Service for SCIM provisioning.
pub struct ScimService<'a> {
    client: &'a GitHubClient,
}

impl<'a> ScimService<'a> {
    /// Creates a new SCIM service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    fn users_path(org: &str) -> String {
        format!("scim/v2/organizations/{}/Users", org)
    }

    /// Lists provisioned SCIM identities.
    pub async fn list_provisioned_identities(
        &self,
        org: &str,
        opts: Option<&ListScimProvisionedIdentitiesOptions>,
    ) -> GitHubResult<(ScimProvisionedIdentities, Response)> {
        let path = Self::users_path(org);
        match opts {
            Some(opts) => self.client.get_with_params(&path, opts).await,
            None => self.client.get(&path).await,
        }
    }

    /// Provisions a user and invites them to the organization.
    pub async fn provision_and_invite_user(
        &self,
        org: &str,
        attributes: &ScimUserAttributes,
    ) -> GitHubResult<(ScimUserAttributes, Response)> {
        self.client.post(&Self::users_path(org), attributes).await
    }

    /// Gets the provisioning information of a user.
    pub async fn get_provisioning_info_for_user(
        &self,
        org: &str,
        scim_user_id: &str,
    ) -> GitHubResult<(ScimUserAttributes, Response)> {
        self.client
            .get(&format!("{}/{}", Self::users_path(org), scim_user_id))
            .await
    }

    /// Replaces all attributes of a provisioned user.
    pub async fn update_provisioned_org_membership(
        &self,
        org: &str,
        scim_user_id: &str,
        attributes: &ScimUserAttributes,
    ) -> GitHubResult<Response> {
        self.client
            .put_no_response(
                &format!("{}/{}", Self::users_path(org), scim_user_id),
                Some(attributes),
            )
            .await
    }

    /// Applies patch operations to a provisioned user.
    pub async fn update_attribute_for_user(
        &self,
        org: &str,
        scim_user_id: &str,
        opts: &UpdateAttributeForScimUserOptions,
    ) -> GitHubResult<Response> {
        let request = self.client.new_request(
            Method::PATCH,
            &format!("{}/{}", Self::users_path(org), scim_user_id),
            Some(opts),
        )?;
        self.client.send_empty(request).await
    }

    /// Removes a provisioned user from the organization.
    pub async fn delete_user_from_org(
        &self,
        org: &str,
        scim_user_id: &str,
    ) -> GitHubResult<Response> {
        self.client
            .delete(&format!("{}/{}", Self::users_path(org), scim_user_id))
            .await
    }
}

/// Name parts of a SCIM user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimUserName {
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
}

/// An email address of a SCIM user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScimUserEmail {
    #[serde(default)]
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub email_type: Option<String>,
}

/// Resource metadata set by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A provisioned SCIM user.
///
/// `id` and `meta` are only filled in on responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimUserAttributes {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub name: ScimUserName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub emails: Vec<ScimUserEmail>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemas: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ScimMeta>,
}

/// A page of provisioned identities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimProvisionedIdentities {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemas: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_results: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<i32>,
    #[serde(rename = "Resources", default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ScimUserAttributes>,
}

/// Query options for listing provisioned identities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListScimProvisionedIdentitiesOptions {
    /// 1-based index of the first result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<i32>,
    /// Results per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i32>,
    /// SCIM filter, e.g. `userName eq "octocat"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// One SCIM patch operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScimPatchOperation {
    /// `add`, `remove` or `replace`.
    pub op: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Raw JSON value for the operation.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub value: serde_json::Value,
}

/// Body of a SCIM attribute patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateAttributeForScimUserOptions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemas: Vec<String>,
    #[serde(rename = "Operations", default)]
    pub operations: Vec<ScimPatchOperation>,
}

impl UpdateAttributeForScimUserOptions {
    /// Creates a patch body with the standard schema.
    pub fn new(operations: Vec<ScimPatchOperation>) -> Self {
        Self {
            schemas: vec![SCIM_PATCH_OP_SCHEMA.to_string()],
            operations,
        }
    }
}

impl_stringify! {
    ScimUserName { given_name, family_name, formatted }
    ScimUserEmail { value, primary, email_type as "Type" }
    ScimMeta { resource_type, created, last_modified, location }
    ScimUserAttributes {
        user_name, name, display_name, emails, schemas, external_id, groups, active, id, meta,
    }
    ScimProvisionedIdentities { schemas, total_results, items_per_page, start_index, resources }
    ListScimProvisionedIdentitiesOptions { start_index, count, filter }
    ScimPatchOperation { op, path, value }
    UpdateAttributeForScimUserOptions { schemas, operations }
}
