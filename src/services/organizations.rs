//! Organization and hosted-compute network configuration operations.

use crate::client::{GitHubClient, Response};
use crate::errors::{GitHubError, GitHubResult};
use crate::stringify::{impl_stringify, string_enum};
use crate::types::{ListOptions, Organization, Timestamp};
use serde::{Deserialize, Serialize};

/// Maximum length of a network configuration name.
pub const MAX_NETWORK_CONFIGURATION_NAME_LEN: usize = 100;

/// Service for organization operations.
pub struct OrganizationsService<'a> {
    pub(crate) client: &'a GitHubClient,
}

impl<'a> OrganizationsService<'a> {
    /// Creates a new organizations service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Gets an organization.
    pub async fn get(&self, org: &str) -> GitHubResult<(Organization, Response)> {
        self.client.get(&format!("orgs/{}", org)).await
    }

    // Network configurations

    /// Lists hosted compute network configurations.
    pub async fn list_network_configurations(
        &self,
        org: &str,
        opts: Option<&ListOptions>,
    ) -> GitHubResult<(NetworkConfigurations, Response)> {
        let path = format!("orgs/{}/settings/network-configurations", org);
        match opts {
            Some(opts) => self.client.get_with_params(&path, opts).await,
            None => self.client.get(&path).await,
        }
    }

    /// Creates a network configuration.
    pub async fn create_network_configuration(
        &self,
        org: &str,
        request: &NetworkConfigurationRequest,
    ) -> GitHubResult<(NetworkConfiguration, Response)> {
        request.validate()?;
        self.client
            .post(&format!("orgs/{}/settings/network-configurations", org), request)
            .await
    }

    /// Gets a network configuration.
    pub async fn get_network_configuration(
        &self,
        org: &str,
        network_configuration_id: &str,
    ) -> GitHubResult<(NetworkConfiguration, Response)> {
        self.client
            .get(&format!(
                "orgs/{}/settings/network-configurations/{}",
                org, network_configuration_id
            ))
            .await
    }

    /// Updates a network configuration.
    pub async fn update_network_configuration(
        &self,
        org: &str,
        network_configuration_id: &str,
        request: &NetworkConfigurationRequest,
    ) -> GitHubResult<(NetworkConfiguration, Response)> {
        request.validate()?;
        self.client
            .patch(
                &format!(
                    "orgs/{}/settings/network-configurations/{}",
                    org, network_configuration_id
                ),
                request,
            )
            .await
    }

    /// Deletes a network configuration.
    pub async fn delete_network_configuration(
        &self,
        org: &str,
        network_configuration_id: &str,
    ) -> GitHubResult<Response> {
        self.client
            .delete(&format!(
                "orgs/{}/settings/network-configurations/{}",
                org, network_configuration_id
            ))
            .await
    }

    /// Gets the network settings resource backing a configuration.
    pub async fn get_network_configuration_resource(
        &self,
        org: &str,
        network_settings_id: &str,
    ) -> GitHubResult<(NetworkSettingsResource, Response)> {
        self.client
            .get(&format!(
                "orgs/{}/settings/network-settings/{}",
                org, network_settings_id
            ))
            .await
    }
}

string_enum! {
    /// Hosted compute service a network configuration applies to.
    pub enum ComputeService {
        None => "none",
        Actions => "actions",
    }
}

/// A hosted compute network configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute_service: Option<ComputeService>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub network_settings_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<Timestamp>,
}

/// Network configurations of an organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfigurations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub network_configurations: Vec<NetworkConfiguration>,
}

/// The Azure resource behind a network configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSettingsResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_configuration_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Body of a network configuration create or update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfigurationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute_service: Option<ComputeService>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub network_settings_ids: Vec<String>,
}

impl NetworkConfigurationRequest {
    /// Creates a request for one network settings resource.
    pub fn new(name: impl Into<String>, network_settings_id: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            compute_service: None,
            network_settings_ids: vec![network_settings_id.into()],
        }
    }

    /// Sets the compute service.
    pub fn compute_service(mut self, service: ComputeService) -> Self {
        self.compute_service = Some(service);
        self
    }

    /// Checks the request before it is sent.
    ///
    /// The name must be 1 to 100 characters of `A-Z a-z 0-9 . _ -`, and
    /// exactly one network settings id must be given.
    pub fn validate(&self) -> GitHubResult<()> {
        let name = self.name.as_deref().ok_or_else(|| {
            GitHubError::invalid_parameter("Network configuration name is required")
        })?;

        if name.is_empty() || name.chars().count() > MAX_NETWORK_CONFIGURATION_NAME_LEN {
            return Err(GitHubError::invalid_parameter(format!(
                "Network configuration name must be between 1 and {} characters",
                MAX_NETWORK_CONFIGURATION_NAME_LEN
            )));
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            return Err(GitHubError::invalid_parameter(format!(
                "Network configuration name {:?} may only contain letters, digits, '.', '_' and '-'",
                name
            )));
        }

        if self.network_settings_ids.len() != 1 {
            return Err(GitHubError::invalid_parameter(format!(
                "Exactly one network settings id is required, got {}",
                self.network_settings_ids.len()
            )));
        }

        Ok(())
    }
}

impl_stringify! {
    NetworkConfiguration { id, name, compute_service, network_settings_ids, created_on }
    NetworkConfigurations { total_count, network_configurations }
    NetworkSettingsResource { id, network_configuration_id, name, subnet_id, region }
    NetworkConfigurationRequest { name, compute_service, network_settings_ids }
}
