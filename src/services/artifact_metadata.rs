//! Artifact storage and deployment metadata records.

use crate::client::Response;
use crate::errors::GitHubResult;
use crate::services::OrganizationsService;
use crate::stringify::impl_stringify;
use crate::types::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

impl<'a> OrganizationsService<'a> {
    /// Records where an artifact is stored.
    ///
    /// `POST orgs/{org}/artifacts/metadata/storage-record`
    pub async fn create_artifact_storage_record(
        &self,
        org: &str,
        request: &CreateArtifactStorageRequest,
    ) -> GitHubResult<(ArtifactStorageResponse, Response)> {
        self.client
            .post(&format!("orgs/{}/artifacts/metadata/storage-record", org), request)
            .await
    }

    /// Lists storage records for an artifact digest, e.g. `sha256:…`.
    pub async fn list_artifact_storage_records(
        &self,
        org: &str,
        subject_digest: &str,
    ) -> GitHubResult<(ArtifactStorageResponse, Response)> {
        self.client
            .get(&format!(
                "orgs/{}/artifacts/{}/metadata/storage-records",
                org, subject_digest
            ))
            .await
    }

    /// Records that an artifact was deployed.
    ///
    /// `POST orgs/{org}/artifacts/metadata/deployment-record`
    pub async fn create_artifact_deployment_record(
        &self,
        org: &str,
        request: &CreateArtifactDeploymentRequest,
    ) -> GitHubResult<(ArtifactDeploymentResponse, Response)> {
        self.client
            .post(&format!("orgs/{}/artifacts/metadata/deployment-record", org), request)
            .await
    }

    /// Lists deployment records for an artifact digest.
    pub async fn list_artifact_deployment_records(
        &self,
        org: &str,
        subject_digest: &str,
    ) -> GitHubResult<(ArtifactDeploymentResponse, Response)> {
        self.client
            .get(&format!(
                "orgs/{}/artifacts/{}/metadata/deployment-records",
                org, subject_digest
            ))
            .await
    }
}

/// Body of a storage record creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateArtifactStorageRequest {
    pub name: String,
    pub digest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub registry_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    /// `active`, `eol` or `deleted`.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_repository: Option<String>,
}

/// Where an artifact is stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactStorageRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

/// Storage records for one digest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactStorageResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub storage_records: Vec<ArtifactStorageRecord>,
}

/// Body of a deployment record creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateArtifactDeploymentRequest {
    pub name: String,
    pub digest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// `deployed` or `decommissioned`.
    pub status: String,
    pub logical_environment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    pub deployment_name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub runtime_risks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_repository: Option<String>,
}

/// A deployment of an artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactDeploymentRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logical_environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub runtime_risks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attestation_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

/// Deployment records for one digest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactDeploymentResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deployment_records: Vec<ArtifactDeploymentRecord>,
}

impl_stringify! {
    CreateArtifactStorageRequest {
        name, digest, version, artifact_url, path, registry_url, repository, status,
        github_repository,
    }
    ArtifactStorageRecord {
        id, name, digest, artifact_url, registry_url, repository, status, created_at,
        updated_at,
    }
    ArtifactStorageResponse { total_count, storage_records }
    CreateArtifactDeploymentRequest {
        name, digest, version, status, logical_environment, physical_environment, cluster,
        deployment_name, tags, runtime_risks, github_repository,
    }
    ArtifactDeploymentRecord {
        id, digest, logical_environment, physical_environment, cluster, deployment_name,
        tags, runtime_risks, attestation_id, created_at, updated_at,
    }
    ArtifactDeploymentResponse { total_count, deployment_records }
}
