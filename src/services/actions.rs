//! GitHub Actions secrets and artifacts.
//!
//! Secrets exist at three levels (repository, organization and deployment
//! environment) with the same five operations each. Values must be
//! encrypted with the level's public key before they are sent.

use crate::client::{escape_path_segment, GitHubClient, Response};
use crate::errors::GitHubResult;
use crate::stringify::impl_stringify;
use crate::types::{ListOptions, Repository, Timestamp};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Service for Actions operations.
pub struct ActionsService<'a> {
    client: &'a GitHubClient,
}

impl<'a> ActionsService<'a> {
    /// Creates a new actions service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    async fn get_public_key(&self, secrets_path: &str) -> GitHubResult<(PublicKey, Response)> {
        self.client
            .get(&format!("{}/public-key", secrets_path))
            .await
    }

    async fn list_secrets(
        &self,
        secrets_path: &str,
        opts: Option<&ListOptions>,
    ) -> GitHubResult<(Secrets, Response)> {
        match opts {
            Some(opts) => self.client.get_with_params(secrets_path, opts).await,
            None => self.client.get(secrets_path).await,
        }
    }

    async fn get_secret(&self, secrets_path: &str, name: &str) -> GitHubResult<(Secret, Response)> {
        self.client
            .get(&format!("{}/{}", secrets_path, name))
            .await
    }

    async fn put_secret(
        &self,
        secrets_path: &str,
        secret: &EncryptedSecret,
    ) -> GitHubResult<Response> {
        self.client
            .put_no_response(&format!("{}/{}", secrets_path, secret.name), Some(secret))
            .await
    }

    async fn delete_secret(&self, secrets_path: &str, name: &str) -> GitHubResult<Response> {
        self.client
            .delete(&format!("{}/{}", secrets_path, name))
            .await
    }

    fn repo_secrets_path(owner: &str, repo: &str) -> String {
        format!("repos/{}/{}/actions/secrets", owner, repo)
    }

    fn org_secrets_path(org: &str) -> String {
        format!("orgs/{}/actions/secrets", org)
    }

    fn env_secrets_path(repo_id: i64, environment: &str) -> GitHubResult<String> {
        Ok(format!(
            "repositories/{}/environments/{}/secrets",
            repo_id,
            escape_path_segment(environment)?
        ))
    }

    // Repository secrets

    /// Gets the public key used to encrypt repository secrets.
    pub async fn get_repo_public_key(
        &self,
        owner: &str,
        repo: &str,
    ) -> GitHubResult<(PublicKey, Response)> {
        self.get_public_key(&Self::repo_secrets_path(owner, repo)).await
    }

    /// Lists repository secrets without their values.
    pub async fn list_repo_secrets(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&ListOptions>,
    ) -> GitHubResult<(Secrets, Response)> {
        self.list_secrets(&Self::repo_secrets_path(owner, repo), opts).await
    }

    /// Gets a repository secret without its value.
    pub async fn get_repo_secret(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
    ) -> GitHubResult<(Secret, Response)> {
        self.get_secret(&Self::repo_secrets_path(owner, repo), name).await
    }

    /// Creates or updates a repository secret.
    pub async fn create_or_update_repo_secret(
        &self,
        owner: &str,
        repo: &str,
        secret: &EncryptedSecret,
    ) -> GitHubResult<Response> {
        self.put_secret(&Self::repo_secrets_path(owner, repo), secret).await
    }

    /// Deletes a repository secret.
    pub async fn delete_repo_secret(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
    ) -> GitHubResult<Response> {
        self.delete_secret(&Self::repo_secrets_path(owner, repo), name).await
    }

    // Organization secrets

    /// Gets the public key used to encrypt organization secrets.
    pub async fn get_org_public_key(&self, org: &str) -> GitHubResult<(PublicKey, Response)> {
        self.get_public_key(&Self::org_secrets_path(org)).await
    }

    /// Lists organization secrets without their values.
    pub async fn list_org_secrets(
        &self,
        org: &str,
        opts: Option<&ListOptions>,
    ) -> GitHubResult<(Secrets, Response)> {
        self.list_secrets(&Self::org_secrets_path(org), opts).await
    }

    /// Gets an organization secret without its value.
    pub async fn get_org_secret(&self, org: &str, name: &str) -> GitHubResult<(Secret, Response)> {
        self.get_secret(&Self::org_secrets_path(org), name).await
    }

    /// Creates or updates an organization secret.
    pub async fn create_or_update_org_secret(
        &self,
        org: &str,
        secret: &EncryptedSecret,
    ) -> GitHubResult<Response> {
        self.put_secret(&Self::org_secrets_path(org), secret).await
    }

    /// Deletes an organization secret.
    pub async fn delete_org_secret(&self, org: &str, name: &str) -> GitHubResult<Response> {
        self.delete_secret(&Self::org_secrets_path(org), name).await
    }

    /// Lists repositories that can read a `selected` visibility secret.
    pub async fn list_selected_repos_for_org_secret(
        &self,
        org: &str,
        name: &str,
        opts: Option<&ListOptions>,
    ) -> GitHubResult<(SelectedReposList, Response)> {
        let path = format!("{}/{}/repositories", Self::org_secrets_path(org), name);
        match opts {
            Some(opts) => self.client.get_with_params(&path, opts).await,
            None => self.client.get(&path).await,
        }
    }

    /// Replaces the repositories that can read an organization secret.
    pub async fn set_selected_repos_for_org_secret(
        &self,
        org: &str,
        name: &str,
        repository_ids: &[i64],
    ) -> GitHubResult<Response> {
        let body = SelectedRepoIds {
            selected_repository_ids: repository_ids.to_vec(),
        };
        self.client
            .put_no_response(
                &format!("{}/{}/repositories", Self::org_secrets_path(org), name),
                Some(&body),
            )
            .await
    }

    /// Grants one repository access to an organization secret.
    pub async fn add_selected_repo_to_org_secret(
        &self,
        org: &str,
        name: &str,
        repository_id: i64,
    ) -> GitHubResult<Response> {
        self.client
            .put_no_response(
                &format!(
                    "{}/{}/repositories/{}",
                    Self::org_secrets_path(org),
                    name,
                    repository_id
                ),
                Option::<&()>::None,
            )
            .await
    }

    /// Revokes one repository's access to an organization secret.
    pub async fn remove_selected_repo_from_org_secret(
        &self,
        org: &str,
        name: &str,
        repository_id: i64,
    ) -> GitHubResult<Response> {
        self.client
            .delete(&format!(
                "{}/{}/repositories/{}",
                Self::org_secrets_path(org),
                name,
                repository_id
            ))
            .await
    }

    // Environment secrets

    /// Gets the public key used to encrypt environment secrets.
    pub async fn get_env_public_key(
        &self,
        repo_id: i64,
        environment: &str,
    ) -> GitHubResult<(PublicKey, Response)> {
        self.get_public_key(&Self::env_secrets_path(repo_id, environment)?)
            .await
    }

    /// Lists environment secrets without their values.
    pub async fn list_env_secrets(
        &self,
        repo_id: i64,
        environment: &str,
        opts: Option<&ListOptions>,
    ) -> GitHubResult<(Secrets, Response)> {
        self.list_secrets(&Self::env_secrets_path(repo_id, environment)?, opts)
            .await
    }

    /// Gets an environment secret without its value.
    pub async fn get_env_secret(
        &self,
        repo_id: i64,
        environment: &str,
        name: &str,
    ) -> GitHubResult<(Secret, Response)> {
        self.get_secret(&Self::env_secrets_path(repo_id, environment)?, name)
            .await
    }

    /// Creates or updates an environment secret.
    pub async fn create_or_update_env_secret(
        &self,
        repo_id: i64,
        environment: &str,
        secret: &EncryptedSecret,
    ) -> GitHubResult<Response> {
        self.put_secret(&Self::env_secrets_path(repo_id, environment)?, secret)
            .await
    }

    /// Deletes an environment secret.
    pub async fn delete_env_secret(
        &self,
        repo_id: i64,
        environment: &str,
        name: &str,
    ) -> GitHubResult<Response> {
        self.delete_secret(&Self::env_secrets_path(repo_id, environment)?, name)
            .await
    }

    // Artifacts

    /// Lists artifacts for a repository.
    pub async fn list_artifacts(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&ListArtifactsOptions>,
    ) -> GitHubResult<(ArtifactList, Response)> {
        let path = format!("repos/{}/{}/actions/artifacts", owner, repo);
        match opts {
            Some(opts) => self.client.get_with_params(&path, opts).await,
            None => self.client.get(&path).await,
        }
    }

    /// Lists artifacts for a workflow run.
    pub async fn list_workflow_run_artifacts(
        &self,
        owner: &str,
        repo: &str,
        run_id: i64,
        opts: Option<&ListOptions>,
    ) -> GitHubResult<(ArtifactList, Response)> {
        let path = format!("repos/{}/{}/actions/runs/{}/artifacts", owner, repo, run_id);
        match opts {
            Some(opts) => self.client.get_with_params(&path, opts).await,
            None => self.client.get(&path).await,
        }
    }

    /// Gets an artifact.
    pub async fn get_artifact(
        &self,
        owner: &str,
        repo: &str,
        artifact_id: i64,
    ) -> GitHubResult<(Artifact, Response)> {
        self.client
            .get(&format!(
                "repos/{}/{}/actions/artifacts/{}",
                owner, repo, artifact_id
            ))
            .await
    }

    /// Deletes an artifact.
    pub async fn delete_artifact(
        &self,
        owner: &str,
        repo: &str,
        artifact_id: i64,
    ) -> GitHubResult<Response> {
        self.client
            .delete(&format!(
                "repos/{}/{}/actions/artifacts/{}",
                owner, repo, artifact_id
            ))
            .await
    }
}

/// Public key for encrypting secret values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicKey {
    /// Sent as a string by most endpoints and as an integer by a few.
    #[serde(
        default,
        deserialize_with = "deserialize_key_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub key_id: Option<String>,
    /// Base64-encoded key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

fn deserialize_key_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    struct KeyIdVisitor;

    impl<'de> Visitor<'de> for KeyIdVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or integer key id")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(KeyIdVisitor)
}

/// A secret's metadata; values are never returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Secret {
    pub name: String,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
    /// `all`, `private` or `selected`; organization secrets only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_repositories_url: Option<String>,
}

/// A page of secrets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Secrets {
    pub total_count: i64,
    #[serde(default)]
    pub secrets: Vec<Secret>,
}

/// A secret value encrypted with a [`PublicKey`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EncryptedSecret {
    /// Secret name; part of the path, never the body.
    #[serde(skip)]
    pub name: String,
    pub key_id: String,
    /// Base64 sealed-box ciphertext.
    pub encrypted_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub selected_repository_ids: Vec<i64>,
}

impl EncryptedSecret {
    /// Creates a secret from a name, key id and ciphertext.
    pub fn new(
        name: impl Into<String>,
        key_id: impl Into<String>,
        encrypted_value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            key_id: key_id.into(),
            encrypted_value: encrypted_value.into(),
            ..Default::default()
        }
    }
}

/// Repository ids allowed to read an organization secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedRepoIds {
    pub selected_repository_ids: Vec<i64>,
}

/// Repositories allowed to read an organization secret.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectedReposList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub repositories: Vec<Repository>,
}

/// The workflow run that produced an artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactWorkflowRun {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_repository_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_sha: Option<String>,
}

/// A workflow artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_in_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_download_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_run: Option<ArtifactWorkflowRun>,
}

/// A page of artifacts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<Artifact>,
}

/// Query options for repository artifacts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListArtifactsOptions {
    /// Only artifacts with exactly this name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub list_options: ListOptions,
}

impl_stringify! {
    PublicKey { key_id, key }
    Secret { name, created_at, updated_at, visibility, selected_repositories_url }
    Secrets { total_count, secrets }
    EncryptedSecret { name, key_id, encrypted_value, visibility, selected_repository_ids }
    SelectedRepoIds { selected_repository_ids }
    SelectedReposList { total_count, repositories }
    ArtifactWorkflowRun { id, repository_id, head_repository_id, head_branch, head_sha }
    Artifact {
        id, node_id, name, size_in_bytes, url, archive_download_url, expired, created_at,
        updated_at, expires_at, digest, workflow_run,
    }
    ArtifactList { total_count, artifacts }
    ListArtifactsOptions { name, list_options as "ListOptions" }
}
