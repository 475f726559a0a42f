//! Codespace machine type operations.

use crate::client::{GitHubClient, Response};
use crate::errors::GitHubResult;
use crate::stringify::{impl_stringify, string_enum};
use serde::{Deserialize, Serialize};

/// Service for codespace machine types.
pub struct CodespacesService<'a> {
    client: &'a GitHubClient,
}

impl<'a> CodespacesService<'a> {
    /// Creates a new codespaces service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists the machine types available for codespaces in a repository.
    ///
    /// `GET repos/{owner}/{repo}/codespaces/machines`
    pub async fn list_machine_types_for_repository(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&ListMachineTypesOptions>,
    ) -> GitHubResult<(CodespacesMachines, Response)> {
        let path = format!("repos/{}/{}/codespaces/machines", owner, repo);
        match opts {
            Some(opts) => self.client.get_with_params(&path, opts).await,
            None => self.client.get(&path).await,
        }
    }

    /// Lists the machine types an existing codespace can transition to.
    ///
    /// `GET user/codespaces/{codespace_name}/machines`
    pub async fn list_machine_types_for_codespace(
        &self,
        codespace_name: &str,
    ) -> GitHubResult<(CodespacesMachines, Response)> {
        self.client
            .get(&format!("user/codespaces/{}/machines", codespace_name))
            .await
    }
}

string_enum! {
    /// Whether a prebuild exists for a machine type.
    pub enum PrebuildAvailability {
        None => "none",
        Ready => "ready",
        InProgress => "in_progress",
    }
}

/// A machine type a codespace can run on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodespacesMachine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// `linux`, `windows` or `macos`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_in_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_in_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpus: Option<i32>,
    /// `None` when the API reports `null` (no prebuild configured).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prebuild_availability: Option<PrebuildAvailability>,
}

/// Machine type listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodespacesMachines {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub machines: Vec<CodespacesMachine>,
}

/// Query options for repository machine types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListMachineTypesOptions {
    /// Location to check availability for, e.g. `WestUs2`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// IP used to pick a location when `location` is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
    /// Branch or commit to check prebuild availability for.
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl_stringify! {
    CodespacesMachine {
        name, display_name, operating_system, storage_in_bytes, memory_in_bytes, cpus,
        prebuild_availability,
    }
    CodespacesMachines { total_count, machines }
    ListMachineTypesOptions { location, client_ip, reference as "Ref" }
}
