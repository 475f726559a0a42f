//! Repository commit operations.

use crate::client::{escape_path_segment, GitHubClient, Response};
use crate::errors::GitHubResult;
use crate::stringify::impl_stringify;
use crate::types::{CommitAuthor, ListOptions, Timestamp, User};
use reqwest::header::IF_NONE_MATCH;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Media type for a unified diff.
pub const MEDIA_TYPE_DIFF: &str = "application/vnd.github.v3.diff";
/// Media type for a mailbox-format patch.
pub const MEDIA_TYPE_PATCH: &str = "application/vnd.github.v3.patch";
/// Media type for a bare commit SHA.
pub const MEDIA_TYPE_SHA: &str = "application/vnd.github.v3.sha";

/// Service for repository operations.
pub struct RepositoriesService<'a> {
    client: &'a GitHubClient,
}

impl<'a> RepositoriesService<'a> {
    /// Creates a new repositories service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists commits, newest first.
    pub async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        opts: Option<&CommitsListOptions>,
    ) -> GitHubResult<(Vec<RepositoryCommit>, Response)> {
        let path = format!("repos/{}/{}/commits", owner, repo);
        match opts {
            Some(opts) => self.client.get_with_params(&path, opts).await,
            None => self.client.get(&path).await,
        }
    }

    /// Gets a single commit; `opts` pages through its changed files.
    pub async fn get_commit(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
        opts: Option<&ListOptions>,
    ) -> GitHubResult<(RepositoryCommit, Response)> {
        let path = format!("repos/{}/{}/commits/{}", owner, repo, sha);
        match opts {
            Some(opts) => self.client.get_with_params(&path, opts).await,
            None => self.client.get(&path).await,
        }
    }

    /// Gets a commit as a diff or patch.
    pub async fn get_commit_raw(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
        raw_type: RawType,
    ) -> GitHubResult<(String, Response)> {
        let request = self
            .client
            .new_request(
                Method::GET,
                &format!("repos/{}/{}/commits/{}", owner, repo, sha),
                Option::<&()>::None,
            )?
            .with_accept(raw_type.media_type());
        self.client.send_text(request).await
    }

    /// Resolves a reference to a commit SHA.
    ///
    /// When `last_sha` is non-empty it is sent as `If-None-Match`; an
    /// unchanged reference answers `304 Not Modified` and yields `None`.
    pub async fn get_commit_sha1(
        &self,
        owner: &str,
        repo: &str,
        reference: &str,
        last_sha: &str,
    ) -> GitHubResult<(Option<String>, Response)> {
        let mut request = self
            .client
            .new_request(
                Method::GET,
                &format!("repos/{}/{}/commits/{}", owner, repo, escape_ref(reference)?),
                Option::<&()>::None,
            )?
            .with_accept(MEDIA_TYPE_SHA);
        if !last_sha.is_empty() {
            request = request.with_header(IF_NONE_MATCH, &format!("\"{}\"", last_sha))?;
        }
        self.client.send_conditional_text(request).await
    }
}

/// Escapes each segment of a ref, keeping the `/` separators.
fn escape_ref(reference: &str) -> GitHubResult<String> {
    let segments = reference
        .split('/')
        .map(escape_path_segment)
        .collect::<GitHubResult<Vec<_>>>()?;
    Ok(segments.join("/"))
}

/// Raw commit representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawType {
    /// Unified diff.
    Diff,
    /// `git format-patch` output.
    Patch,
}

impl RawType {
    /// Media type requested for this representation.
    pub fn media_type(self) -> &'static str {
        match self {
            Self::Diff => MEDIA_TYPE_DIFF,
            Self::Patch => MEDIA_TYPE_PATCH,
        }
    }
}

/// Tree reference of a commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Signature verification of a commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignatureVerification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

/// A git commit object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<CommitAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committer: Option<CommitAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<Tree>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<Commit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<SignatureVerification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<i32>,
}

/// Line counts of a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additions: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletions: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i32>,
}

/// A file changed by a commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additions: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletions: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<i32>,
    /// `added`, `removed`, `modified`, `renamed`, `copied`, `changed` or `unchanged`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blob_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_filename: Option<String>,
}

/// A commit as returned by the repository commits endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryCommit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<Commit>,
    /// GitHub account of the author, when it could be matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committer: Option<User>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<Commit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<CommitStats>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<CommitFile>,
}

/// Query options for listing commits.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommitsListOptions {
    /// SHA or branch to start listing from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    /// Only commits touching this path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Login or email of the author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Login or email of the committer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<Timestamp>,
    #[serde(flatten)]
    pub list_options: ListOptions,
}

impl_stringify! {
    Tree { sha, url }
    SignatureVerification { verified, reason, signature, payload }
    Commit {
        sha, author, committer, message, tree, parents, html_url, url, verification,
        node_id, comment_count,
    }
    CommitStats { additions, deletions, total }
    CommitFile {
        sha, filename, additions, deletions, changes, status, patch, blob_url, raw_url,
        contents_url, previous_filename,
    }
    RepositoryCommit {
        node_id, sha, commit, author, committer, parents, html_url, url, comments_url,
        stats, files,
    }
    CommitsListOptions {
        sha, path, author, committer, since, until, list_options as "ListOptions",
    }
}
