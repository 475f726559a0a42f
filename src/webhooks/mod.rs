//! GitHub webhook deliveries: signature verification, payload extraction and
//! typed event parsing.

use crate::errors::{GitHubError, GitHubResult};
use crate::observability::TracingHooks;
use crate::stringify::impl_stringify;
use crate::types::{CommitAuthor, Organization, Repository, Timestamp, User};
use hmac::digest::{KeyInit, MacError};
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use std::collections::BTreeMap;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

/// Header carrying the event name, e.g. `push`.
pub const EVENT_TYPE_HEADER: &str = "X-GitHub-Event";
/// Header carrying the unique delivery GUID.
pub const DELIVERY_ID_HEADER: &str = "X-GitHub-Delivery";
/// Header carrying the `sha256=` signature.
pub const SHA256_SIGNATURE_HEADER: &str = "X-Hub-Signature-256";
/// Legacy header carrying the `sha1=` signature.
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// HMAC digest used to sign a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    /// Only sent in the legacy `X-Hub-Signature` header.
    Sha1,
    Sha256,
    Sha512,
}

impl SignatureAlgorithm {
    /// Signature prefix, including the `=`.
    pub fn prefix(&self) -> &'static str {
        match self {
            SignatureAlgorithm::Sha1 => "sha1=",
            SignatureAlgorithm::Sha256 => "sha256=",
            SignatureAlgorithm::Sha512 => "sha512=",
        }
    }

    fn split(signature: &str) -> GitHubResult<(Self, &str)> {
        [
            SignatureAlgorithm::Sha1,
            SignatureAlgorithm::Sha256,
            SignatureAlgorithm::Sha512,
        ]
        .into_iter()
        .find_map(|algorithm| {
            signature
                .strip_prefix(algorithm.prefix())
                .map(|digest| (algorithm, digest))
        })
        .ok_or_else(|| {
            GitHubError::invalid_signature(
                "Invalid signature format: must start with 'sha1=', 'sha256=' or 'sha512='",
            )
        })
    }

    /// Signs `payload` and returns the prefixed hex digest.
    pub fn sign(&self, secret: &str, payload: &[u8]) -> GitHubResult<String> {
        let secret = secret.as_bytes();
        let digest = match self {
            SignatureAlgorithm::Sha1 => mac_digest(keyed::<HmacSha1>(secret)?, payload),
            SignatureAlgorithm::Sha256 => mac_digest(keyed::<HmacSha256>(secret)?, payload),
            SignatureAlgorithm::Sha512 => mac_digest(keyed::<HmacSha512>(secret)?, payload),
        };
        Ok(format!("{}{}", self.prefix(), hex::encode(digest)))
    }

    fn verify(&self, secret: &[u8], payload: &[u8], expected: &[u8]) -> GitHubResult<()> {
        let result = match self {
            SignatureAlgorithm::Sha1 => mac_verify(keyed::<HmacSha1>(secret)?, payload, expected),
            SignatureAlgorithm::Sha256 => {
                mac_verify(keyed::<HmacSha256>(secret)?, payload, expected)
            }
            SignatureAlgorithm::Sha512 => {
                mac_verify(keyed::<HmacSha512>(secret)?, payload, expected)
            }
        };
        result.map_err(|_| GitHubError::invalid_signature("Signature verification failed"))
    }
}

fn keyed<M: Mac + KeyInit>(secret: &[u8]) -> GitHubResult<M> {
    <M as Mac>::new_from_slice(secret)
        .map_err(|e| GitHubError::invalid_signature(format!("Failed to create HMAC: {}", e)))
}

fn mac_digest<M: Mac>(mut mac: M, payload: &[u8]) -> Vec<u8> {
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

// verify_slice compares in constant time.
fn mac_verify<M: Mac>(mut mac: M, payload: &[u8], expected: &[u8]) -> Result<(), MacError> {
    mac.update(payload);
    mac.verify_slice(expected)
}

/// Verifies delivery signatures against a shared secret.
pub struct WebhookVerifier {
    secret: SecretString,
}

impl WebhookVerifier {
    /// Creates a verifier for the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
        }
    }

    /// Verifies a `sha1=`, `sha256=` or `sha512=` hex signature over the raw body.
    pub fn verify(&self, signature: &str, payload: &[u8]) -> GitHubResult<()> {
        let (algorithm, digest) = SignatureAlgorithm::split(signature.trim())?;
        let expected = hex::decode(digest).map_err(|e| {
            GitHubError::invalid_signature(format!("Invalid signature hex encoding: {}", e))
                .with_cause(e)
        })?;
        algorithm.verify(self.secret.expose_secret().as_bytes(), payload, &expected)
    }

    /// Verifies the signature, then parses the body as `T`.
    pub fn verify_and_parse<T: for<'de> Deserialize<'de>>(
        &self,
        signature: &str,
        payload: &[u8],
    ) -> GitHubResult<T> {
        self.verify(signature, payload)?;
        serde_json::from_slice(payload).map_err(|e| {
            GitHubError::payload(format!("Failed to parse webhook payload: {}", e)).with_cause(e)
        })
    }
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Computes the `sha256=` signature GitHub would send for `payload`.
pub fn compute_signature(secret: &str, payload: &[u8]) -> GitHubResult<String> {
    SignatureAlgorithm::Sha256.sign(secret, payload)
}

/// Extracts the JSON payload from a delivery body.
///
/// JSON bodies are returned unchanged. Form-encoded bodies carry the JSON in
/// their `payload` field.
pub fn payload_from_body(content_type: &str, body: &[u8]) -> GitHubResult<Vec<u8>> {
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match media_type.as_str() {
        JSON_CONTENT_TYPE => Ok(body.to_vec()),
        FORM_CONTENT_TYPE => {
            let fields: Vec<(String, String)> = serde_urlencoded::from_bytes(body).map_err(|e| {
                GitHubError::payload(format!("Failed to decode form body: {}", e)).with_cause(e)
            })?;
            fields
                .into_iter()
                .find(|(name, _)| name == "payload")
                .map(|(_, value)| value.into_bytes())
                .ok_or_else(|| GitHubError::payload("Form body has no 'payload' field"))
        }
        other => Err(GitHubError::payload(format!(
            "Webhook request has unsupported Content-Type {:?}",
            other
        ))),
    }
}

fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Returns the event name of a delivery.
pub fn event_type(headers: &HeaderMap) -> Option<&str> {
    header_str(headers, EVENT_TYPE_HEADER)
}

/// Returns the delivery GUID.
pub fn delivery_id(headers: &HeaderMap) -> Option<&str> {
    header_str(headers, DELIVERY_ID_HEADER)
}

/// Returns the delivery signature, preferring `X-Hub-Signature-256`.
pub fn signature(headers: &HeaderMap) -> Option<&str> {
    header_str(headers, SHA256_SIGNATURE_HEADER)
        .or_else(|| header_str(headers, SIGNATURE_HEADER))
}

/// GitHub App installation a delivery was sent for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Installation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<User>,
}

/// Repository or organization webhook configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub hook_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ping_url: Option<String>,
}

/// Sent when a webhook is created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PingEvent {
    /// Random GitHub zen string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook: Option<Hook>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation: Option<Installation>,
}

/// A commit as it appears in a push payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadCommit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_id: Option<String>,
    /// Whether the commit was pushed for the first time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinct: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<CommitAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committer: Option<CommitAuthor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modified: Vec<String>,
}

/// Commits pushed to a branch or tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_id: Option<i64>,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forced: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commits: Vec<HeadCommit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_commit: Option<HeadCommit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pusher: Option<CommitAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation: Option<Installation>,
}

/// A branch or tag was created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateEvent {
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
    /// `branch` or `tag`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pusher_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation: Option<Installation>,
}

/// A branch or tag was deleted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteEvent {
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pusher_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation: Option<Installation>,
}

/// A repository was forked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForkEvent {
    /// The newly created fork.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forkee: Option<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation: Option<Installation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StarEvent {
    /// `created` or `deleted`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Absent when the star was removed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starred_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation: Option<Installation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WatchEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation: Option<Installation>,
}

/// A collaborator was added, removed or edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<User>,
    /// Previous permission values on `edited`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation: Option<Installation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation: Option<Installation>,
}

impl_stringify! {
    Installation { id, node_id, app_id, target_type, account }
    Hook {
        id, hook_type as "Type", name, active, events, config, created_at, updated_at,
        url, ping_url,
    }
    PingEvent { zen, hook_id, hook, installation }
    HeadCommit {
        id, tree_id, distinct, message, timestamp, url, author, committer, added,
        removed, modified,
    }
    PushEvent {
        push_id, git_ref as "Ref", before, after, created, deleted, forced, base_ref,
        compare, commits, head_commit, pusher, repository as "Repo", organization,
        sender, installation,
    }
    CreateEvent {
        git_ref as "Ref", ref_type, master_branch, description, pusher_type,
        repository as "Repo", organization, sender, installation,
    }
    DeleteEvent {
        git_ref as "Ref", ref_type, pusher_type, repository as "Repo", organization,
        sender, installation,
    }
    ForkEvent { forkee, repository as "Repo", sender, installation }
    StarEvent { action, starred_at, repository as "Repo", organization, sender, installation }
    WatchEvent { action, repository as "Repo", sender, installation }
    MemberEvent { action, member, changes, repository as "Repo", sender, installation }
    RepositoryEvent { action, repository as "Repo", organization, sender, installation }
}

/// A parsed webhook delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEvent {
    Ping(PingEvent),
    Push(Box<PushEvent>),
    Create(CreateEvent),
    Delete(DeleteEvent),
    Fork(ForkEvent),
    Star(StarEvent),
    Watch(WatchEvent),
    Member(MemberEvent),
    Repository(RepositoryEvent),
    /// An event without a typed payload; the JSON is kept as-is.
    Unknown {
        event_type: String,
        payload: serde_json::Value,
    },
}

impl WebhookEvent {
    /// The `X-GitHub-Event` name this event was parsed from.
    pub fn event_type(&self) -> &str {
        match self {
            WebhookEvent::Ping(_) => "ping",
            WebhookEvent::Push(_) => "push",
            WebhookEvent::Create(_) => "create",
            WebhookEvent::Delete(_) => "delete",
            WebhookEvent::Fork(_) => "fork",
            WebhookEvent::Star(_) => "star",
            WebhookEvent::Watch(_) => "watch",
            WebhookEvent::Member(_) => "member",
            WebhookEvent::Repository(_) => "repository",
            WebhookEvent::Unknown { event_type, .. } => event_type,
        }
    }
}

fn decode<T: for<'de> Deserialize<'de>>(event_type: &str, payload: &[u8]) -> GitHubResult<T> {
    serde_json::from_slice(payload).map_err(|e| {
        GitHubError::payload(format!("Failed to parse {} event: {}", event_type, e)).with_cause(e)
    })
}

/// Parses a delivery payload according to its `X-GitHub-Event` name.
pub fn parse_webhook(event_type: &str, payload: &[u8]) -> GitHubResult<WebhookEvent> {
    Ok(match event_type {
        "ping" => WebhookEvent::Ping(decode(event_type, payload)?),
        "push" => WebhookEvent::Push(Box::new(decode(event_type, payload)?)),
        "create" => WebhookEvent::Create(decode(event_type, payload)?),
        "delete" => WebhookEvent::Delete(decode(event_type, payload)?),
        "fork" => WebhookEvent::Fork(decode(event_type, payload)?),
        "star" => WebhookEvent::Star(decode(event_type, payload)?),
        "watch" => WebhookEvent::Watch(decode(event_type, payload)?),
        "member" => WebhookEvent::Member(decode(event_type, payload)?),
        "repository" => WebhookEvent::Repository(decode(event_type, payload)?),
        other => WebhookEvent::Unknown {
            event_type: other.to_string(),
            payload: decode(other, payload)?,
        },
    })
}

/// Receives parsed deliveries. Every method defaults to a no-op.
pub trait WebhookHandler: Send + Sync {
    fn on_ping(&self, _event: &PingEvent) -> GitHubResult<()> {
        Ok(())
    }

    fn on_push(&self, _event: &PushEvent) -> GitHubResult<()> {
        Ok(())
    }

    fn on_create(&self, _event: &CreateEvent) -> GitHubResult<()> {
        Ok(())
    }

    fn on_delete(&self, _event: &DeleteEvent) -> GitHubResult<()> {
        Ok(())
    }

    fn on_fork(&self, _event: &ForkEvent) -> GitHubResult<()> {
        Ok(())
    }

    fn on_star(&self, _event: &StarEvent) -> GitHubResult<()> {
        Ok(())
    }

    fn on_watch(&self, _event: &WatchEvent) -> GitHubResult<()> {
        Ok(())
    }

    fn on_member(&self, _event: &MemberEvent) -> GitHubResult<()> {
        Ok(())
    }

    fn on_repository(&self, _event: &RepositoryEvent) -> GitHubResult<()> {
        Ok(())
    }

    /// Handles an event with no typed payload.
    fn on_unknown(&self, _event_type: &str, _payload: &serde_json::Value) -> GitHubResult<()> {
        Ok(())
    }
}

/// Verifies, parses and dispatches deliveries to a [`WebhookHandler`].
pub struct WebhookProcessor<H: WebhookHandler> {
    verifier: WebhookVerifier,
    handler: H,
}

impl<H: WebhookHandler> WebhookProcessor<H> {
    /// Creates a processor with the webhook secret and a handler.
    pub fn new(secret: impl Into<String>, handler: H) -> Self {
        Self {
            verifier: WebhookVerifier::new(secret),
            handler,
        }
    }

    /// Returns the handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Processes a JSON delivery body.
    pub fn process(&self, event_type: &str, signature: &str, payload: &[u8]) -> GitHubResult<()> {
        let verified = self.verifier.verify(signature, payload);
        TracingHooks::on_webhook_verified(event_type, verified.is_ok());
        verified?;

        let event = parse_webhook(event_type, payload)?;
        self.dispatch(&event)
    }

    /// Processes a delivery from its request headers and raw body.
    ///
    /// The signature covers the raw body, so form-encoded deliveries are
    /// verified before their `payload` field is extracted.
    pub fn process_request(&self, headers: &HeaderMap, body: &[u8]) -> GitHubResult<()> {
        let event_type = event_type(headers)
            .ok_or_else(|| GitHubError::payload(format!("Missing {} header", EVENT_TYPE_HEADER)))?;
        let signature = signature(headers).ok_or_else(|| {
            TracingHooks::on_webhook_verified(event_type, false);
            GitHubError::invalid_signature(format!(
                "Missing {} or {} header",
                SHA256_SIGNATURE_HEADER, SIGNATURE_HEADER
            ))
        })?;

        let verified = self.verifier.verify(signature, body);
        TracingHooks::on_webhook_verified(event_type, verified.is_ok());
        verified?;

        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(JSON_CONTENT_TYPE);
        let payload = payload_from_body(content_type, body)?;
        let event = parse_webhook(event_type, &payload)?;
        tracing::debug!(
            event_type = %event_type,
            delivery_id = delivery_id(headers).unwrap_or_default(),
            "Dispatching webhook delivery"
        );
        self.dispatch(&event)
    }

    fn dispatch(&self, event: &WebhookEvent) -> GitHubResult<()> {
        match event {
            WebhookEvent::Ping(e) => self.handler.on_ping(e),
            WebhookEvent::Push(e) => self.handler.on_push(e),
            WebhookEvent::Create(e) => self.handler.on_create(e),
            WebhookEvent::Delete(e) => self.handler.on_delete(e),
            WebhookEvent::Fork(e) => self.handler.on_fork(e),
            WebhookEvent::Star(e) => self.handler.on_star(e),
            WebhookEvent::Watch(e) => self.handler.on_watch(e),
            WebhookEvent::Member(e) => self.handler.on_member(e),
            WebhookEvent::Repository(e) => self.handler.on_repository(e),
            WebhookEvent::Unknown { event_type, payload } => {
                self.handler.on_unknown(event_type, payload)
            }
        }
    }
}
