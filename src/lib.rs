//! # GitHub API Bindings
//!
//! Typed bindings for part of the GitHub REST API and webhook payloads:
//! - Resource structs mirroring GitHub's JSON, with absent fields omitted
//! - Service objects issuing one HTTP call per method
//! - Token or basic authentication header injection
//! - Webhook signature verification and typed event parsing
//! - A deterministic debug renderer ([`stringify`]) for every resource
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use github::{AuthMethod, GitHubClient, GitHubConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GitHubConfig::builder()
//!         .auth(AuthMethod::token("ghp_xxxxxxxxxxxx"))
//!         .build()?;
//!
//!     let client = GitHubClient::new(config)?;
//!
//!     let (budget, response) = client
//!         .billing()
//!         .get_organization_budget("octo-org", "2066deda-923f-43f9-88d2-62395a28c0cdd")
//!         .await?;
//!     println!("{} ({})", github::stringify(&budget), response.status());
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod errors;
pub mod stringify;
pub mod types;

// Authentication
pub mod auth;

// HTTP client and transport
pub mod client;

// Link header parsing
pub mod pagination;

// API Services
pub mod services;

// Webhooks
pub mod webhooks;

// Observability
pub mod observability;

// Re-exports for convenience
pub use auth::AuthMethod;
pub use client::{ApiRequest, GitHubClient, GitHubClientBuilder, Response};
pub use config::{GitHubConfig, GitHubConfigBuilder, PoolConfig};
pub use errors::{ErrorDetail, GitHubError, GitHubErrorKind, GitHubResult};
pub use pagination::PaginationLinks;
pub use services::*;
pub use stringify::{stringify, Stringify};
pub use types::*;
pub use webhooks::{parse_webhook, WebhookEvent, WebhookHandler, WebhookProcessor, WebhookVerifier};
