//! Integration tests using WireMock
//!
//! These tests run each service against a mock HTTP server and check the full
//! request/response cycle: paths, headers, query strings, bodies, decoding and
//! error mapping.

mod actions;
mod billing;
mod codespaces;
mod organizations;
mod repositories;
mod scim;
mod users;

use github::GitHubClient;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "test-token";

/// Helper to start a mock server.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Helper to build a token-authenticated client pointing at the mock server.
pub fn client_for(server: &MockServer) -> GitHubClient {
    GitHubClient::builder()
        .base_url(server.uri())
        .token(TEST_TOKEN)
        .build()
        .expect("Failed to build client")
}

/// Helper to create a mock that requires the standard GitHub headers.
pub fn mock_with_auth(method_matcher: &str, path_matcher: &str) -> MockBuilder {
    Mock::given(method(method_matcher))
        .and(path(path_matcher))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Accept", "application/vnd.github+json"))
}

/// Helper to create success response templates.
pub fn success_response(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}
