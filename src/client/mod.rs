//! GitHub API client implementation.
//!
//! Every service method goes through the same two steps: [`GitHubClient::new_request`]
//! validates the path and builds an [`ApiRequest`] without touching the
//! network, then one of the `send_*` helpers executes it and decodes the body.

mod response;

pub use response::{Response, REQUEST_ID_HEADER};

use crate::auth::AuthMethod;
use crate::config::{GitHubConfig, GitHubConfigBuilder};
use crate::errors::{ErrorDetail, GitHubError, GitHubErrorKind, GitHubResult};
use crate::observability::TracingHooks;
use crate::services::*;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT,
};
use reqwest::{Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Instant;
use url::Url;

/// Default media type for JSON responses.
pub const MEDIA_TYPE_JSON: &str = "application/vnd.github+json";

/// Header carrying the requested API version.
pub const API_VERSION_HEADER: &str = "x-github-api-version";

/// GitHub error response format.
#[derive(Debug, Deserialize)]
struct GitHubErrorResponse {
    message: Option<String>,
    documentation_url: Option<String>,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

/// A fully built request that has not been sent yet.
#[derive(Debug)]
pub struct ApiRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Absolute request URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Serialized JSON body, if any.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Replaces the `Accept` header.
    pub fn with_accept(mut self, media_type: &'static str) -> Self {
        self.headers.insert(ACCEPT, HeaderValue::from_static(media_type));
        self
    }

    /// Sets an extra header.
    pub fn with_header(mut self, name: HeaderName, value: &str) -> GitHubResult<Self> {
        let value = HeaderValue::from_str(value).map_err(|e| {
            GitHubError::invalid_parameter(format!("Invalid value for header {}: {}", name, e))
                .with_cause(e)
        })?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Appends query parameters encoded from an options struct.
    pub fn with_query<P: Serialize + ?Sized>(mut self, params: &P) -> GitHubResult<Self> {
        let query = serde_urlencoded::to_string(params).map_err(|e| {
            GitHubError::invalid_parameter(format!("Failed to serialize parameters: {}", e))
                .with_cause(e)
        })?;

        if !query.is_empty() {
            let merged = match self.url.query() {
                Some(existing) if !existing.is_empty() => format!("{}&{}", existing, query),
                _ => query,
            };
            self.url.set_query(Some(&merged));
        }

        Ok(self)
    }
}

/// GitHub API client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// HTTP client.
    http: Client,
    /// Configuration.
    config: GitHubConfig,
    /// Parsed base URL.
    base_url: Url,
}

impl GitHubClient {
    /// Creates a new GitHub client.
    pub fn new(config: GitHubConfig) -> GitHubResult<Self> {
        config.validate()?;

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            GitHubError::new(
                GitHubErrorKind::InvalidBaseUrl,
                format!("Base URL is not a valid URL: {}", e),
            )
            .with_cause(e)
        })?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool.max_idle_per_host)
            .pool_idle_timeout(config.pool.idle_timeout)
            .build()
            .map_err(|e| {
                GitHubError::new(
                    GitHubErrorKind::InvalidConfiguration,
                    format!("Failed to create HTTP client: {}", e),
                )
                .with_cause(e)
            })?;

        Ok(Self {
            http,
            config,
            base_url,
        })
    }

    /// Creates a client configured from `GITHUB_*` environment variables.
    pub fn from_env() -> GitHubResult<Self> {
        Self::new(GitHubConfig::from_env()?)
    }

    /// Creates a new client builder.
    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::new()
    }

    /// Gets the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Gets the configuration.
    pub fn config(&self) -> &GitHubConfig {
        &self.config
    }

    // Service accessors

    /// Gets the actions service (secrets and artifacts).
    pub fn actions(&self) -> ActionsService<'_> {
        ActionsService::new(self)
    }

    /// Gets the billing service.
    pub fn billing(&self) -> BillingService<'_> {
        BillingService::new(self)
    }

    /// Gets the codespaces service.
    pub fn codespaces(&self) -> CodespacesService<'_> {
        CodespacesService::new(self)
    }

    /// Gets the organizations service.
    pub fn organizations(&self) -> OrganizationsService<'_> {
        OrganizationsService::new(self)
    }

    /// Gets the repositories service.
    pub fn repositories(&self) -> RepositoriesService<'_> {
        RepositoriesService::new(self)
    }

    /// Gets the SCIM provisioning service.
    pub fn scim(&self) -> ScimService<'_> {
        ScimService::new(self)
    }

    /// Gets the users service.
    pub fn users(&self) -> UsersService<'_> {
        UsersService::new(self)
    }

    // Request construction

    /// Builds a request for a path relative to the base URL.
    ///
    /// Fails with [`GitHubErrorKind::InvalidParameter`] when the path carries
    /// control characters, a malformed `%` escape, or an absolute URL, or when
    /// the body cannot be serialized. No I/O happens here.
    pub fn new_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> GitHubResult<ApiRequest> {
        if let Err(e) = validate_path(path) {
            TracingHooks::on_request_rejected(method.as_str(), path, e.message());
            return Err(e);
        }

        let url = self.build_url(path)?;

        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| {
                GitHubError::invalid_parameter(format!("Failed to serialize request body: {}", e))
                    .with_cause(e)
            })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE_JSON));
        headers.insert(USER_AGENT, header_value(&self.config.user_agent)?);
        headers.insert(API_VERSION_HEADER, header_value(&self.config.api_version)?);
        if let Some(auth) = &self.config.auth {
            headers.insert(AUTHORIZATION, auth_header(auth)?);
        }
        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        Ok(ApiRequest {
            method,
            url,
            headers,
            body,
        })
    }

    fn build_url(&self, path: &str) -> GitHubResult<Url> {
        self.base_url.join(path.trim_start_matches('/')).map_err(|e| {
            GitHubError::invalid_parameter(format!("Invalid request path {:?}: {}", path, e))
                .with_cause(e)
        })
    }

    // Execution

    /// Sends a request and decodes a JSON body.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> GitHubResult<(T, Response)> {
        let (raw, response) = self.execute(request, false).await?;
        let bytes = raw.bytes().await.map_err(transport_error)?;
        let value = serde_json::from_slice(&bytes).map_err(|e| {
            GitHubError::deserialization(format!("Failed to deserialize response: {}", e))
                .with_status(response.status().as_u16())
                .with_cause(e)
        })?;
        Ok((value, response))
    }

    /// Sends a request and returns the body as text.
    pub async fn send_text(&self, request: ApiRequest) -> GitHubResult<(String, Response)> {
        let (raw, response) = self.execute(request, false).await?;
        let text = raw.text().await.map_err(transport_error)?;
        Ok((text, response))
    }

    /// Sends a request whose body is discarded.
    pub async fn send_empty(&self, request: ApiRequest) -> GitHubResult<Response> {
        let (_, response) = self.execute(request, false).await?;
        Ok(response)
    }

    /// Sends a conditional request; `304 Not Modified` yields `None`.
    pub async fn send_conditional_text(
        &self,
        request: ApiRequest,
    ) -> GitHubResult<(Option<String>, Response)> {
        let (raw, response) = self.execute(request, true).await?;
        if response.status() == StatusCode::NOT_MODIFIED {
            return Ok((None, response));
        }
        let text = raw.text().await.map_err(transport_error)?;
        Ok((Some(text), response))
    }

    // HTTP methods

    /// Makes a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> GitHubResult<(T, Response)> {
        let request = self.new_request(Method::GET, path, Option::<&()>::None)?;
        self.send_json(request).await
    }

    /// Makes a GET request with query parameters.
    pub async fn get_with_params<T: DeserializeOwned, P: Serialize + ?Sized>(
        &self,
        path: &str,
        params: &P,
    ) -> GitHubResult<(T, Response)> {
        let request = self
            .new_request(Method::GET, path, Option::<&()>::None)?
            .with_query(params)?;
        self.send_json(request).await
    }

    /// Makes a POST request.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> GitHubResult<(T, Response)> {
        let request = self.new_request(Method::POST, path, Some(body))?;
        self.send_json(request).await
    }

    /// Makes a PUT request.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> GitHubResult<(T, Response)> {
        let request = self.new_request(Method::PUT, path, Some(body))?;
        self.send_json(request).await
    }

    /// Makes a PUT request without a response body.
    pub async fn put_no_response<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> GitHubResult<Response> {
        let request = self.new_request(Method::PUT, path, body)?;
        self.send_empty(request).await
    }

    /// Makes a PATCH request.
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> GitHubResult<(T, Response)> {
        let request = self.new_request(Method::PATCH, path, Some(body))?;
        self.send_json(request).await
    }

    /// Makes a DELETE request.
    pub async fn delete(&self, path: &str) -> GitHubResult<Response> {
        let request = self.new_request(Method::DELETE, path, Option::<&()>::None)?;
        self.send_empty(request).await
    }

    // Internal methods

    async fn execute(
        &self,
        request: ApiRequest,
        allow_not_modified: bool,
    ) -> GitHubResult<(reqwest::Response, Response)> {
        let ApiRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let method_name = method.to_string();
        let url_string = url.to_string();
        TracingHooks::on_request_start(&method_name, &url_string, &headers);
        let started = Instant::now();

        let mut builder = self.http.request(method, url).headers(headers);
        if let Some(bytes) = body {
            builder = builder.body(bytes);
        }

        let raw = match builder.send().await {
            Ok(raw) => raw,
            Err(e) => {
                let error = transport_error(e);
                TracingHooks::on_request_error(&method_name, &url_string, error.message());
                return Err(error);
            }
        };

        let status = raw.status();
        TracingHooks::on_request_complete(
            &method_name,
            &url_string,
            status.as_u16(),
            started.elapsed(),
        );

        let not_modified = allow_not_modified && status == StatusCode::NOT_MODIFIED;
        if !status.is_success() && !not_modified {
            let error = Self::handle_error_response(raw).await;
            TracingHooks::on_request_error(&method_name, &url_string, error.message());
            return Err(error);
        }

        let response = Response::from_parts(status, raw.headers().clone());
        Ok((raw, response))
    }

    async fn handle_error_response(raw: reqwest::Response) -> GitHubError {
        let status = raw.status();
        let request_id = response::request_id(raw.headers());

        let error_body = match raw.bytes().await {
            Ok(bytes) => serde_json::from_slice::<GitHubErrorResponse>(&bytes).ok(),
            Err(_) => None,
        };

        let message = error_body
            .as_ref()
            .and_then(|e| e.message.clone())
            .unwrap_or_else(|| format!("HTTP {} error", status.as_u16()));

        let documentation_url = error_body.as_ref().and_then(|e| e.documentation_url.clone());

        let details: Vec<ErrorDetail> = error_body
            .map(|e| {
                e.errors
                    .into_iter()
                    .filter_map(|v| serde_json::from_value(v).ok())
                    .collect()
            })
            .unwrap_or_default();

        GitHubError::from_response(status.as_u16(), message, documentation_url, request_id)
            .with_details(details)
    }
}

fn transport_error(e: reqwest::Error) -> GitHubError {
    if e.is_timeout() {
        GitHubError::timeout(format!("Request timed out: {}", e)).with_cause(e)
    } else if e.is_connect() {
        GitHubError::new(
            GitHubErrorKind::ConnectionFailed,
            format!("Connection failed: {}", e),
        )
        .with_cause(e)
    } else {
        GitHubError::new(GitHubErrorKind::Unknown, format!("Request failed: {}", e)).with_cause(e)
    }
}

fn header_value(value: &str) -> GitHubResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| {
        GitHubError::configuration(format!("Invalid header value {:?}: {}", value, e)).with_cause(e)
    })
}

fn auth_header(auth: &AuthMethod) -> GitHubResult<HeaderValue> {
    let mut value = HeaderValue::from_str(&auth.header_value()).map_err(|e| {
        GitHubError::configuration(format!(
            "Credentials ({}) are not a valid header value",
            auth.token_prefix()
        ))
        .with_cause(e)
    })?;
    value.set_sensitive(true);
    Ok(value)
}

/// Rejects paths that cannot be sent as-is.
fn validate_path(path: &str) -> GitHubResult<()> {
    if path.is_empty() {
        return Err(GitHubError::invalid_parameter("Request path cannot be empty"));
    }

    if path.chars().any(char::is_control) {
        return Err(GitHubError::invalid_parameter(format!(
            "Request path {:?} contains control characters",
            path
        )));
    }

    if path.contains("://") || path.starts_with("//") {
        return Err(GitHubError::invalid_parameter(format!(
            "Request path {:?} must be relative to the base URL",
            path
        )));
    }

    let bytes = path.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .map(|hex| hex.iter().all(u8::is_ascii_hexdigit))
                .unwrap_or(false);
            if !valid {
                return Err(GitHubError::invalid_parameter(format!(
                    "Request path {:?} contains an invalid escape at byte {}",
                    path, i
                )));
            }
        }
    }

    Ok(())
}

/// Percent-escapes a single path segment, including any `/`.
pub(crate) fn escape_path_segment(segment: &str) -> GitHubResult<String> {
    let mut scratch = Url::parse("http://segment.invalid/").map_err(|e| {
        GitHubError::invalid_parameter(format!("Failed to escape path segment: {}", e))
    })?;
    scratch
        .path_segments_mut()
        .map_err(|_| GitHubError::invalid_parameter("Failed to escape path segment"))?
        .clear()
        .push(segment);
    Ok(scratch.path().trim_start_matches('/').to_string())
}

/// Builder for GitHubClient.
pub struct GitHubClientBuilder {
    config_builder: GitHubConfigBuilder,
}

impl GitHubClientBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            config_builder: GitHubConfig::builder(),
        }
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(url);
        self
    }

    /// Sets the authentication method.
    pub fn auth(mut self, auth: AuthMethod) -> Self {
        self.config_builder = self.config_builder.auth(auth);
        self
    }

    /// Sets a bearer token.
    pub fn token(self, token: impl Into<String>) -> Self {
        self.auth(AuthMethod::token(token))
    }

    /// Sets the API version header.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.api_version(version);
        self
    }

    /// Sets the timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.user_agent(ua);
        self
    }

    /// Builds the client.
    pub fn build(self) -> GitHubResult<GitHubClient> {
        let config = self.config_builder.build()?;
        GitHubClient::new(config)
    }
}

impl Default for GitHubClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
