//! Configuration types for the GitHub client.

use crate::auth::AuthMethod;
use crate::errors::{GitHubError, GitHubErrorKind, GitHubResult};
use std::time::Duration;

/// Default GitHub API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com/";

/// Default GitHub API version (date-based).
pub const DEFAULT_API_VERSION: &str = "2022-11-28";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default User-Agent header.
pub const DEFAULT_USER_AGENT: &str =
    concat!("integrations-github-bindings/", env!("CARGO_PKG_VERSION"));

/// Connection pool configuration.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum idle connections per host.
    pub max_idle_per_host: usize,
    /// Idle connection timeout.
    pub idle_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: 20,
            idle_timeout: Duration::from_secs(90),
        }
    }
}

/// GitHub client configuration.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// API base URL, always ending in `/`.
    pub base_url: String,
    /// API version header.
    pub api_version: String,
    /// Authentication method; `None` sends unauthenticated requests.
    pub auth: Option<AuthMethod>,
    /// Request timeout.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// User-Agent header.
    pub user_agent: String,
    /// Connection pool configuration.
    pub pool: PoolConfig,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            auth: None,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            pool: PoolConfig::default(),
        }
    }
}

impl GitHubConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> GitHubConfigBuilder {
        GitHubConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `GITHUB_TOKEN` (optional): bearer token
    /// - `GITHUB_API_URL` (optional): custom base URL, e.g. a GitHub Enterprise host
    /// - `GITHUB_TIMEOUT` (optional): request timeout in seconds
    pub fn from_env() -> GitHubResult<Self> {
        let mut builder = GitHubConfigBuilder::new();

        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            if !token.is_empty() {
                builder = builder.auth(AuthMethod::token(token));
            }
        }

        if let Ok(base_url) = std::env::var("GITHUB_API_URL") {
            builder = builder.base_url(base_url);
        }

        if let Ok(timeout_str) = std::env::var("GITHUB_TIMEOUT") {
            if let Ok(timeout_secs) = timeout_str.parse::<u64>() {
                builder = builder.timeout(Duration::from_secs(timeout_secs));
            }
        }

        builder.build()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> GitHubResult<()> {
        if self.base_url.is_empty() {
            return Err(GitHubError::new(
                GitHubErrorKind::InvalidBaseUrl,
                "Base URL cannot be empty",
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(GitHubError::new(
                GitHubErrorKind::InvalidBaseUrl,
                "Base URL must start with http:// or https://",
            ));
        }

        if !self.base_url.ends_with('/') {
            return Err(GitHubError::new(
                GitHubErrorKind::InvalidBaseUrl,
                format!("Base URL must have a trailing slash, but {:?} does not", self.base_url),
            ));
        }

        url::Url::parse(&self.base_url).map_err(|e| {
            GitHubError::new(
                GitHubErrorKind::InvalidBaseUrl,
                format!("Base URL is not a valid URL: {}", e),
            )
        })?;

        if self.user_agent.is_empty() {
            return Err(GitHubError::configuration("User-Agent is required by GitHub API"));
        }

        Ok(())
    }
}

/// Appends the trailing slash relative paths are resolved against.
fn normalize_base_url(url: String) -> String {
    if url.ends_with('/') {
        url
    } else {
        format!("{}/", url)
    }
}

/// Builder for GitHubConfig.
#[derive(Debug, Default)]
pub struct GitHubConfigBuilder {
    base_url: Option<String>,
    api_version: Option<String>,
    auth: Option<AuthMethod>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
    pool: Option<PoolConfig>,
}

impl GitHubConfigBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the API version.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Sets the authentication method.
    pub fn auth(mut self, auth: AuthMethod) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the connection pool configuration.
    pub fn pool(mut self, config: PoolConfig) -> Self {
        self.pool = Some(config);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> GitHubResult<GitHubConfig> {
        let config = GitHubConfig {
            base_url: normalize_base_url(
                self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            ),
            api_version: self.api_version.unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            auth: self.auth,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            user_agent: self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            pool: self.pool.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}
