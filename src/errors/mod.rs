//! Error types for the GitHub bindings.
//!
//! Errors fall into three groups: request construction failed before any I/O,
//! execution failed (transport, non-2xx status, or decoding), or a webhook
//! payload was rejected. Callers needing finer control inspect
//! [`GitHubError::status_code`].

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Result type alias for GitHub operations.
pub type GitHubResult<T> = Result<T, GitHubError>;

/// Error kinds for categorizing GitHub errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHubErrorKind {
    // Construction errors
    /// Invalid configuration.
    InvalidConfiguration,
    /// Invalid base URL.
    InvalidBaseUrl,
    /// Invalid parameter (path segment, body, or query options).
    InvalidParameter,

    // Transport errors
    /// Connection failed.
    ConnectionFailed,
    /// Request timeout.
    Timeout,

    // Status errors
    /// Request validation failed (400).
    ValidationError,
    /// Bad credentials (401).
    BadCredentials,
    /// Access forbidden (403).
    Forbidden,
    /// Resource not found (404).
    NotFound,
    /// Resource conflict (409).
    Conflict,
    /// Resource is gone (410).
    Gone,
    /// Unprocessable entity (422).
    UnprocessableEntity,
    /// Internal server error (500).
    InternalError,
    /// Bad gateway (502).
    BadGateway,
    /// Service unavailable (503).
    ServiceUnavailable,

    // Response errors
    /// Failed to deserialize response.
    DeserializationError,

    // Webhook errors
    /// Invalid webhook signature.
    InvalidSignature,
    /// Webhook payload parse error.
    PayloadParseError,

    /// Unknown error.
    Unknown,
}

impl fmt::Display for GitHubErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration => write!(f, "invalid_configuration"),
            Self::InvalidBaseUrl => write!(f, "invalid_base_url"),
            Self::InvalidParameter => write!(f, "invalid_parameter"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::ValidationError => write!(f, "validation_error"),
            Self::BadCredentials => write!(f, "bad_credentials"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::NotFound => write!(f, "not_found"),
            Self::Conflict => write!(f, "conflict"),
            Self::Gone => write!(f, "gone"),
            Self::UnprocessableEntity => write!(f, "unprocessable_entity"),
            Self::InternalError => write!(f, "internal_error"),
            Self::BadGateway => write!(f, "bad_gateway"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::DeserializationError => write!(f, "deserialization_error"),
            Self::InvalidSignature => write!(f, "invalid_signature"),
            Self::PayloadParseError => write!(f, "payload_parse_error"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// One entry of the `errors` array in a GitHub error body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    /// Resource on which the error occurred.
    pub resource: Option<String>,
    /// Field on which the error occurred.
    pub field: Option<String>,
    /// Validation error code.
    pub code: Option<String>,
    /// Message describing the error.
    pub message: Option<String>,
}

/// GitHub API error with detailed information.
#[derive(Error, Debug)]
pub struct GitHubError {
    kind: GitHubErrorKind,
    message: String,
    status_code: Option<u16>,
    request_id: Option<String>,
    documentation_url: Option<String>,
    details: Vec<ErrorDetail>,
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for GitHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(code) = self.status_code {
            write!(f, " (HTTP {})", code)?;
        }
        if let Some(ref id) = self.request_id {
            write!(f, " [request_id: {}]", id)?;
        }
        Ok(())
    }
}

impl GitHubError {
    /// Creates a new GitHub error.
    pub fn new(kind: GitHubErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            request_id: None,
            documentation_url: None,
            details: Vec::new(),
            cause: None,
        }
    }

    /// Sets the HTTP status code.
    pub fn with_status(mut self, code: u16) -> Self {
        self.status_code = Some(code);
        self
    }

    /// Sets the GitHub request ID.
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// Sets the documentation URL.
    pub fn with_documentation_url(mut self, url: impl Into<String>) -> Self {
        self.documentation_url = Some(url.into());
        self
    }

    /// Sets the validation error details.
    pub fn with_details(mut self, details: Vec<ErrorDetail>) -> Self {
        self.details = details;
        self
    }

    /// Sets the underlying cause.
    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Gets the error kind.
    pub fn kind(&self) -> &GitHubErrorKind {
        &self.kind
    }

    /// Gets the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Gets the HTTP status code.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Gets the request ID.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Gets the documentation URL.
    pub fn documentation_url(&self) -> Option<&str> {
        self.documentation_url.as_deref()
    }

    /// Gets the validation error details.
    pub fn details(&self) -> &[ErrorDetail] {
        &self.details
    }

    /// Returns true if the request was rejected before any network I/O.
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self.kind,
            GitHubErrorKind::InvalidConfiguration
                | GitHubErrorKind::InvalidBaseUrl
                | GitHubErrorKind::InvalidParameter
        )
    }

    /// Creates an error from an HTTP status code and GitHub error response.
    pub fn from_response(
        status: u16,
        message: String,
        documentation_url: Option<String>,
        request_id: Option<String>,
    ) -> Self {
        let kind = Self::kind_from_status(status);
        let mut error = Self::new(kind, message).with_status(status);

        if let Some(url) = documentation_url {
            error = error.with_documentation_url(url);
        }
        if let Some(id) = request_id {
            error = error.with_request_id(id);
        }

        error
    }

    /// Maps HTTP status code to error kind.
    fn kind_from_status(status: u16) -> GitHubErrorKind {
        match status {
            400 => GitHubErrorKind::ValidationError,
            401 => GitHubErrorKind::BadCredentials,
            403 => GitHubErrorKind::Forbidden,
            404 => GitHubErrorKind::NotFound,
            409 => GitHubErrorKind::Conflict,
            410 => GitHubErrorKind::Gone,
            422 => GitHubErrorKind::UnprocessableEntity,
            500 => GitHubErrorKind::InternalError,
            502 => GitHubErrorKind::BadGateway,
            503 => GitHubErrorKind::ServiceUnavailable,
            _ => GitHubErrorKind::Unknown,
        }
    }

    // Convenience constructors

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::InvalidConfiguration, message)
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::InvalidParameter, message)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::Timeout, message)
    }

    /// Creates a webhook signature error.
    pub fn invalid_signature(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::InvalidSignature, message)
    }

    /// Creates a webhook payload error.
    pub fn payload(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::PayloadParseError, message)
    }

    /// Creates a deserialization error.
    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::DeserializationError, message)
    }
}
