//! Credentials attached to outgoing requests.
//!
//! Only header injection lives here; obtaining tokens is the caller's job.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use secrecy::{ExposeSecret, SecretString};

/// Authentication method for GitHub API.
#[derive(Debug, Clone)]
pub enum AuthMethod {
    /// Bearer token (personal access token, OAuth token, installation token
    /// or `GITHUB_TOKEN`).
    Token(SecretString),
    /// HTTP basic credentials.
    Basic {
        /// Username.
        username: String,
        /// Password or token.
        password: SecretString,
    },
}

impl AuthMethod {
    /// Creates a bearer token authentication method.
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(SecretString::new(token.into()))
    }

    /// Creates a basic authentication method.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: SecretString::new(password.into()),
        }
    }

    /// Builds the `Authorization` header value.
    pub fn header_value(&self) -> String {
        match self {
            Self::Token(token) => format!("Bearer {}", token.expose_secret()),
            Self::Basic { username, password } => {
                let raw = format!("{}:{}", username, password.expose_secret());
                format!("Basic {}", STANDARD.encode(raw))
            }
        }
    }

    /// Gets a redacted description for logging.
    pub fn token_prefix(&self) -> &'static str {
        match self {
            Self::Token(t) => {
                let exposed = t.expose_secret();
                if exposed.starts_with("ghp_") {
                    "ghp_***"
                } else if exposed.starts_with("github_pat_") {
                    "github_pat_***"
                } else if exposed.starts_with("gho_") {
                    "gho_***"
                } else if exposed.starts_with("ghs_") {
                    "ghs_***"
                } else {
                    "***"
                }
            }
            Self::Basic { .. } => "basic",
        }
    }
}
