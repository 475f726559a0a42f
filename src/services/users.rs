//! User operations.

use crate::client::{GitHubClient, Response};
use crate::errors::GitHubResult;
use crate::types::User;

/// Service for user operations.
pub struct UsersService<'a> {
    client: &'a GitHubClient,
}

impl<'a> UsersService<'a> {
    /// Creates a new users service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Gets a user by login; an empty login fetches the authenticated user.
    pub async fn get(&self, user: &str) -> GitHubResult<(User, Response)> {
        if user.is_empty() {
            self.client.get("user").await
        } else {
            self.client.get(&format!("users/{}", user)).await
        }
    }

    /// Gets a user by numeric id.
    pub async fn get_by_id(&self, id: i64) -> GitHubResult<(User, Response)> {
        self.client.get(&format!("user/{}", id)).await
    }
}
