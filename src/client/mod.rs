// ==================== API CLIENT ====================
// Thin HTTP wrapper over the directory API, one call per endpoint. Errors
// surface the server's `{error}` text so the dashboard can show it verbatim.

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{UserPayload, UserRecord};

/// The four directory operations, abstracted so the dashboard driver can run
/// against the HTTP client in production and an in-memory store in tests.
#[async_trait]
pub trait UserDirectory {
    async fn get_users(&self) -> Result<Vec<UserRecord>, String>;
    async fn create_user(&self, payload: UserPayload) -> Result<UserRecord, String>;
    async fn update_user(&self, id: &str, payload: UserPayload) -> Result<UserRecord, String>;
    async fn delete_user(&self, id: &str) -> Result<(), String>;
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
}

/// HTTP client for the directory API. No retries, no caching, transport
/// default timeouts.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is the deployment-time API root, e.g.
    /// `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    fn user_url(&self, id: &str) -> String {
        format!("{}/users/{}", self.base_url, id)
    }

    /// Pulls the server's `{error}` message out of a failure response, or
    /// falls back to a generic one when the body has a different shape.
    async fn error_text(response: reqwest::Response, fallback: &str) -> String {
        let status = response.status();
        match response.json::<ErrorEnvelope>().await {
            Ok(ErrorEnvelope { error: Some(message) }) => message,
            _ => format!("{} (HTTP {})", fallback, status.as_u16()),
        }
    }

    async fn parse_body<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        fallback: &str,
    ) -> Result<T, String> {
        if !response.status().is_success() {
            return Err(Self::error_text(response, fallback).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    }
}

#[async_trait]
impl UserDirectory for ApiClient {
    async fn get_users(&self) -> Result<Vec<UserRecord>, String> {
        let response = self
            .http
            .get(self.users_url())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| format!("Error fetching users: {}", e))?;

        Self::parse_body(response, "Failed to fetch users").await
    }

    async fn create_user(&self, payload: UserPayload) -> Result<UserRecord, String> {
        let response = self
            .http
            .post(self.users_url())
            .json(&payload)
            .send()
            .await
            .map_err(|e| format!("Error creating user: {}", e))?;

        Self::parse_body(response, "Failed to create user").await
    }

    async fn update_user(&self, id: &str, payload: UserPayload) -> Result<UserRecord, String> {
        let response = self
            .http
            .put(self.user_url(id))
            .json(&payload)
            .send()
            .await
            .map_err(|e| format!("Error updating user: {}", e))?;

        Self::parse_body(response, "Failed to update user").await
    }

    async fn delete_user(&self, id: &str) -> Result<(), String> {
        let response = self
            .http
            .delete(self.user_url(id))
            .send()
            .await
            .map_err(|e| format!("Error deleting user: {}", e))?;

        if !response.status().is_success() {
            return Err(Self::error_text(response, "Failed to delete user").await);
        }

        Ok(())
    }
}
