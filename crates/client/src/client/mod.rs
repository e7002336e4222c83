//! HTTP client for the locale management API.

pub mod health;
pub mod items;
pub mod meta;

use reqwest::{Method, RequestBuilder, StatusCode};

use crate::error::{ClientError, Result};

/// HTTP client for the locale management API.
#[derive(Debug, Clone)]
pub struct LocaleClient {
    client: reqwest::Client,
    base_url: String,
    session: Option<String>,
}

impl LocaleClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session: None,
        }
    }

    /// Send `session` as a bearer token on every request.
    pub fn with_session(mut self, session: Option<String>) -> Self {
        self.session = session.filter(|s| !s.trim().is_empty());
        self
    }

    /// Create from environment (LOCALEMGMT_URL and LOCALEMGMT_SESSION).
    pub fn from_env() -> Self {
        let base_url = std::env::var("LOCALEMGMT_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        Self::new(base_url).with_session(std::env::var("LOCALEMGMT_SESSION").ok())
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request, attaching the session when there is one.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.session {
            Some(session) => builder.bearer_auth(session),
            None => builder,
        }
    }

    /// Handle error responses.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(ClientError::from);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(status_error(status, &body))
    }
}

/// The server renders errors as `{"error": "..."}`; anything else is kept as-is.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("error")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

fn status_error(status: StatusCode, body: &str) -> ClientError {
    let message = error_message(body);
    match status {
        StatusCode::NOT_FOUND => ClientError::NotFound { message },
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized { message },
        _ => ClientError::ServerError {
            status: status.as_u16(),
            message,
        },
    }
}
