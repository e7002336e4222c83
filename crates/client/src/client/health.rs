//! Health check operations.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::LocaleClient;
use crate::error::Result;

/// Readiness as reported by `/readyz`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Readiness {
    pub ready: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LocaleClient {
    /// True if the server accepts connections.
    pub async fn livez(&self) -> Result<bool> {
        let response = self.request(Method::GET, "/livez").send().await?;
        Ok(response.status().is_success())
    }

    /// Readiness of the server's database. A 503 is reported, not raised.
    pub async fn readyz(&self) -> Result<Readiness> {
        let response = self.request(Method::GET, "/readyz").send().await?;
        Ok(response.json().await?)
    }
}
