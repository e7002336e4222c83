//! Languages, bundles and server version.

use localemgmt_core::auth::Profile;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::LocaleClient;
use crate::error::Result;

/// Server version and the profile of the session, if any.
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub user: Option<Profile>,
}

impl LocaleClient {
    /// Distinct languages in use.
    pub async fn list_langs(&self) -> Result<Vec<String>> {
        let response = self.request(Method::GET, "/api/langs").send().await?;
        self.handle_response(response).await
    }

    /// Distinct bundles in use.
    pub async fn list_bundles(&self) -> Result<Vec<String>> {
        let response = self.request(Method::GET, "/api/bundles").send().await?;
        self.handle_response(response).await
    }

    pub async fn version(&self) -> Result<VersionInfo> {
        let response = self.request(Method::GET, "/version").send().await?;
        self.handle_response(response).await
    }
}
