//! Locale item API operations.

use std::path::Path;

use localemgmt_core::locale::{LocaleItem, UpsertReport};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::LocaleClient;
use crate::error::{ClientError, Result};

/// Query parameters for listing and deleting items.
#[derive(Debug, Default, Serialize)]
pub struct ItemsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl ItemsQuery {
    pub fn is_empty(&self) -> bool {
        self.key.is_none() && self.bundle.is_none() && self.lang.is_none()
    }
}

/// Response for a delete request.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub deleted: u64,
}

/// Read a JSON array of items for bulk import.
pub fn read_items_file(path: &Path) -> Result<Vec<LocaleItem>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

impl LocaleClient {
    /// List items matching the query.
    pub async fn list_items(&self, query: &ItemsQuery) -> Result<Vec<LocaleItem>> {
        let response = self
            .request(Method::GET, "/api/items")
            .query(query)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Insert or update one item.
    pub async fn upsert_item(&self, item: &LocaleItem) -> Result<LocaleItem> {
        item.validate()
            .map_err(|e| ClientError::InvalidInput(e.to_string()))?;

        let response = self
            .request(Method::POST, "/api/items")
            .json(item)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Insert or update many items in one request.
    pub async fn upsert_items(&self, items: &[LocaleItem]) -> Result<UpsertReport> {
        let response = self
            .request(Method::POST, "/api/items/bulk")
            .json(items)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete items matching the query. An empty query needs `all`.
    pub async fn delete_items(&self, query: &ItemsQuery, all: bool) -> Result<DeletedResponse> {
        if query.is_empty() && !all {
            return Err(ClientError::InvalidInput(
                "refusing to delete every item without --all".to_string(),
            ));
        }

        let mut request = self.request(Method::DELETE, "/api/items").query(query);
        if all {
            request = request.query(&[("all", "true")]);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }
}
