//! Locale item handlers.
//!
//! Reads are public. Writes need a logged-in profile.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use localemgmt_auth::CurrentProfile;
use localemgmt_core::locale::{LocaleFilter, LocaleItem, UpsertReport};

use crate::{
    handlers::{error::RequestError, AppError},
    state::AppState,
};

/// Filter parameters shared by listing and deletion. Empty means "any".
#[derive(Debug, Default, Deserialize)]
pub struct ItemsQuery {
    pub key: Option<String>,
    pub bundle: Option<String>,
    pub lang: Option<String>,
}

impl ItemsQuery {
    fn filter(&self) -> LocaleFilter {
        LocaleFilter::from_optional(
            self.key.as_deref(),
            self.bundle.as_deref(),
            self.lang.as_deref(),
        )
    }
}

/// Parameters for `DELETE /api/items`.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteItemsQuery {
    #[serde(flatten)]
    pub filter: ItemsQuery,
    /// Must be set to delete with no filter at all.
    #[serde(default)]
    pub all: bool,
}

/// Response for `DELETE /api/items`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub deleted: u64,
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| RequestError::InvalidBody(rejection.body_text()).into())
}

/// List items matching the filter (GET /api/items).
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ItemsQuery>,
) -> Result<Json<Vec<LocaleItem>>, AppError> {
    let items = state.repo.query_items(&query.filter()).await?;
    Ok(Json(items))
}

/// Insert or update one item (POST /api/items).
pub async fn upsert_item(
    CurrentProfile(profile): CurrentProfile,
    State(state): State<AppState>,
    payload: Result<Json<LocaleItem>, JsonRejection>,
) -> Result<Json<LocaleItem>, AppError> {
    let item = json_body(payload)?;
    item.validate()?;

    let stored = state.repo.upsert_item(&item).await?;

    tracing::info!(
        user = %profile.subject,
        key = %stored.key,
        bundle = %stored.bundle,
        lang = %stored.lang,
        "Locale item saved"
    );

    Ok(Json(stored))
}

/// Insert or update many items in one transaction (POST /api/items/bulk).
pub async fn upsert_items(
    CurrentProfile(profile): CurrentProfile,
    State(state): State<AppState>,
    payload: Result<Json<Vec<LocaleItem>>, JsonRejection>,
) -> Result<Json<UpsertReport>, AppError> {
    let items = json_body(payload)?;
    tracing::debug!(count = items.len(), "Bulk upsert requested");

    let report = state.repo.upsert_items(&items).await?;

    tracing::info!(
        user = %profile.subject,
        written = report.written,
        skipped = report.skipped.len(),
        "Locale items saved"
    );

    Ok(Json(report))
}

/// Delete items matching the filter (DELETE /api/items).
pub async fn delete_items(
    CurrentProfile(profile): CurrentProfile,
    State(state): State<AppState>,
    Query(query): Query<DeleteItemsQuery>,
) -> Result<Json<DeletedResponse>, AppError> {
    let filter = query.filter.filter();

    if filter.is_empty() && !query.all {
        return Err(RequestError::UnfilteredDelete.into());
    }

    let deleted = state.repo.delete_items(&filter).await?;

    tracing::info!(user = %profile.subject, deleted, "Locale items deleted");

    Ok(Json(DeletedResponse { deleted }))
}
