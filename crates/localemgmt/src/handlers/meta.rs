//! Distinct languages and bundles.

use axum::{extract::State, Json};

use crate::{handlers::AppError, state::AppState};

/// GET /api/langs
pub async fn list_langs(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.repo.list_langs().await?))
}

/// GET /api/bundles
pub async fn list_bundles(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.repo.list_bundles().await?))
}
