use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use localemgmt_core::locale::ItemValidationError;
use localemgmt_core::storage::{repository_error_to_status_code, RepositoryError};
use thiserror::Error;

/// Requests the handlers refuse before touching the repository.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("refusing to delete every item without all=true")]
    UnfilteredDelete,

    #[error("invalid request body: {0}")]
    InvalidBody(String),
}

/// Application error type that wraps `anyhow::Error`.
///
/// The status code comes from the wrapped error: repository errors use
/// `repository_error_to_status_code`, validation and request errors are 400,
/// anything else is 500. The body is always `{"error": <message>}`.
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else if self.0.is::<ItemValidationError>() || self.0.is::<RequestError>() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.0.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %message, "Request failed");
        } else {
            tracing::warn!(status = %status, error = %message, "Request rejected");
        }

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
