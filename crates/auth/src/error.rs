use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Auth errors for the localemgmt_auth crate.
///
/// This wraps the core `AuthError` and adds the variants that only make
/// sense where configuration and providers are wired.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Error from the core auth module (state, tokens, storage, provider)
    #[error(transparent)]
    Core(#[from] localemgmt_core::auth::AuthError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// No identity provider configured
    #[error("identity provider not configured")]
    ProviderNotConfigured,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        use localemgmt_core::auth::AuthError as CoreError;

        let (status, message) = match &self {
            AuthError::Core(core_err) => match core_err {
                CoreError::InvalidState | CoreError::FlowExpired => {
                    (StatusCode::BAD_REQUEST, self.to_string())
                }
                CoreError::SessionNotFound
                | CoreError::SessionExpired
                | CoreError::InvalidToken(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
                CoreError::CodeExchange(_) | CoreError::Storage(_) | CoreError::Provider(_) => {
                    tracing::error!(error = %self, "Auth error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },
            AuthError::Config(_) => {
                tracing::error!(error = %self, "Auth configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server configuration error".to_string(),
                )
            }
            AuthError::ProviderNotConfigured => (StatusCode::NOT_FOUND, self.to_string()),
        };

        (status, message).into_response()
    }
}
