//! Application state for auth.

use axum::extract::FromRef;
use localemgmt_core::auth::{OidcProviderClient, SessionRepository};
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::providers::OidcProvider;

/// Shared state for auth handlers and extractors.
#[derive(Clone)]
pub struct AuthState {
    pub sessions: Arc<dyn SessionRepository>,
    pub config: AuthConfig,
    provider: Option<Arc<dyn OidcProviderClient>>,
}

impl AuthState {
    /// Creates the state, discovering the OIDC provider when one is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if provider discovery fails.
    pub async fn new(
        sessions: Arc<dyn SessionRepository>,
        config: AuthConfig,
    ) -> Result<Self, AuthError> {
        let provider = match &config.oidc {
            Some(oidc) => {
                let provider: Arc<dyn OidcProviderClient> =
                    Arc::new(OidcProvider::discover(oidc).await?);
                Some(provider)
            }
            None => {
                tracing::warn!("No identity provider configured, login is disabled");
                None
            }
        };

        Ok(Self {
            sessions,
            config,
            provider,
        })
    }

    /// Creates the state with an already built provider.
    pub fn with_provider(
        sessions: Arc<dyn SessionRepository>,
        provider: Arc<dyn OidcProviderClient>,
        config: AuthConfig,
    ) -> Self {
        Self {
            sessions,
            config,
            provider: Some(provider),
        }
    }

    /// Creates the state with login disabled.
    pub fn without_provider(sessions: Arc<dyn SessionRepository>, config: AuthConfig) -> Self {
        Self {
            sessions,
            config,
            provider: None,
        }
    }

    /// The configured identity provider.
    ///
    /// # Errors
    ///
    /// Returns `ProviderNotConfigured` if login is disabled.
    pub fn provider(&self) -> Result<&dyn OidcProviderClient, AuthError> {
        self.provider
            .as_deref()
            .ok_or(AuthError::ProviderNotConfigured)
    }
}

/// Allows AuthState to be extracted from a parent state.
impl<S> FromRef<S> for AuthState
where
    S: AsRef<AuthState>,
{
    fn from_ref(state: &S) -> Self {
        state.as_ref().clone()
    }
}
