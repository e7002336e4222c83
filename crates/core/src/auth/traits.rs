use async_trait::async_trait;
use url::Url;

use super::{AuthError, AuthFlowState, Profile, Session, SessionId};

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// The external identity provider that handles login, callback and logout.
#[async_trait]
pub trait OidcProviderClient: Send + Sync {
    /// Generate authorization URL for user redirect.
    async fn authorization_url(&self, state: &str, pkce_challenge: &str) -> Result<Url>;

    /// Exchange an authorization code for the user's profile.
    async fn exchange_code(&self, code: &str, pkce_verifier: &str) -> Result<Profile>;

    /// Where to send the browser after a local logout, if the provider
    /// has its own logout endpoint.
    fn logout_url(&self, return_to: &Url) -> Option<Url>;

    /// Short provider name used in logs.
    fn name(&self) -> &'static str;
}

/// Session storage abstraction.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Store a new session.
    async fn create_session(&self, session: &Session) -> Result<()>;

    /// Retrieve session by ID.
    async fn get_session(&self, id: &SessionId) -> Result<Option<Session>>;

    /// Delete a specific session. Deleting an unknown session is not an error.
    async fn delete_session(&self, id: &SessionId) -> Result<()>;

    /// Store PKCE/state for auth flow.
    async fn store_auth_flow(&self, state: &str, flow: &AuthFlowState) -> Result<()>;

    /// Retrieve and delete auth flow state.
    async fn take_auth_flow(&self, state: &str) -> Result<Option<AuthFlowState>>;
}
