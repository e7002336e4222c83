//! Application state shared by all request handlers.

use std::sync::Arc;

use localemgmt_auth::AuthState;
use localemgmt_core::storage::LocaleRepository;

/// Shared application state.
///
/// Cloned for each request handler. The repository is injected at startup,
/// so handlers only see the `LocaleRepository` trait.
#[derive(Clone)]
pub struct AppState {
    /// Locale item storage.
    pub repo: Arc<dyn LocaleRepository>,
    /// Session store, identity provider and auth configuration.
    pub auth: AuthState,
}

impl AppState {
    pub fn new(repo: Arc<dyn LocaleRepository>, auth: AuthState) -> Self {
        Self { repo, auth }
    }
}

/// Lets the auth extractors pull `AuthState` out of `AppState`.
impl AsRef<AuthState> for AppState {
    fn as_ref(&self) -> &AuthState {
        &self.auth
    }
}
