//! Mock OIDC provider for development and testing.
//!
//! The mock approves every login: its authorization URL points straight back
//! at the callback, with an authorization code that is the base64-encoded
//! JSON of the profile to sign in as.

use async_trait::async_trait;
use base64::Engine;
use localemgmt_core::auth::{AuthError, OidcProviderClient, Profile, Result};
use url::Url;

/// Mock provider that signs everybody in as a fixed profile.
pub struct MockProvider {
    redirect_uri: Url,
    profile: Profile,
}

impl MockProvider {
    /// Create a new MockProvider.
    ///
    /// # Arguments
    /// * `redirect_uri` - The callback URL of the app
    /// * `profile` - The profile every login resolves to
    pub fn new(redirect_uri: Url, profile: Profile) -> Self {
        Self {
            redirect_uri,
            profile,
        }
    }

    /// A local developer profile.
    pub fn developer(redirect_uri: Url) -> Self {
        Self::new(
            redirect_uri,
            Profile::new("mock|developer")
                .with_name("Local Developer")
                .with_email("developer@localhost"),
        )
    }

    /// Encode a profile the way the mock hands out authorization codes.
    pub fn encode_code(profile: &Profile) -> Result<String> {
        let json = serde_json::to_vec(profile).map_err(|e| AuthError::Provider(e.to_string()))?;
        Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(json))
    }
}

#[async_trait]
impl OidcProviderClient for MockProvider {
    async fn authorization_url(&self, state: &str, _pkce_challenge: &str) -> Result<Url> {
        let mut url = self.redirect_uri.clone();
        url.query_pairs_mut()
            .append_pair("code", &Self::encode_code(&self.profile)?)
            .append_pair("state", state);

        Ok(url)
    }

    async fn exchange_code(&self, code: &str, _pkce_verifier: &str) -> Result<Profile> {
        let decoded = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(code)
            .map_err(|e| AuthError::CodeExchange(e.to_string()))?;

        serde_json::from_slice(&decoded).map_err(|e| AuthError::CodeExchange(e.to_string()))
    }

    fn logout_url(&self, _return_to: &Url) -> Option<Url> {
        None
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
