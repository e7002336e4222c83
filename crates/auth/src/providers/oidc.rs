//! Generic OIDC provider, configured by issuer discovery.

use async_trait::async_trait;
use localemgmt_core::auth::{generate_state, AuthError, OidcProviderClient, Profile, Result};
use openidconnect::{
    core::{CoreAuthenticationFlow, CoreClient, CoreProviderMetadata},
    reqwest, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointMaybeSet,
    EndpointNotSet, EndpointSet, IssuerUrl, Nonce, PkceCodeVerifier, RedirectUrl, Scope,
    TokenResponse,
};
use url::Url;

use crate::config::OidcConfig;

/// `CoreClient` as returned by `from_provider_metadata` once the redirect URI is set.
type ConfiguredCoreClient = CoreClient<
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointMaybeSet,
    EndpointMaybeSet,
>;

/// Identity provider reached through standard OIDC discovery.
pub struct OidcProvider {
    client: ConfiguredCoreClient,
    http_client: reqwest::Client,
    client_id: String,
    logout_url: Option<Url>,
}

impl OidcProvider {
    /// Discover the provider metadata and build the client.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Provider` if the issuer or redirect URI is invalid
    /// or discovery fails.
    pub async fn discover(config: &OidcConfig) -> Result<Self> {
        let issuer_url = IssuerUrl::new(config.issuer_url.to_string())
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        // No redirect following on the token and discovery endpoints.
        let http_client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AuthError::Provider(format!("Failed to build HTTP client: {}", e)))?;

        let provider_metadata = CoreProviderMetadata::discover_async(issuer_url, &http_client)
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        let client = CoreClient::from_provider_metadata(
            provider_metadata,
            ClientId::new(config.client_id.clone()),
            config.client_secret.clone().map(ClientSecret::new),
        )
        .set_redirect_uri(
            RedirectUrl::new(config.redirect_uri.to_string())
                .map_err(|e| AuthError::Provider(e.to_string()))?,
        );

        tracing::info!(issuer = %config.issuer_url, "OIDC provider discovered");

        Ok(Self {
            client,
            http_client,
            client_id: config.client_id.clone(),
            logout_url: config.logout_url.clone(),
        })
    }
}

#[async_trait]
impl OidcProviderClient for OidcProvider {
    async fn authorization_url(&self, state: &str, pkce_challenge: &str) -> Result<Url> {
        let state_owned = state.to_string();

        // The challenge is computed by the caller, which keeps the verifier.
        let (auth_url, _csrf_token, _nonce) = self
            .client
            .authorize_url(
                CoreAuthenticationFlow::AuthorizationCode,
                move || CsrfToken::new(state_owned),
                || Nonce::new(generate_state()),
            )
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .add_extra_param("code_challenge", pkce_challenge.to_string())
            .add_extra_param("code_challenge_method", "S256")
            .url();

        Ok(auth_url)
    }

    async fn exchange_code(&self, code: &str, pkce_verifier: &str) -> Result<Profile> {
        let token_response = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .map_err(|e| AuthError::CodeExchange(e.to_string()))?
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier.to_string()))
            .request_async(&self.http_client)
            .await
            .map_err(|e| AuthError::CodeExchange(e.to_string()))?;

        let id_token = token_response
            .id_token()
            .ok_or_else(|| AuthError::InvalidToken("No ID token in response".to_string()))?;

        let claims = id_token
            .claims(&self.client.id_token_verifier(), |_: Option<&Nonce>| Ok(()))
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(Profile {
            subject: claims.subject().to_string(),
            name: claims
                .name()
                .and_then(|n| n.get(None))
                .map(|n| n.to_string()),
            nickname: claims
                .nickname()
                .and_then(|n| n.get(None))
                .map(|n| n.to_string()),
            email: claims.email().map(|e| e.to_string()),
            picture: claims
                .picture()
                .and_then(|p| p.get(None))
                .map(|p| p.to_string()),
        })
    }

    fn logout_url(&self, return_to: &Url) -> Option<Url> {
        self.logout_url
            .as_ref()
            .map(|url| build_logout_url(url, &self.client_id, return_to))
    }

    fn name(&self) -> &'static str {
        "oidc"
    }
}

/// RP-initiated logout: the provider sends the browser back to `return_to`.
fn build_logout_url(logout_url: &Url, client_id: &str, return_to: &Url) -> Url {
    let mut url = logout_url.clone();
    url.query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("post_logout_redirect_uri", return_to.as_str());
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logout_url_carries_client_and_return_target() {
        let url = build_logout_url(
            &Url::parse("https://tenant.auth0.com/oidc/logout").unwrap(),
            "client-123",
            &Url::parse("http://localhost:3000/").unwrap(),
        );

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(url.path(), "/oidc/logout");
        assert!(pairs.contains(&("client_id".to_string(), "client-123".to_string())));
        assert!(pairs.contains(&(
            "post_logout_redirect_uri".to_string(),
            "http://localhost:3000/".to_string()
        )));
    }
}
