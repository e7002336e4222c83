use std::time::Duration;

use url::Url;

use crate::error::AuthError;

/// Name of the cookie that carries the session ID.
pub const DEFAULT_COOKIE_NAME: &str = "auth-session";

/// Path of the OIDC callback route, relative to the base URL.
pub const CALLBACK_PATH: &str = "/callback";

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_SESSION_TTL_HOURS: u64 = 24;

/// Configuration for the OIDC identity provider.
#[derive(Debug, Clone)]
pub struct OidcConfig {
    /// Issuer used for discovery (e.g. `https://tenant.eu.auth0.com/`).
    pub issuer_url: Url,
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: Url,
    /// Provider logout endpoint, if it has one.
    pub logout_url: Option<Url>,
}

/// Complete auth configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub oidc: Option<OidcConfig>,
    pub session_ttl: Duration,
    pub base_url: Url,
    pub cookie_name: String,
    pub cookie_secure: bool,
}

impl AuthConfig {
    /// Configuration with defaults and no identity provider.
    pub fn new(base_url: Url) -> Self {
        Self {
            oidc: None,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_HOURS * 60 * 60),
            base_url,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            cookie_secure: true,
        }
    }

    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AUTH_BASE_URL`: Base URL for callback redirects (default: `http://localhost:3000`)
    /// - `OIDC_ISSUER_URL`: Issuer URL of the identity provider (optional, enables login)
    /// - `OIDC_CLIENT_ID`: OAuth client ID (required if the issuer is set)
    /// - `OIDC_CLIENT_SECRET`: OAuth client secret (optional, public clients use PKCE only)
    /// - `OIDC_LOGOUT_URL`: Provider logout endpoint (optional)
    /// - `SESSION_TTL_HOURS`: Session TTL in hours (default: 24)
    /// - `COOKIE_SECURE`: Whether to set secure flag on cookies (default: true)
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Config` if a URL is malformed or the provider is
    /// partially configured.
    pub fn from_env() -> Result<Self, AuthError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`AuthConfig::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AuthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = parse_url(
            "AUTH_BASE_URL",
            &lookup("AUTH_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        )?;

        let mut config = Self::new(base_url);

        config.oidc = match (lookup("OIDC_ISSUER_URL"), lookup("OIDC_CLIENT_ID")) {
            (Some(issuer), Some(client_id)) => Some(OidcConfig {
                issuer_url: parse_url("OIDC_ISSUER_URL", &issuer)?,
                client_id,
                client_secret: lookup("OIDC_CLIENT_SECRET"),
                redirect_uri: config.callback_url()?,
                logout_url: lookup("OIDC_LOGOUT_URL")
                    .map(|url| parse_url("OIDC_LOGOUT_URL", &url))
                    .transpose()?,
            }),
            (Some(_), None) => {
                return Err(AuthError::Config(
                    "OIDC_ISSUER_URL is set but OIDC_CLIENT_ID is missing".to_string(),
                ))
            }
            (None, _) => None,
        };

        if let Some(hours) = lookup("SESSION_TTL_HOURS").and_then(|s| s.parse::<u64>().ok()) {
            config.session_ttl = Duration::from_secs(hours * 60 * 60);
        }

        config.cookie_secure = lookup("COOKIE_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(true);

        Ok(config)
    }

    /// Absolute URL of the callback route.
    pub fn callback_url(&self) -> Result<Url, AuthError> {
        self.base_url
            .join(CALLBACK_PATH)
            .map_err(|e| AuthError::Config(format!("invalid callback URL: {e}")))
    }
}

fn parse_url(name: &str, value: &str) -> Result<Url, AuthError> {
    value
        .parse()
        .map_err(|e| AuthError::Config(format!("{name} must be a valid URL: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AuthConfig, AuthError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AuthConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_without_any_variable() {
        let config = config_from(&[]).unwrap();

        assert!(config.oidc.is_none());
        assert_eq!(config.base_url.as_str(), "http://localhost:3000/");
        assert_eq!(config.session_ttl, Duration::from_secs(24 * 60 * 60));
        assert_eq!(config.cookie_name, "auth-session");
        assert!(config.cookie_secure);
    }

    #[test]
    fn test_oidc_enabled_with_issuer_and_client_id() {
        let config = config_from(&[
            ("AUTH_BASE_URL", "https://locales.example.com"),
            ("OIDC_ISSUER_URL", "https://tenant.auth0.com/"),
            ("OIDC_CLIENT_ID", "client-123"),
            ("OIDC_CLIENT_SECRET", "s3cret"),
            ("OIDC_LOGOUT_URL", "https://tenant.auth0.com/v2/logout"),
        ])
        .unwrap();

        let oidc = config.oidc.unwrap();
        assert_eq!(oidc.client_id, "client-123");
        assert_eq!(oidc.client_secret.as_deref(), Some("s3cret"));
        assert_eq!(
            oidc.redirect_uri.as_str(),
            "https://locales.example.com/callback"
        );
        assert_eq!(
            oidc.logout_url.map(|u| u.to_string()),
            Some("https://tenant.auth0.com/v2/logout".to_string())
        );
    }

    #[test]
    fn test_issuer_without_client_id_is_an_error() {
        let result = config_from(&[("OIDC_ISSUER_URL", "https://tenant.auth0.com/")]);
        assert!(matches!(result, Err(AuthError::Config(_))));
    }

    #[test]
    fn test_malformed_base_url_is_an_error() {
        let result = config_from(&[("AUTH_BASE_URL", "not a url")]);
        assert!(matches!(result, Err(AuthError::Config(_))));
    }

    #[test]
    fn test_session_ttl_and_cookie_flags() {
        let config = config_from(&[("SESSION_TTL_HOURS", "2"), ("COOKIE_SECURE", "0")]).unwrap();

        assert_eq!(config.session_ttl, Duration::from_secs(2 * 60 * 60));
        assert!(!config.cookie_secure);
    }
}
