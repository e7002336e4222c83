//! HTTP handlers for auth routes.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use chrono::{Duration, Utc};
use localemgmt_core::auth::{
    calculate_expiry, generate_session_id, generate_state, is_auth_flow_expired,
    validate_return_to, AuthError as CoreError, AuthFlowState, Session, SessionId,
};
use openidconnect::PkceCodeChallenge;
use serde::Deserialize;

use crate::error::AuthError;
use crate::AuthState;

/// Query parameters for the login endpoint.
#[derive(Deserialize, Default)]
pub struct LoginQuery {
    /// Relative path to redirect to after successful authentication.
    pub return_to: Option<String>,
}

/// Query parameters the identity provider sends back to the callback.
#[derive(Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: String,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Creates the auth router.
///
/// Routes:
/// - `GET /login` - Start the OIDC flow
/// - `GET /callback` - Finish the OIDC flow and set the session cookie
/// - `GET /logout` - End the current session
pub fn auth_routes() -> Router<AuthState> {
    Router::new()
        .route("/login", get(login))
        .route("/callback", get(callback))
        .route("/logout", get(logout))
}

async fn login(
    State(state): State<AuthState>,
    Query(query): Query<LoginQuery>,
) -> Result<Redirect, AuthError> {
    let provider = state.provider()?;
    let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();
    let csrf_state = generate_state();

    // Only same-site paths survive, anything else falls back to the root.
    let return_to = query
        .return_to
        .as_deref()
        .and_then(validate_return_to)
        .map(String::from);

    let flow = AuthFlowState {
        pkce_verifier: pkce_verifier.secret().to_string(),
        created_at: Utc::now(),
        return_to,
    };
    state.sessions.store_auth_flow(&csrf_state, &flow).await?;

    let auth_url = provider
        .authorization_url(&csrf_state, pkce_challenge.as_str())
        .await?;

    tracing::debug!(provider = provider.name(), "Redirecting to identity provider");

    Ok(Redirect::to(auth_url.as_str()))
}

async fn callback(
    State(state): State<AuthState>,
    Query(params): Query<CallbackQuery>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AuthError> {
    let provider = state.provider()?;

    // The flow is consumed whatever happens next.
    let flow = state
        .sessions
        .take_auth_flow(&params.state)
        .await?
        .ok_or(CoreError::InvalidState)?;

    if is_auth_flow_expired(&flow, Utc::now()) {
        return Err(CoreError::FlowExpired.into());
    }

    let code = match (params.code, params.error) {
        (_, Some(error)) => {
            let detail = params
                .error_description
                .map(|description| format!("{error}: {description}"))
                .unwrap_or(error);
            return Err(CoreError::CodeExchange(detail).into());
        }
        (Some(code), None) => code,
        (None, None) => {
            return Err(CoreError::CodeExchange("missing authorization code".to_string()).into())
        }
    };

    let profile = provider.exchange_code(&code, &flow.pkce_verifier).await?;

    let ttl_secs = state.config.session_ttl.as_secs() as i64;
    let now = Utc::now();
    let session = Session {
        id: generate_session_id(),
        profile,
        created_at: now,
        expires_at: calculate_expiry(now, Duration::seconds(ttl_secs)),
    };
    state.sessions.create_session(&session).await?;

    tracing::info!(subject = %session.profile.subject, "User logged in");

    let cookie = Cookie::build((state.config.cookie_name.clone(), session.id.to_string()))
        .path("/")
        .http_only(true)
        .secure(state.config.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(ttl_secs))
        .build();

    let redirect_url = flow.return_to.unwrap_or_else(|| "/".to_string());
    Ok((jar.add(cookie), Redirect::to(&redirect_url)))
}

async fn logout(
    State(state): State<AuthState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AuthError> {
    if let Some(cookie) = jar.get(&state.config.cookie_name) {
        let session_id = SessionId::new(cookie.value());
        state.sessions.delete_session(&session_id).await?;
        tracing::info!("User logged out");
    }

    let jar = jar.remove(Cookie::build(state.config.cookie_name.clone()).path("/"));

    let redirect_url = state
        .provider()
        .ok()
        .and_then(|provider| provider.logout_url(&state.config.base_url))
        .map(|url| url.to_string())
        .unwrap_or_else(|| "/".to_string());

    Ok((jar, Redirect::to(&redirect_url)))
}
