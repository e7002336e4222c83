//! Axum extractors for authentication.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use localemgmt_core::auth::{is_session_expired, Profile, SessionId};

use crate::AuthState;

type Rejection = (StatusCode, &'static str);

/// Extractor for the logged-in profile. Returns 401 without a live session.
pub struct CurrentProfile(pub Profile);

impl<S> FromRequestParts<S> for CurrentProfile
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        lookup_profile(&auth_state, parts)
            .await?
            .map(CurrentProfile)
            .ok_or((StatusCode::UNAUTHORIZED, "Login required"))
    }
}

/// Extractor for the profile of the session, if there is one.
///
/// Missing, unknown and expired sessions all yield `None`. A failing session
/// store is still a 500.
pub struct SessionProfile(pub Option<Profile>);

impl<S> FromRequestParts<S> for SessionProfile
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        Ok(SessionProfile(lookup_profile(&auth_state, parts).await?))
    }
}

/// Session ID from `Authorization: Bearer` (API clients) or the session cookie.
fn session_id_from_parts(parts: &Parts, cookie_name: &str) -> Option<SessionId> {
    let bearer = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(SessionId::new);

    bearer.or_else(|| {
        CookieJar::from_headers(&parts.headers)
            .get(cookie_name)
            .map(|cookie| SessionId::new(cookie.value()))
    })
}

async fn lookup_profile(
    auth_state: &AuthState,
    parts: &Parts,
) -> Result<Option<Profile>, Rejection> {
    let Some(session_id) = session_id_from_parts(parts, &auth_state.config.cookie_name) else {
        return Ok(None);
    };

    let session = auth_state
        .sessions
        .get_session(&session_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Session lookup failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Session lookup failed")
        })?;

    Ok(session
        .filter(|session| !is_session_expired(session, Utc::now()))
        .map(|session| session.profile))
}
