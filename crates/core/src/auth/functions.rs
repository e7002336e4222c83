use chrono::{DateTime, Duration, Utc};
use rand::{distr::Alphanumeric, Rng};

use super::{AuthFlowState, Session, SessionId};

/// How long a started login may wait for its callback.
pub const AUTH_FLOW_TTL_MINUTES: i64 = 10;

const TOKEN_LENGTH: usize = 32;

fn random_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Generate a random session ID.
pub fn generate_session_id() -> SessionId {
    SessionId::new(random_token())
}

/// Generate a random state parameter for CSRF protection.
pub fn generate_state() -> String {
    random_token()
}

/// Calculate session expiry from creation time and TTL.
pub fn calculate_expiry(created_at: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    created_at + ttl
}

/// A session is expired from its `expires_at` instant onwards.
pub fn is_session_expired(session: &Session, now: DateTime<Utc>) -> bool {
    session.expires_at <= now
}

/// A login flow is expired once [`AUTH_FLOW_TTL_MINUTES`] have passed.
pub fn is_auth_flow_expired(flow: &AuthFlowState, now: DateTime<Utc>) -> bool {
    flow.created_at + Duration::minutes(AUTH_FLOW_TTL_MINUTES) <= now
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Profile;

    fn session_expiring_at(expires_at: DateTime<Utc>) -> Session {
        Session {
            id: generate_session_id(),
            profile: Profile::new("auth0|123"),
            created_at: expires_at - Duration::hours(24),
            expires_at,
        }
    }

    fn flow_created_at(created_at: DateTime<Utc>) -> AuthFlowState {
        AuthFlowState {
            pkce_verifier: "verifier".to_string(),
            created_at,
            return_to: None,
        }
    }

    #[test]
    fn test_session_ids_are_32_alphanumeric_chars() {
        let id = generate_session_id();
        assert_eq!(id.as_str().len(), 32);
        assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_session_ids_differ() {
        assert_ne!(generate_session_id(), generate_session_id());
    }

    #[test]
    fn test_state_is_32_chars() {
        assert_eq!(generate_state().len(), 32);
    }

    #[test]
    fn test_expiry_is_creation_plus_ttl() {
        let created = Utc::now();
        assert_eq!(
            calculate_expiry(created, Duration::hours(24)),
            created + Duration::hours(24)
        );
    }

    #[test]
    fn test_session_is_live_before_expiry() {
        let now = Utc::now();
        assert!(!is_session_expired(
            &session_expiring_at(now + Duration::minutes(1)),
            now
        ));
    }

    #[test]
    fn test_session_is_expired_at_and_after_expiry() {
        let now = Utc::now();
        assert!(is_session_expired(&session_expiring_at(now), now));
        assert!(is_session_expired(
            &session_expiring_at(now - Duration::minutes(1)),
            now
        ));
    }

    #[test]
    fn test_fresh_auth_flow_is_not_expired() {
        let now = Utc::now();
        assert!(!is_auth_flow_expired(
            &flow_created_at(now - Duration::minutes(1)),
            now
        ));
    }

    #[test]
    fn test_stale_auth_flow_is_expired() {
        let now = Utc::now();
        assert!(is_auth_flow_expired(
            &flow_created_at(now - Duration::minutes(AUTH_FLOW_TTL_MINUTES)),
            now
        ));
    }
}
