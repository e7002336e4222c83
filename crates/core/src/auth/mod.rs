mod error;
mod functions;
mod traits;
mod types;
mod validation;

pub use error::AuthError;
pub use functions::{
    calculate_expiry, generate_session_id, generate_state, is_auth_flow_expired,
    is_session_expired, AUTH_FLOW_TTL_MINUTES,
};
pub use traits::{OidcProviderClient, Result, SessionRepository};
pub use types::{AuthFlowState, Profile, Session, SessionId};
pub use validation::validate_return_to;
