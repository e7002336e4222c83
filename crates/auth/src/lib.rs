//! OIDC authentication for localemgmt.
//!
//! This crate provides:
//! - The login/callback/logout flow against an OIDC identity provider
//! - A mock provider for local development
//! - Session storage (in-memory, or SQLite with the `sqlite` feature)
//! - Axum extractors for the logged-in profile

mod config;
mod error;
mod extractors;
mod handlers;
mod providers;
mod sessions;
mod state;

pub use config::{AuthConfig, OidcConfig, CALLBACK_PATH, DEFAULT_COOKIE_NAME};
pub use error::AuthError;
pub use extractors::{CurrentProfile, SessionProfile};
pub use handlers::auth_routes;
pub use providers::{MockProvider, OidcProvider};
pub use sessions::InMemorySessionStore;
#[cfg(feature = "sqlite")]
pub use sessions::SqliteSessionStore;
pub use state::AuthState;
