//! `OidcProviderClient` implementations: a discovered OIDC issuer and a
//! mock for local development.

mod mock;
mod oidc;

pub use mock::MockProvider;
pub use oidc::OidcProvider;
