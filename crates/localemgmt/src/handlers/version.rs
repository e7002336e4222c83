use axum::Json;
use serde::Serialize;

use localemgmt_auth::SessionProfile;
use localemgmt_core::auth::Profile;

/// Response for `GET /version`.
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
    /// The logged-in profile, `null` without a session.
    pub user: Option<Profile>,
}

/// Build version plus the current user, if any.
pub async fn version(SessionProfile(user): SessionProfile) -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
        user,
    })
}
