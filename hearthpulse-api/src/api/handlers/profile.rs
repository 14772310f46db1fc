use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::api::AppState;
use crate::entities::{ApiError, ProfileDto};

/// The current user profile. Defaults are returned before any save.
#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "profile",
    responses(
        (status = 200, description = "The current profile", body = ProfileDto)
    )
)]
pub async fn get_profile(State(state): State<AppState>) -> Result<Json<ProfileDto>, ApiError> {
    let profile = state.readings.get_profile().await?;
    Ok(Json(profile.into()))
}

/// Replace the user profile wholesale
#[utoipa::path(
    put,
    path = "/api/profile",
    tag = "profile",
    request_body = ProfileDto,
    responses(
        (status = 204, description = "Profile replaced")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Json(body): Json<ProfileDto>,
) -> Result<StatusCode, ApiError> {
    state.readings.update_profile(body.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}
