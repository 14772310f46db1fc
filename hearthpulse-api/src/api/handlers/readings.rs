use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

use crate::api::AppState;
use crate::entities::{ApiError, CreateReadingBody, ErrorResponse, ReadingResponse};

/// List all readings, newest first
#[utoipa::path(
    get,
    path = "/api/readings",
    tag = "readings",
    responses(
        (status = 200, description = "All readings, newest first", body = Vec<ReadingResponse>)
    )
)]
pub async fn list_readings(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReadingResponse>>, ApiError> {
    let readings = state.readings.list_readings().await?;
    Ok(Json(readings.into_iter().map(ReadingResponse::from).collect()))
}

/// Create a new reading
#[utoipa::path(
    post,
    path = "/api/readings",
    tag = "readings",
    request_body = CreateReadingBody,
    responses(
        (status = 201, description = "Reading created", body = ReadingResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse)
    )
)]
pub async fn create_reading(
    State(state): State<AppState>,
    Json(body): Json<CreateReadingBody>,
) -> Result<(StatusCode, Json<ReadingResponse>), ApiError> {
    debug!("Creating reading {}/{}", body.systolic, body.diastolic);
    let reading = state.readings.add_reading(body.into()).await?;
    Ok((StatusCode::CREATED, Json(ReadingResponse::from(reading))))
}

/// Fetch one reading by id
#[utoipa::path(
    get,
    path = "/api/readings/{id}",
    tag = "readings",
    params(("id" = String, Path, description = "Reading ID")),
    responses(
        (status = 200, description = "The reading", body = ReadingResponse),
        (status = 404, description = "Reading not found", body = ErrorResponse)
    )
)]
pub async fn get_reading(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReadingResponse>, ApiError> {
    let reading = state.readings.get_reading(&id).await?;
    Ok(Json(ReadingResponse::from(reading)))
}

/// Delete a reading by id
#[utoipa::path(
    delete,
    path = "/api/readings/{id}",
    tag = "readings",
    params(("id" = String, Path, description = "Reading ID")),
    responses(
        (status = 204, description = "Reading deleted"),
        (status = 404, description = "Reading not found", body = ErrorResponse)
    )
)]
pub async fn delete_reading(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.readings.delete_reading(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
