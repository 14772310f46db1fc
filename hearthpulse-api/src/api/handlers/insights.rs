use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

use crate::api::AppState;
use crate::entities::{ApiError, ErrorResponse, InsightResponse, OcrRequest, OcrResponse};

/// The stored insight, if one is current for the reading set
#[utoipa::path(
    get,
    path = "/api/insights",
    tag = "insights",
    responses(
        (status = 200, description = "The stored insight", body = InsightResponse),
        (status = 404, description = "No insight is stored", body = ErrorResponse)
    )
)]
pub async fn get_insights(
    State(state): State<AppState>,
) -> Result<Json<InsightResponse>, ApiError> {
    match state.insights.current().await? {
        Some(insight) => Ok(Json(insight.into())),
        None => Err(ApiError::NotFound(
            "No insight has been generated for the current readings".to_string(),
        )),
    }
}

/// Generate a fresh insight from the full reading log and profile
#[utoipa::path(
    post,
    path = "/api/insights",
    tag = "insights",
    responses(
        (status = 200, description = "The generated insight", body = InsightResponse)
    )
)]
pub async fn generate_insights(
    State(state): State<AppState>,
) -> Result<Json<InsightResponse>, ApiError> {
    let insight = state.insights.generate().await?;
    Ok(Json(insight.into()))
}

/// Discard the stored insight
#[utoipa::path(
    delete,
    path = "/api/insights",
    tag = "insights",
    responses(
        (status = 204, description = "Insight discarded")
    )
)]
pub async fn clear_insights(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.insights.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Extract reading values from a base64-encoded device photo.
///
/// Extraction is best-effort: an unreadable image yields a null body rather
/// than an error, and the values are never persisted automatically.
#[utoipa::path(
    post,
    path = "/api/ocr",
    tag = "insights",
    request_body = OcrRequest,
    responses(
        (status = 200, description = "Extracted values, or null if unreadable", body = Option<OcrResponse>)
    )
)]
pub async fn scan_device_image(
    State(state): State<AppState>,
    Json(body): Json<OcrRequest>,
) -> Result<Json<Option<OcrResponse>>, ApiError> {
    debug!("Scanning device image ({} bytes of base64)", body.image.len());
    let values = state.insights.scan_device_image(&body.image).await;
    Ok(Json(values.map(|v| OcrResponse {
        systolic: v.systolic,
        diastolic: v.diastolic,
        pulse: v.pulse,
    })))
}
