// API request/response entities

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use hearthpulse_domain::entities::{
    CreateReadingRequest, Insight, Profile, Reading, Trend,
};
use hearthpulse_domain::report::ReportError;
use hearthpulse_domain::services::classify;
use hearthpulse_domain::services::ReadingServiceError;

/// Error response format for the API
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

/// API error mapped onto an HTTP status and error body
#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    NotFound(String),
    /// Empty window: there is nothing to export
    NoData(String),
    Internal(String),
}

impl From<ReadingServiceError> for ApiError {
    fn from(err: ReadingServiceError) -> Self {
        match err {
            ReadingServiceError::Validation(msg) => ApiError::Validation(msg),
            ReadingServiceError::NotFound(msg) => ApiError::NotFound(msg),
            ReadingServiceError::Repository(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::NoReadings => ApiError::NoData(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::NoData(msg) => (StatusCode::NOT_FOUND, "no_data", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };
        let body = ErrorResponse { error: error.to_string(), message };
        (status, Json(body)).into_response()
    }
}

/// One blood pressure reading, with its derived category label
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadingResponse {
    pub id: String,
    pub systolic: i32,
    pub diastolic: i32,
    pub pulse: i32,
    /// ISO-8601 timestamp of the measurement
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Clinical category, recomputed on every response
    pub category: String,
}

impl From<Reading> for ReadingResponse {
    fn from(reading: Reading) -> Self {
        let category = classify(reading.systolic, reading.diastolic).to_string();
        Self {
            id: reading.id,
            systolic: reading.systolic,
            diastolic: reading.diastolic,
            pulse: reading.pulse,
            timestamp: reading.timestamp,
            note: reading.note,
            category,
        }
    }
}

/// Request body for creating a reading.
///
/// Pressures and pulse accept any integer; the entry boundary performs no
/// range validation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReadingBody {
    pub systolic: i32,
    pub diastolic: i32,
    pub pulse: i32,
    /// ISO-8601 timestamp; defaults to the current time
    pub timestamp: Option<String>,
    pub note: Option<String>,
}

impl From<CreateReadingBody> for CreateReadingRequest {
    fn from(body: CreateReadingBody) -> Self {
        CreateReadingRequest {
            systolic: body.systolic,
            diastolic: body.diastolic,
            pulse: body.pulse,
            timestamp: body.timestamp,
            note: body.note,
        }
    }
}

/// User profile, replaced wholesale on update
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileDto {
    pub age: String,
    pub gender: String,
    pub weight: String,
    pub height: String,
    pub conditions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Target systolic pressure in mmHg
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bp_goal: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl From<Profile> for ProfileDto {
    fn from(p: Profile) -> Self {
        Self {
            age: p.age,
            gender: p.gender,
            weight: p.weight,
            height: p.height,
            conditions: p.conditions,
            name: p.name,
            bp_goal: p.bp_goal,
            api_key: p.api_key,
        }
    }
}

impl From<ProfileDto> for Profile {
    fn from(p: ProfileDto) -> Self {
        Self {
            age: p.age,
            gender: p.gender,
            weight: p.weight,
            height: p.height,
            conditions: p.conditions,
            name: p.name,
            bp_goal: p.bp_goal,
            api_key: p.api_key,
        }
    }
}

/// AI-generated insight report
#[derive(Debug, Serialize, ToSchema)]
pub struct InsightResponse {
    pub summary: String,
    pub recommendations: Vec<String>,
    /// One of improving, declining, stable, insufficient
    pub trend: String,
    pub generated_at: String,
}

impl From<Insight> for InsightResponse {
    fn from(insight: Insight) -> Self {
        let trend = match insight.trend {
            Trend::Improving => "improving",
            Trend::Declining => "declining",
            Trend::Stable => "stable",
            Trend::Insufficient => "insufficient",
        };
        Self {
            summary: insight.summary,
            recommendations: insight.recommendations,
            trend: trend.to_string(),
            generated_at: insight.generated_at,
        }
    }
}

/// Request body for OCR extraction from a device photo
#[derive(Debug, Deserialize, ToSchema)]
pub struct OcrRequest {
    /// Base64-encoded JPEG, with or without a data-URL prefix
    pub image: String,
}

/// Values extracted from a device photo
#[derive(Debug, Serialize, ToSchema)]
pub struct OcrResponse {
    pub systolic: i32,
    pub diastolic: i32,
    pub pulse: i32,
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
