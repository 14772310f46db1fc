use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::Local;

use hearthpulse_domain::report::{render_standardized_log, render_summary, Document};
use hearthpulse_domain::services::aggregate::{last_days_window, last_entries_window};

use crate::api::AppState;
use crate::entities::{ApiError, ErrorResponse};
use crate::export::pdf::document_to_pdf;

/// Days covered by the summary report window
const SUMMARY_WINDOW_DAYS: i64 = 7;

/// Entries covered by the standardized log sheet
const LOG_SHEET_ENTRIES: usize = 28;

fn pdf_response(document: &Document) -> Result<Response, ApiError> {
    let bytes = document_to_pdf(document).map_err(|e| ApiError::Internal(e.to_string()))?;
    let disposition = format!("attachment; filename=\"{}\"", document.filename);
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// Export the summary report over the last seven days of readings
#[utoipa::path(
    get,
    path = "/api/reports/summary",
    tag = "reports",
    responses(
        (status = 200, description = "PDF summary report", content_type = "application/pdf"),
        (status = 404, description = "No readings to export", body = ErrorResponse)
    )
)]
pub async fn export_summary(State(state): State<AppState>) -> Result<Response, ApiError> {
    let readings = state.readings.list_readings().await?;
    let window = last_days_window(&readings, SUMMARY_WINDOW_DAYS);
    let document = render_summary(&window, Local::now().naive_local())?;
    pdf_response(&document)
}

/// Export the standardized log sheet over the last 28 readings
#[utoipa::path(
    get,
    path = "/api/reports/log-sheet",
    tag = "reports",
    responses(
        (status = 200, description = "PDF log sheet", content_type = "application/pdf"),
        (status = 404, description = "No readings to export", body = ErrorResponse)
    )
)]
pub async fn export_log_sheet(State(state): State<AppState>) -> Result<Response, ApiError> {
    let readings = state.readings.list_readings().await?;
    let profile = state.readings.get_profile().await?;
    let window = last_entries_window(&readings, LOG_SHEET_ENTRIES);
    let document = render_standardized_log(&window, &profile, Local::now().date_naive())?;
    pdf_response(&document)
}
