use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Reading endpoints
        crate::api::handlers::readings::list_readings,
        crate::api::handlers::readings::create_reading,
        crate::api::handlers::readings::get_reading,
        crate::api::handlers::readings::delete_reading,

        // Profile endpoints
        crate::api::handlers::profile::get_profile,
        crate::api::handlers::profile::update_profile,

        // Insight endpoints
        crate::api::handlers::insights::get_insights,
        crate::api::handlers::insights::generate_insights,
        crate::api::handlers::insights::clear_insights,
        crate::api::handlers::insights::scan_device_image,

        // Report endpoints
        crate::api::handlers::export::export_summary,
        crate::api::handlers::export::export_log_sheet
    ),
    components(
        schemas(
            crate::entities::ReadingResponse,
            crate::entities::CreateReadingBody,
            crate::entities::ProfileDto,
            crate::entities::InsightResponse,
            crate::entities::OcrRequest,
            crate::entities::OcrResponse,
            crate::entities::ErrorResponse,
            crate::entities::HealthResponse
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "readings", description = "Blood pressure reading management"),
        (name = "profile", description = "User profile management"),
        (name = "insights", description = "AI insight generation and device photo scanning"),
        (name = "reports", description = "PDF report exports")
    ),
    info(
        title = "HearthPulse API",
        version = "0.1.0",
        description = "API for logging blood pressure readings, generating insights, and exporting reports",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_schema_generates() {
        let openapi = ApiDoc::openapi();

        assert_eq!(openapi.info.title, "HearthPulse API");
        assert_eq!(openapi.info.version, "0.1.0");

        let tags = openapi.tags.as_ref().expect("tags defined");
        assert!(tags.iter().any(|tag| tag.name == "readings"));
        assert!(tags.iter().any(|tag| tag.name == "reports"));

        assert!(openapi.paths.paths.contains_key("/health"));
        assert!(openapi.paths.paths.contains_key("/api/readings"));
        assert!(openapi.paths.paths.contains_key("/api/readings/{id}"));
        assert!(openapi.paths.paths.contains_key("/api/profile"));
        assert!(openapi.paths.paths.contains_key("/api/insights"));
        assert!(openapi.paths.paths.contains_key("/api/ocr"));
        assert!(openapi.paths.paths.contains_key("/api/reports/summary"));
        assert!(openapi.paths.paths.contains_key("/api/reports/log-sheet"));
    }
}
