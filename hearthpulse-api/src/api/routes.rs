use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::api::handlers::{export, health, insights, profile, readings};
use crate::api::AppState;
use crate::openapi::configure_swagger_routes;

/// Create the application router
pub fn create_application(state: AppState) -> Router {
    debug!("Creating application router");

    let api_routes = Router::new()
        .route("/readings", get(readings::list_readings).post(readings::create_reading))
        .route(
            "/readings/:id",
            get(readings::get_reading).delete(readings::delete_reading),
        )
        .route("/profile", get(profile::get_profile).put(profile::update_profile))
        .route(
            "/insights",
            get(insights::get_insights)
                .post(insights::generate_insights)
                .delete(insights::clear_insights),
        )
        .route("/ocr", post(insights::scan_device_image))
        .route("/reports/summary", get(export::export_summary))
        .route("/reports/log-sheet", get(export::export_log_sheet));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes)
        .merge(configure_swagger_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    fn app() -> Router {
        create_application(AppState::in_memory())
    }

    #[tokio::test]
    async fn health_endpoint_responds() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = app()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn readings_list_starts_empty() {
        let response = app()
            .oneshot(Request::builder().uri("/api/readings").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn summary_export_with_no_data_is_not_found() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/reports/summary")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
