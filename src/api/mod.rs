pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use http::{HeaderValue, Method, StatusCode, header};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::core::errors::ClinicError;
use crate::core::services::ClinicService;
use crate::infrastructure::{logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage};
use handlers::{auth, doctor, patient};
use models::ApiError;
use openapi::ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ClinicService<InMemoryLogging, InMemoryStorage>>,
    pub cookie_secure: bool,
}

// Define API routes
pub fn api_routes(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route(
            "/api/doctor",
            post(doctor::create_appointment).get(doctor::list_appointments),
        )
        .route("/api/doctor/all", get(doctor::list_doctors))
        .route(
            "/api/doctor/{id}",
            put(doctor::update_appointment)
                .patch(doctor::cancel_appointment)
                .delete(doctor::delete_appointment),
        )
        .route(
            "/api/patient",
            post(patient::create_appointment).get(patient::list_appointments),
        )
        .route("/api/patient/all", get(patient::list_patients))
        .route(
            "/api/patient/{id}",
            get(patient::patient_history).patch(patient::update_appointment),
        )
        .route_layer(from_fn_with_state(state.clone(), middleware::require_session));

    Router::new()
        .route("/", get(|| async { "OK" }))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", get(auth::logout))
        .merge(protected_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(route_not_found)
        .with_state(state)
}

async fn route_not_found() -> ApiError {
    ApiError(ClinicError::not_found("route not found"))
}

/// Compression, timeout, CORS and request tracing for the public listener.
///
/// The browser client sits on another origin and sends the session cookie,
/// so CORS names that origin explicitly and allows credentials.
pub fn with_http_layers(router: Router, client_origin: &str) -> Result<Router, header::InvalidHeaderValue> {
    let origin = HeaderValue::from_str(client_origin)?;

    Ok(router
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE])
                .allow_credentials(true),
        )
        .layer(TraceLayer::new_for_http()))
}
