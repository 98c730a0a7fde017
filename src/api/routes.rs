//! Application route configuration.

use axum::{
    extract::State, http::StatusCode, middleware, response::Json, routing::get, Router,
};
use serde::Serialize;
use tower_http::{services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;

use super::handlers::{
    auth_routes, forum_routes, page_routes, profile_routes, public_page_routes, shop_routes,
    weather_api_routes, weather_routes,
};
use super::middleware::{require_login, session_middleware};
use super::openapi::ApiDoc;
use super::AppState;

/// Directory served under `/static`
const STATIC_DIR: &str = "static";

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    // Pages that need a logged-in user
    let protected = Router::new()
        .merge(page_routes())
        .merge(weather_routes())
        .merge(shop_routes())
        .merge(forum_routes())
        .merge(profile_routes())
        .route_layer(middleware::from_fn(require_login));

    Router::new()
        .merge(public_page_routes())
        .merge(auth_routes())
        .merge(weather_api_routes())
        .merge(protected)
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        // Global middleware
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status_code, database) = match state.database.ping().await {
        Ok(_) => (
            StatusCode::OK,
            ServiceStatus {
                status: "healthy",
                error: None,
            },
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ServiceStatus {
                    status: "unhealthy",
                    error: Some(e.to_string()),
                },
            )
        }
    };

    let response = HealthResponse {
        status: if status_code.is_success() {
            "healthy"
        } else {
            "degraded"
        },
        database,
    };

    (status_code, Json(response))
}
