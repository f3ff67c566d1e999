//! # Gradebook HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /api/students` - List students with their grades
//! - `POST /api/students` - Create a student
//! - `GET /api/students/{id}/grades` - List a student's grades
//! - `POST /api/students/{id}/grades` - Add a grade to a student
//! - `DELETE /api/students/{id}/grades/{grade_id}` - Remove a grade
//! - `GET /api/students/{id}/average` - Average grade per discipline
//! - `GET /api/students/{id}/max` - Highest grade per discipline
//! - `GET /api/students/{id}/promotion` - Promotion flag for every discipline
//! - `GET /health` - Health check
//!
//! Unknown students answer 404, invalid input 400, storage failures 500,
//! each with an `{"error": "..."}` body.

mod handlers;
mod middleware;
mod types;

pub use handlers::{
    ApiResult, add_grade_handler, add_student_handler, average_handler, health_handler,
    list_grades_handler, list_students_handler, max_handler, promotion_handler,
    remove_grade_handler,
};
pub use middleware::{GlobalRateLimiter, create_rate_limiter};
pub use types::{
    ErrorResponse, GradeDto, GradeRequest, HealthResponse, StudentDto, StudentRequest, map_list,
};

use crate::config::ServerConfig;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{delete, get},
};
use gradebook_core::{Gradebook, GradebookError};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the gradebook.
#[derive(Clone)]
pub struct AppState {
    /// The gradebook service handle.
    pub gradebook: Arc<RwLock<Gradebook>>,
}

impl AppState {
    /// Create new app state with a gradebook.
    #[must_use]
    pub fn new(gradebook: Gradebook) -> Self {
        Self {
            gradebook: Arc::new(RwLock::new(gradebook)),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

const CORS_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];

/// Build the CORS layer from the configured origins.
///
/// - `["*"]`: allows all origins
/// - empty: localhost only
/// - otherwise: exactly the listed origins (invalid entries are skipped)
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS: Allowing ALL origins. This is insecure for production!");
        return CorsLayer::permissive();
    }

    if origins.is_empty() {
        tracing::info!("CORS: No origins configured, defaulting to localhost only");
        return build_localhost_cors();
    }

    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(hv) => {
                tracing::info!("CORS: Allowing origin: {}", origin);
                Some(hv)
            }
            Err(e) => {
                tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    if allowed_origins.is_empty() {
        tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
        build_localhost_cors()
    } else {
        CorsLayer::new()
            .allow_origin(allowed_origins)
            .allow_methods(CORS_METHODS)
            .allow_headers([header::CONTENT_TYPE])
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .into_iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(CORS_METHODS)
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting - if `config.rate_limit > 0`
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route(
            "/api/students",
            get(handlers::list_students_handler).post(handlers::add_student_handler),
        )
        .route(
            "/api/students/{id}/grades",
            get(handlers::list_grades_handler).post(handlers::add_grade_handler),
        )
        .route(
            "/api/students/{id}/grades/{grade_id}",
            delete(handlers::remove_grade_handler),
        )
        .route("/api/students/{id}/average", get(handlers::average_handler))
        .route("/api/students/{id}/max", get(handlers::max_handler))
        .route(
            "/api/students/{id}/promotion",
            get(handlers::promotion_handler),
        );

    if config.rate_limit > 0 {
        tracing::info!(
            "Rate limiting enabled: {} requests/second",
            config.rate_limit
        );
        router = router.layer(axum_middleware::from_fn_with_state(
            create_rate_limiter(config.rate_limit),
            middleware::rate_limit_middleware,
        ));
    } else {
        tracing::info!("Rate limiting disabled");
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer(&config.cors_origins))
                .layer(axum::extract::DefaultBodyLimit::max(config.body_limit_bytes)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and run until Ctrl+C.
pub async fn run_server(gradebook: Gradebook, config: &ServerConfig) -> Result<(), GradebookError> {
    let addr = format!("{}:{}", config.host, config.port);
    let router = create_router(AppState::new(gradebook), config);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| GradebookError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("Gradebook HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| GradebookError::IoError(format!("Server error: {}", e)))
}

/// Resolve when the process receives Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}
