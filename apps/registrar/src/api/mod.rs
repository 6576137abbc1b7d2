//! # Registrar HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET/POST /api/students`, `GET/PUT/DELETE /api/students/{id}`
//! - `GET/POST /api/courses`, `GET/PUT/DELETE /api/courses/{id}`
//! - `GET/POST /api/enrollments`, `DELETE /api/enrollments/{id}`
//! - `GET/POST /api/grades`, `GET/PUT/DELETE /api/grades/{id}`
//! - `GET /api/dashboard/stats` - Dashboard summary
//! - `GET /health` - Health check
//!
//! ## Security Configuration (Environment Variables)
//!
//! - `REGISTRAR_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `REGISTRAR_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)
//! - `REGISTRAR_API_KEY`: If set, requires Bearer token authentication

mod auth;
mod handlers;
mod middleware;
mod types;

// Re-exports for external use
pub use auth::get_api_key_from_env;
pub use middleware::{create_rate_limiter, get_rate_limit_from_env};
// Re-export handlers and types for integration tests (via `registrar::api::*`)
#[allow(unused_imports)]
pub use types::{
    CreateCourseRequest, CreateGradeRequest, CreateStudentRequest, ErrorResponse, HealthResponse,
    validate_course_patch, validate_grade_patch, validate_student_patch,
};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{delete, get},
};
use registrar_core::{EntityStore, RegistrarError};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the entity store.
///
/// The store is constructed by the caller and handed in; nothing here is a
/// process-wide singleton, so tests build isolated instances per case.
#[derive(Clone)]
pub struct AppState {
    /// The in-memory records store.
    pub store: Arc<RwLock<EntityStore>>,
}

impl AppState {
    /// Create new app state around a store.
    #[must_use]
    pub fn new(store: EntityStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Parse a comma-separated origin list into header values, dropping (and
/// logging) entries that do not parse.
fn parse_origins(origins: &str) -> Vec<HeaderValue> {
    origins
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            match trimmed.parse::<HeaderValue>() {
                Ok(hv) => {
                    tracing::info!("CORS: Allowing origin: {}", trimmed);
                    Some(hv)
                }
                Err(e) => {
                    tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

/// Build the CORS layer from `REGISTRAR_CORS_ORIGINS`.
///
/// - `*`: allows all origins (development mode)
/// - unset: localhost only (restrictive default)
/// - otherwise: comma-separated allow list
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("REGISTRAR_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!(
                "CORS: Allowing ALL origins (REGISTRAR_CORS_ORIGINS=*). This is insecure for production!"
            );
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed = parse_origins(origins);
            if allowed.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in REGISTRAR_CORS_ORIGINS, defaulting to localhost only"
                );
                cors_with_origins(localhost_origins())
            } else {
                cors_with_origins(allowed)
            }
        }
        None => {
            tracing::info!("CORS: No REGISTRAR_CORS_ORIGINS set, defaulting to localhost only");
            cors_with_origins(localhost_origins())
        }
    }
}

fn localhost_origins() -> Vec<HeaderValue> {
    [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect()
}

fn cors_with_origins(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. CORS - handles preflight requests
/// 2. Tracing - logs all requests
/// 3. Rate Limiting - protects against DoS (if enabled)
/// 4. Authentication - validates API key (if configured)
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer();

    let rate_limit = get_rate_limit_from_env();
    let rate_limiter = if rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", rate_limit);
        Some(create_rate_limiter(rate_limit))
    } else {
        tracing::info!("Rate limiting disabled");
        None
    };

    let has_auth = get_api_key_from_env().is_some();
    if has_auth {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!(
            "API key authentication DISABLED - all endpoints are publicly accessible! \
             Set REGISTRAR_API_KEY environment variable to enable authentication."
        );
    }

    let api_routes = Router::new()
        .route(
            "/students",
            get(handlers::list_students_handler).post(handlers::create_student_handler),
        )
        .route(
            "/students/{id}",
            get(handlers::get_student_handler)
                .put(handlers::update_student_handler)
                .delete(handlers::delete_student_handler),
        )
        .route(
            "/courses",
            get(handlers::list_courses_handler).post(handlers::create_course_handler),
        )
        .route(
            "/courses/{id}",
            get(handlers::get_course_handler)
                .put(handlers::update_course_handler)
                .delete(handlers::delete_course_handler),
        )
        .route(
            "/enrollments",
            get(handlers::list_enrollments_handler).post(handlers::create_enrollment_handler),
        )
        .route(
            "/enrollments/{id}",
            delete(handlers::delete_enrollment_handler),
        )
        .route(
            "/grades",
            get(handlers::list_grades_handler).post(handlers::create_grade_handler),
        )
        .route(
            "/grades/{id}",
            get(handlers::get_grade_handler)
                .put(handlers::update_grade_handler)
                .delete(handlers::delete_grade_handler),
        )
        .route("/dashboard/stats", get(handlers::dashboard_stats_handler));

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .nest("/api", api_routes);

    // Apply authentication middleware (innermost - runs last on request)
    if has_auth {
        router = router.layer(axum_middleware::from_fn(auth::api_key_auth_middleware));
    }

    // Apply rate limiting middleware
    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    // Apply CORS, body limit, and tracing (outermost layers)
    router
        .layer(axum::extract::DefaultBodyLimit::max(1024 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server around the given store.
pub async fn run_server(addr: &str, store: EntityStore) -> Result<(), RegistrarError> {
    let state = AppState::new(store);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| RegistrarError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("Registrar HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| RegistrarError::Io(format!("Server error: {}", e)))
}
