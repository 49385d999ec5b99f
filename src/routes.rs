//! HTTP routes and middleware.

use axum::{
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::handlers::{self, AppState};

/// Build the application router.
///
/// The lookup handler is mounted for every method so that it can answer
/// non-POST requests with its own 405 body.
pub fn app(state: Arc<AppState>) -> Router {
    let body_limit = state.config.body_limit_bytes;

    let lookup_routes = Router::new()
        .route("/", any(handlers::lookup_employee))
        .route("/api/v1/employees/lookup", any(handlers::lookup_employee))
        .layer(ServiceBuilder::new().layer(RequestBodyLimitLayer::new(body_limit)));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(lookup_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
