//! HTTP routing configuration
//!
//! - POST /github - GitHub webhook receiver
//! - GET  /health - Health check

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

use crate::{handlers, middleware as api_middleware, AppState};

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;

/// Upper bound for a full repository sync.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Create the router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new())
        .on_response(DefaultOnResponse::new());

    Router::new()
        .route("/github", post(handlers::github_webhook))
        .route("/health", get(handlers::health_check))
        .layer(middleware::from_fn(api_middleware::tracing_middleware))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(trace_layer)
        .with_state(state)
}
