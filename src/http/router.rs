//! Axum router configuration with middleware.
//!
//! All subscription routes are under `/api/v1/subscription`.

use std::any::Any;
use std::time::Duration;

use axum::Router;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::http::error::ApiError;
use crate::http::handlers;
use crate::http::state::AppState;

/// Build the complete API router with all routes and middleware.
///
/// Requests running longer than `request_timeout` are answered with 408.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let subscription_routes = Router::new()
        .route("/create", post(handlers::create_subscription))
        .route("/list", get(handlers::list_subscriptions))
        .route("/cost", get(handlers::subscription_cost))
        .route(
            "/{id}",
            get(handlers::get_subscription)
                .patch(handlers::update_subscription)
                .delete(handlers::delete_subscription),
        );

    let routes = Router::new()
        .nest("/api/v1/subscription", subscription_routes)
        .route("/health", get(health_check))
        .with_state(state);

    with_middleware(routes, request_timeout)
}

/// Timeout innermost, then panic recovery, then request tracing
fn with_middleware(router: Router, request_timeout: Duration) -> Router {
    router
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}

/// Turn a handler panic into the usual 500 body
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else {
        "unknown panic payload"
    };

    tracing::error!(panic = %detail, "request handler panicked");
    ApiError::Internal.into_response()
}

/// GET /health
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
