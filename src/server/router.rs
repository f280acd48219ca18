//! Router assembly

use super::cors::with_cors_headers;
use super::handlers::{AppState, order_handler};
use crate::core::OrderError;
use axum::{
    Json, Router,
    response::{IntoResponse, Response},
    routing::{any, get},
};
use serde_json::{Value, json};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

/// Path of the order route
pub const ORDER_PATH: &str = "/api/order";

/// Build the full application router
///
/// - `/api/order`: order intake (all methods)
/// - `/health`, `/healthz`: liveness
///
/// Layers, innermost first: panic recovery, CORS headers, request tracing.
pub fn build_router(state: AppState) -> Router {
    let app = Router::new()
        .route(ORDER_PATH, any(order_handler))
        .with_state(state)
        .merge(health_routes())
        .layer(CatchPanicLayer::custom(handle_panic));

    with_cors_headers(app).layer(TraceLayer::new_for_http())
}

fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "order-intake"
    }))
}

/// Turn a handler panic into the generic 500 response
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    OrderError::internal(format!("handler panicked: {}", detail)).into_response()
}
