//! HTTP handler for the order route

use crate::config::{DEFAULT_NOTIFY_TIMEOUT, ProductCatalog};
use crate::core::{OrderError, OrderRecord, OrderRequest, OrderResponse, validate_order};
use crate::notify::{Notifier, notify_best_effort};
use axum::{
    Json,
    body::to_bytes,
    extract::{Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Duration;

/// Largest order body accepted
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Shared state for the order handler
///
/// Everything here is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ProductCatalog>,
    pub notifier: Option<Arc<dyn Notifier>>,
    pub notify_timeout: Duration,
}

impl AppState {
    pub fn new(catalog: ProductCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            notifier: None,
            notify_timeout: DEFAULT_NOTIFY_TIMEOUT,
        }
    }
}

/// Entry point for every method on the order route
///
/// - `OPTIONS`: 200 with an empty body
/// - `POST`: place the order
/// - anything else: 405
///
/// The method is checked before the body is read.
pub async fn order_handler(State(state): State<AppState>, request: Request) -> Response {
    let method = request.method().clone();
    match method {
        Method::OPTIONS => StatusCode::OK.into_response(),
        Method::POST => {
            let result = match to_bytes(request.into_body(), MAX_BODY_BYTES).await {
                Ok(body) => place_order(&state, &body).await,
                Err(e) => Err(OrderError::internal(format!("failed to read body: {}", e))),
            };

            match result {
                Ok(response) => (StatusCode::OK, Json(response)).into_response(),
                Err(e) => e.into_response(),
            }
        }
        _ => OrderError::MethodNotAllowed.into_response(),
    }
}

/// Validate, number and announce one order
///
/// Notification runs only when a notifier is configured, and its outcome
/// does not affect the result.
pub async fn place_order(state: &AppState, body: &[u8]) -> Result<OrderResponse, OrderError> {
    let request = OrderRequest::from_slice(body)?;
    let order = validate_order(&state.catalog, &request)?;
    let record = OrderRecord::create(order);

    if let Some(notifier) = &state.notifier {
        notify_best_effort(notifier.as_ref(), &record, state.notify_timeout).await;
    }

    tracing::info!(
        order_number = %record.order_number,
        product = %record.product,
        quantity = record.quantity,
        "Order placed"
    );

    Ok(OrderResponse::placed(&record.order_number))
}
