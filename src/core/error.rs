//! Typed error handling for order intake
//!
//! Every failure the handler can produce maps onto one variant of
//! [`OrderError`], and every variant knows its HTTP status and the message
//! a caller is allowed to see.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: the payload broke a business rule (400)
//! - [`OrderError::MethodNotAllowed`]: wrong HTTP method (405)
//! - [`OrderError::Internal`]: anything unexpected (500, details logged only)
//!
//! Notification failures never appear here; see [`crate::notify::NotifyError`].
//!
//! # Example
//!
//! ```rust,ignore
//! match handle(request).await {
//!     Err(OrderError::Validation(ValidationError::InvalidProduct)) => { /* 400 */ }
//!     Err(e) => eprintln!("{}", e),
//!     Ok(_) => {}
//! }
//! ```

use super::response::OrderResponse;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt;

/// Message returned for every unexpected fault
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred. Please try again.";

/// The main error type for the order handler
#[derive(Debug)]
pub enum OrderError {
    /// The request payload failed validation
    Validation(ValidationError),

    /// The request used a method other than POST or OPTIONS
    MethodNotAllowed,

    /// Unexpected fault; the string is for operators, never for callers
    Internal(String),
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderError::Validation(e) => write!(f, "{}", e),
            OrderError::MethodNotAllowed => write!(f, "Method not allowed"),
            OrderError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for OrderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OrderError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl OrderError {
    /// Build an internal error from anything displayable
    pub fn internal(cause: impl fmt::Display) -> Self {
        OrderError::Internal(cause.to_string())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            OrderError::Validation(_) => StatusCode::BAD_REQUEST,
            OrderError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            OrderError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            OrderError::Validation(e) => e.error_code(),
            OrderError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            OrderError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The message a caller sees
    ///
    /// Internal details are replaced by [`GENERIC_FAILURE_MESSAGE`].
    pub fn public_message(&self) -> String {
        match self {
            OrderError::Internal(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// Convert to the response body
    pub fn to_response(&self) -> OrderResponse {
        OrderResponse::failure(self.public_message())
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        match &self {
            OrderError::Internal(cause) => {
                tracing::error!(
                    error_code = self.error_code(),
                    cause = %cause,
                    "Order request failed"
                );
            }
            OrderError::Validation(e) => {
                tracing::debug!(error_code = self.error_code(), "Order rejected: {}", e);
            }
            OrderError::MethodNotAllowed => {}
        }

        let status = self.status_code();
        (status, Json(self.to_response())).into_response()
    }
}

impl From<ValidationError> for OrderError {
    fn from(err: ValidationError) -> Self {
        OrderError::Validation(err)
    }
}

impl From<serde_json::Error> for OrderError {
    fn from(err: serde_json::Error) -> Self {
        OrderError::Internal(format!("malformed request body: {}", err))
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Business-rule violations, checked in declaration order
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// One of name, address, phone or product is missing or empty
    MissingFields,

    /// The product key is not in the catalog
    InvalidProduct,

    /// Quantity is not a number or is below the product's minimum
    QuantityBelowMinimum { product: String, minimum: f64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingFields => write!(f, "All required fields must be filled"),
            ValidationError::InvalidProduct => write!(f, "Invalid product selected"),
            // The unit is always kg, whatever the product.
            ValidationError::QuantityBelowMinimum { product, minimum } => write!(
                f,
                "Quantity does not meet minimum requirement for {} (Min: {}kg)",
                product, minimum
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MissingFields => "MISSING_FIELDS",
            ValidationError::InvalidProduct => "INVALID_PRODUCT",
            ValidationError::QuantityBelowMinimum { .. } => "QUANTITY_BELOW_MINIMUM",
        }
    }
}
