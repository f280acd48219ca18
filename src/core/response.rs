//! Response body shared by every outcome of the order route

use serde::{Deserialize, Serialize};

/// `{ "success": bool, "message": string }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub success: bool,
    pub message: String,
}

impl OrderResponse {
    /// Confirmation for a placed order
    pub fn placed(order_number: &str) -> Self {
        Self {
            success: true,
            message: format!(
                "Thank you! Your order #{} has been placed successfully. We will contact you shortly.",
                order_number
            ),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
