//! Order request and record types
//!
//! [`OrderRequest`] is the raw payload as the client sent it. [`OrderRecord`]
//! only exists for a payload that passed validation; it feeds the
//! notification and the confirmation message and is then dropped.

use super::error::OrderError;
use super::validation::ValidatedOrder;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fixed prefix of every order number
pub const ORDER_NUMBER_PREFIX: &str = "FP";

/// Format of [`OrderRecord::date`]
pub const ORDER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Incoming order payload
///
/// Fields stay as raw JSON so that presence checks can treat empty strings,
/// `null`, `false` and `0` alike, and `quantity` can arrive as a number or
/// as text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub address: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub product: Option<Value>,
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub notes: Option<Value>,
}

impl OrderRequest {
    /// Decode a request from a parsed JSON body
    ///
    /// A `null` body is a fault. Any other non-object value carries no
    /// fields and so fails validation later on.
    pub fn from_json(body: Value) -> Result<Self, OrderError> {
        match body {
            Value::Null => Err(OrderError::internal("request body is null")),
            Value::Object(_) => Ok(serde_json::from_value(body)?),
            _ => Ok(Self::default()),
        }
    }

    /// Decode a request from raw body bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, OrderError> {
        let body: Value = serde_json::from_slice(bytes)?;
        Self::from_json(body)
    }
}

/// A validated, numbered order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRecord {
    pub order_number: String,
    pub date: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    /// Display name of the ordered product
    pub product: String,
    pub quantity: f64,
    /// Customer notes, `"None"` when absent
    pub notes: String,
}

impl OrderRecord {
    /// Number and date a validated order using the current clock
    pub fn create(order: ValidatedOrder) -> Self {
        let now = Utc::now();
        let order_number = generate_order_number(now, &mut rand::thread_rng());
        Self::at(order, order_number, now)
    }

    /// Build the record with an explicit number and timestamp
    pub fn at(order: ValidatedOrder, order_number: String, now: DateTime<Utc>) -> Self {
        Self {
            order_number,
            date: format_order_date(now),
            name: order.name,
            phone: order.phone,
            address: order.address,
            product: order.product.display_name,
            quantity: order.quantity,
            notes: order.notes.unwrap_or_else(|| "None".to_string()),
        }
    }
}

/// `FP` + epoch milliseconds + a random suffix in `0..=999`
///
/// Not collision-free: two orders in the same millisecond share a suffix
/// space of one thousand values.
pub fn generate_order_number<R: Rng>(now: DateTime<Utc>, rng: &mut R) -> String {
    let suffix: u16 = rng.gen_range(0..1000);
    format!("{}{}{}", ORDER_NUMBER_PREFIX, now.timestamp_millis(), suffix)
}

/// `YYYY-MM-DD HH:MM:SS` in UTC
pub fn format_order_date(now: DateTime<Utc>) -> String {
    now.format(ORDER_DATE_FORMAT).to_string()
}
