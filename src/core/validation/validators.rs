//! Order validation rules
//!
//! Rules run in a fixed order and the first violation wins:
//! required fields, then product, then quantity.

use super::number::quantity_from_value;
use crate::config::{Product, ProductCatalog};
use crate::core::error::ValidationError;
use crate::core::order::OrderRequest;
use serde_json::Value;

/// An order whose fields passed every rule
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedOrder {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub product_key: String,
    pub product: Product,
    pub quantity: f64,
    pub notes: Option<String>,
}

/// Text of a field if it is "filled"
///
/// Missing, `null`, `false`, `0`, and `""` all count as empty. Other
/// scalars are rendered as text; strings are kept verbatim.
pub fn filled_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 0.0 || f.is_nan() => None,
            _ => Some(n.to_string()),
        },
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Rule 1: name, address, phone and product must all be filled
pub fn require_fields(
    request: &OrderRequest,
) -> Result<(String, String, String, String), ValidationError> {
    let fields = (
        filled_text(request.name.as_ref()),
        filled_text(request.address.as_ref()),
        filled_text(request.phone.as_ref()),
        filled_text(request.product.as_ref()),
    );

    match fields {
        (Some(name), Some(address), Some(phone), Some(product)) => {
            Ok((name, address, phone, product))
        }
        _ => Err(ValidationError::MissingFields),
    }
}

/// Rule 2: the product key must exist in the catalog
pub fn resolve_product<'a>(
    catalog: &'a ProductCatalog,
    key: &str,
) -> Result<&'a Product, ValidationError> {
    catalog.get(key).ok_or(ValidationError::InvalidProduct)
}

/// Rule 3: the quantity must parse and reach the product minimum
pub fn check_quantity(product: &Product, raw: Option<&Value>) -> Result<f64, ValidationError> {
    let quantity = quantity_from_value(raw);

    // NaN fails every comparison, so test it explicitly.
    if quantity.is_nan() || quantity < product.minimum_quantity {
        return Err(ValidationError::QuantityBelowMinimum {
            product: product.display_name.clone(),
            minimum: product.minimum_quantity,
        });
    }

    Ok(quantity)
}

/// Run every rule against a request
pub fn validate_order(
    catalog: &ProductCatalog,
    request: &OrderRequest,
) -> Result<ValidatedOrder, ValidationError> {
    let (name, address, phone, product_key) = require_fields(request)?;
    let product = resolve_product(catalog, &product_key)?;
    let quantity = check_quantity(product, request.quantity.as_ref())?;

    Ok(ValidatedOrder {
        name,
        address,
        phone,
        product: product.clone(),
        product_key,
        quantity,
        notes: filled_text(request.notes.as_ref()),
    })
}
