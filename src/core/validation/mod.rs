//! Validation of incoming orders
//!
//! Business rules live in [`validators`]; [`number`] holds the lenient
//! quantity parser they rely on.

pub mod number;
pub mod validators;

pub use number::{parse_float, quantity_from_value};
pub use validators::{ValidatedOrder, filled_text, validate_order};
