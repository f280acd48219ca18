//! Core order intake logic: request decoding, validation, numbering and errors

pub mod error;
pub mod order;
pub mod response;
pub mod validation;

pub use error::{GENERIC_FAILURE_MESSAGE, OrderError, ValidationError};
pub use order::{OrderRecord, OrderRequest};
pub use response::OrderResponse;
pub use validation::{ValidatedOrder, validate_order};
