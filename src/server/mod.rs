//! HTTP server for the order route
//!
//! The `ServerBuilder` assembles:
//! - the order route with method gating
//! - health check routes
//! - CORS headers, panic recovery and request tracing

pub mod builder;
pub mod cors;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::{AppState, order_handler, place_order};
pub use router::{ORDER_PATH, build_router};
