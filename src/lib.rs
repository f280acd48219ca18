//! # order-intake
//!
//! A single-endpoint order intake service built on axum.
//!
//! ## Flow
//!
//! 1. **Method gating**: `OPTIONS` answers the preflight, `POST` continues,
//!    everything else gets 405
//! 2. **Validation**: required fields, then product, then quantity; the first
//!    violated rule becomes a 400
//! 3. **Numbering**: `FP` + epoch milliseconds + random suffix, dated in UTC
//! 4. **Notification**: best effort email, bounded by a timeout, never fatal
//! 5. **Response**: `{ "success": bool, "message": string }`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use order_intake::prelude::*;
//!
//! let config = AppConfig::from_env()?;
//! ServerBuilder::from_config(&config)?
//!     .serve(&config.bind_address)
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod notify;
pub mod server;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Config ===
    pub use crate::config::{
        AppConfig, ConfigError, MailDelivery, NotificationConfig, Product, ProductCatalog,
    };

    // === Core ===
    pub use crate::core::{
        GENERIC_FAILURE_MESSAGE, OrderError, OrderRecord, OrderRequest, OrderResponse,
        ValidatedOrder, ValidationError, validate_order,
    };

    // === Notification ===
    pub use crate::notify::{
        EmailMessage, EmailNotifier, LogTransport, MailTransport, NotificationOutcome, Notifier,
        NotifyError, notify_best_effort,
    };

    // === Server ===
    pub use crate::server::{AppState, ORDER_PATH, ServerBuilder, build_router};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
}
