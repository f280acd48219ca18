//! ServerBuilder for fluent API to build the order intake server

use super::handlers::AppState;
use super::router::build_router;
use crate::config::{AppConfig, DEFAULT_NOTIFY_TIMEOUT, ProductCatalog};
use crate::notify::{Notifier, notifier_from_config};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Builder for the order intake server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_catalog(ProductCatalog::default())
///     .with_notifier(Arc::new(my_notifier))
///     .build()?;
/// ```
pub struct ServerBuilder {
    catalog: Option<ProductCatalog>,
    notifier: Option<Arc<dyn Notifier>>,
    notify_timeout: Duration,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            catalog: None,
            notifier: None,
            notify_timeout: DEFAULT_NOTIFY_TIMEOUT,
        }
    }

    /// Create a builder from loaded configuration
    ///
    /// Notification is wired only when credentials were configured. Fails if
    /// the configured mail transport cannot be set up.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let builder = Self::new().with_catalog(config.catalog.clone());

        Ok(match &config.notification {
            Some(notification) => builder
                .with_notifier(notifier_from_config(notification)?)
                .with_notify_timeout(notification.timeout),
            None => builder,
        })
    }

    /// Set the product catalog (defaults to [`ProductCatalog::default`])
    pub fn with_catalog(mut self, catalog: ProductCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Set the notifier used for placed orders
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Bound each notification attempt
    pub fn with_notify_timeout(mut self, timeout: Duration) -> Self {
        self.notify_timeout = timeout;
        self
    }

    /// Build the shared handler state
    ///
    /// The catalog is checked again here since it may have been deserialized
    /// directly rather than loaded through [`ProductCatalog`]'s constructors.
    pub fn build_state(self) -> Result<AppState> {
        let catalog = self.catalog.unwrap_or_default();
        catalog.check()?;

        Ok(AppState {
            catalog: Arc::new(catalog),
            notifier: self.notifier,
            notify_timeout: self.notify_timeout,
        })
    }

    /// Build the final router
    pub fn build(self) -> Result<Router> {
        Ok(build_router(self.build_state()?))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let notifications = self.notifier.is_some();
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(notifications, "Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
