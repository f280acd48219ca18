//! order-intake server
//!
//! Configuration comes from the environment (a `.env` file is honoured):
//!
//! - `EMAIL_USER`, `EMAIL_PASS`: enable order notifications
//! - `EMAIL_TO`: notification recipient, defaults to `EMAIL_USER`
//! - `EMAIL_SMTP_HOST`: SMTP server, defaults to `smtp.gmail.com`
//! - `MAIL_RELAY_URL`: send through an HTTP mail relay instead of SMTP
//! - `MAIL_TRANSPORT`: force `smtp`, `relay` or `log` (log only, nothing sent)
//! - `ORDER_NOTIFY_TIMEOUT_MS`: notification timeout
//! - `ORDER_BIND_ADDR`: listen address, defaults to `0.0.0.0:3000`
//! - `ORDER_CATALOG_PATH`: YAML product catalog, defaults to the built-in one

use anyhow::Result;
use order_intake::prelude::*;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "order_intake=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    tracing::info!(
        products = config.catalog.len(),
        "Loaded product catalog: {}",
        config.catalog.keys().collect::<Vec<_>>().join(", ")
    );
    if config.notification.is_none() {
        tracing::warn!("EMAIL_USER/EMAIL_PASS not set; order notifications disabled");
    }

    ServerBuilder::from_config(&config)?
        .serve(&config.bind_address)
        .await
}
