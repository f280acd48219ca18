//! Order notifications
//!
//! A [`Notifier`] is told about every placed order. Delivery is best effort:
//! [`notify_best_effort`] bounds the attempt with a timeout, logs any failure
//! and never lets it reach the caller.

pub mod email;
pub mod transport;

pub use email::{EmailMessage, EmailNotifier, render_order_email};
pub use transport::{LogTransport, MailTransport};
#[cfg(feature = "relay")]
pub use transport::HttpRelayTransport;
#[cfg(feature = "smtp")]
pub use transport::{SmtpTransport, smtp_message};

use crate::config::{MailDelivery, NotificationConfig};
use crate::core::OrderRecord;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while sending a notification
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The message body could not be rendered
    #[error("Failed to render notification: {0}")]
    Template(String),

    /// The transport could not deliver the message
    #[error("Mail transport error: {0}")]
    Transport(String),

    /// The remote service refused the message
    #[error("Mail rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The attempt exceeded its time budget
    #[error("Notification timed out after {0:?}")]
    Timeout(Duration),
}

/// Receives placed orders
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send a notification for one order
    async fn notify(&self, order: &OrderRecord) -> Result<(), NotifyError>;
}

/// Outcome of a best-effort notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationOutcome {
    Sent,
    Failed,
    TimedOut,
}

/// Attempt a notification without letting it fail the order
///
/// Failures and timeouts are logged at error level and reported through the
/// returned outcome only.
pub async fn notify_best_effort(
    notifier: &dyn Notifier,
    order: &OrderRecord,
    timeout: Duration,
) -> NotificationOutcome {
    match tokio::time::timeout(timeout, notifier.notify(order)).await {
        Ok(Ok(())) => {
            tracing::debug!(order_number = %order.order_number, "Order notification sent");
            NotificationOutcome::Sent
        }
        Ok(Err(e)) => {
            tracing::error!(order_number = %order.order_number, error = %e, "Email error");
            NotificationOutcome::Failed
        }
        Err(_) => {
            let e = NotifyError::Timeout(timeout);
            tracing::error!(order_number = %order.order_number, error = %e, "Email error");
            NotificationOutcome::TimedOut
        }
    }
}

/// Build the transport selected by [`MailDelivery`]
///
/// A delivery whose feature is compiled out falls back to [`LogTransport`]
/// with a warning.
pub fn transport_from_config(
    config: &NotificationConfig,
) -> Result<Box<dyn MailTransport>, NotifyError> {
    match &config.delivery {
        #[cfg(feature = "smtp")]
        MailDelivery::Smtp { host } => Ok(Box::new(SmtpTransport::relay(
            host.as_str(),
            config.user.as_str(),
            config.password.as_str(),
        )?)),
        #[cfg(feature = "relay")]
        MailDelivery::Relay { url } => Ok(Box::new(HttpRelayTransport::new(
            url.as_str(),
            config.user.as_str(),
            config.password.as_str(),
        ))),
        MailDelivery::Log => Ok(Box::new(LogTransport)),
        #[allow(unreachable_patterns)]
        other => {
            tracing::warn!(
                delivery = ?other,
                "Mail transport not compiled in; order notifications are logged only"
            );
            Ok(Box::new(LogTransport))
        }
    }
}

/// Build the email notifier described by the configuration
pub fn notifier_from_config(config: &NotificationConfig) -> Result<Arc<dyn Notifier>, NotifyError> {
    let transport = transport_from_config(config)?;
    tracing::info!(
        transport = transport.name(),
        recipient = %config.recipient,
        "Order notifications enabled"
    );
    Ok(Arc::new(EmailNotifier::from_config(config, transport)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn record() -> OrderRecord {
        OrderRecord {
            order_number: "FP1700000000000042".to_string(),
            date: "2024-01-05 07:08:09".to_string(),
            name: "Ana".to_string(),
            phone: "555-0101".to_string(),
            address: "12 River Rd".to_string(),
            product: "Catfish".to_string(),
            quantity: 3.0,
            notes: "None".to_string(),
        }
    }

    struct CountingNotifier {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Notifier for CountingNotifier {
        async fn notify(&self, _order: &OrderRecord) -> Result<(), NotifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn notify(&self, _order: &OrderRecord) -> Result<(), NotifyError> {
            Err(NotifyError::Transport("connection refused".to_string()))
        }
    }

    struct StalledNotifier;

    #[async_trait]
    impl Notifier for StalledNotifier {
        async fn notify(&self, _order: &OrderRecord) -> Result<(), NotifyError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_sent() {
        let notifier = CountingNotifier {
            calls: AtomicUsize::new(0),
        };
        let outcome = notify_best_effort(&notifier, &record(), Duration::from_secs(1)).await;

        assert_eq!(outcome, NotificationOutcome::Sent);
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_is_contained() {
        let outcome = notify_best_effort(&FailingNotifier, &record(), Duration::from_secs(1)).await;
        assert_eq!(outcome, NotificationOutcome::Failed);
    }

    #[tokio::test]
    async fn test_timeout_is_contained() {
        let outcome =
            notify_best_effort(&StalledNotifier, &record(), Duration::from_millis(50)).await;
        assert_eq!(outcome, NotificationOutcome::TimedOut);
    }

    fn config(delivery: MailDelivery) -> NotificationConfig {
        NotificationConfig {
            user: "shop@example.com".to_string(),
            password: "app-password".to_string(),
            recipient: "orders@example.com".to_string(),
            delivery,
            timeout: Duration::from_secs(1),
        }
    }

    #[cfg(feature = "smtp")]
    #[tokio::test]
    async fn test_credentials_only_use_smtp() {
        let lookup = |name: &str| match name {
            "EMAIL_USER" => Some("shop@example.com".to_string()),
            "EMAIL_PASS" => Some("app-password".to_string()),
            _ => None,
        };
        let config = NotificationConfig::from_lookup(lookup).unwrap().unwrap();

        let transport = transport_from_config(&config).unwrap();
        assert_eq!(transport.name(), "smtp");
    }

    #[cfg(feature = "relay")]
    #[test]
    fn test_relay_url_uses_relay() {
        let transport = transport_from_config(&config(MailDelivery::Relay {
            url: "http://127.0.0.1:1/send".to_string(),
        }))
        .unwrap();
        assert_eq!(transport.name(), "relay");
    }

    #[test]
    fn test_log_delivery_uses_log_transport() {
        let transport = transport_from_config(&config(MailDelivery::Log)).unwrap();
        assert_eq!(transport.name(), "log");
        assert!(notifier_from_config(&config(MailDelivery::Log)).is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            NotifyError::Rejected {
                status: 401,
                message: "bad credentials".to_string()
            }
            .to_string(),
            "Mail rejected with status 401: bad credentials"
        );
        assert!(
            NotifyError::Timeout(Duration::from_millis(50))
                .to_string()
                .contains("50ms")
        );
    }
}
