//! Email rendering for placed orders

use super::transport::MailTransport;
use super::{Notifier, NotifyError};
use crate::config::NotificationConfig;
use crate::core::OrderRecord;
use async_trait::async_trait;
use serde::Serialize;
use tera::{Context, Tera};

const ORDER_EMAIL_TEMPLATE: &str = r#"
<h2>New Order Received</h2>
<p><strong>Order Number:</strong> {{ order.order_number }}</p>
<p><strong>Date:</strong> {{ order.date }}</p>
<hr>
<h3>Customer Information</h3>
<p><strong>Name:</strong> {{ order.name }}</p>
<p><strong>Phone:</strong> {{ order.phone }}</p>
<p><strong>Address:</strong> {{ order.address }}</p>
<hr>
<h3>Order Details</h3>
<p><strong>Product:</strong> {{ order.product }}</p>
<p><strong>Quantity:</strong> {{ quantity }}kg</p>
<p><strong>Notes:</strong> {{ order.notes }}</p>
"#;

/// A rendered email, ready for a transport
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Render the order summary email
///
/// Customer-supplied text is HTML-escaped.
pub fn render_order_email(
    order: &OrderRecord,
    from: &str,
    to: &str,
) -> Result<EmailMessage, NotifyError> {
    let mut context = Context::new();
    context.insert("order", order);
    // Display formatting keeps whole quantities free of a trailing ".0".
    context.insert("quantity", &order.quantity.to_string());

    let html = Tera::one_off(ORDER_EMAIL_TEMPLATE, &context, true)
        .map_err(|e| NotifyError::Template(e.to_string()))?;

    Ok(EmailMessage {
        from: from.to_string(),
        to: to.to_string(),
        subject: format!("New Fish Parque Order - {}", order.order_number),
        html,
    })
}

/// [`Notifier`] that emails each order through a [`MailTransport`]
pub struct EmailNotifier<T> {
    from: String,
    to: String,
    transport: T,
}

impl<T: MailTransport> EmailNotifier<T> {
    pub fn new(from: impl Into<String>, to: impl Into<String>, transport: T) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            transport,
        }
    }

    /// Sender and recipient taken from the notification config
    pub fn from_config(config: &NotificationConfig, transport: T) -> Self {
        Self::new(config.user.clone(), config.recipient.clone(), transport)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[async_trait]
impl<T: MailTransport> Notifier for EmailNotifier<T> {
    async fn notify(&self, order: &OrderRecord) -> Result<(), NotifyError> {
        let message = render_order_email(order, &self.from, &self.to)?;
        self.transport.send(&message).await
    }
}
