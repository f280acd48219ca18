//! Mail transports
//!
//! The transport is the only part of notification that touches the network.
//!
//! - [`SmtpTransport`]: authenticated SMTP submission (`smtp` feature)
//! - [`HttpRelayTransport`]: JSON POST to a mail relay (`relay` feature)
//! - [`LogTransport`]: writes the message to the log, sends nothing

use super::NotifyError;
use super::email::EmailMessage;
use async_trait::async_trait;

/// Delivers a rendered email
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Short label for logs
    fn name(&self) -> &'static str;

    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError>;
}

#[async_trait]
impl<T: MailTransport + ?Sized> MailTransport for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        (**self).send(message).await
    }
}

/// Transport that only logs the message
#[derive(Debug, Clone, Default)]
pub struct LogTransport;

#[async_trait]
impl MailTransport for LogTransport {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            "Order notification logged only, nothing sent"
        );
        Ok(())
    }
}

/// Transport that posts messages as JSON to an HTTP mail relay
///
/// The sender credentials go in a basic auth header. Any non-2xx answer
/// counts as a rejection.
#[cfg(feature = "relay")]
pub struct HttpRelayTransport {
    client: reqwest::Client,
    endpoint: String,
    user: String,
    password: String,
}

#[cfg(feature = "relay")]
impl HttpRelayTransport {
    pub fn new(
        endpoint: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            user: user.into(),
            password: password.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(feature = "relay")]
#[async_trait]
impl MailTransport for HttpRelayTransport {
    fn name(&self) -> &'static str {
        "relay"
    }

    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.user, Some(&self.password))
            .json(message)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(NotifyError::Rejected {
            status: status.as_u16(),
            message: body,
        })
    }
}

/// Transport that submits messages over SMTP with implicit TLS
///
/// Authenticates with the sender credentials, the way a Gmail app password
/// is used.
#[cfg(feature = "smtp")]
pub struct SmtpTransport {
    mailer: lettre::AsyncSmtpTransport<lettre::Tokio1Executor>,
    host: String,
}

#[cfg(feature = "smtp")]
impl SmtpTransport {
    /// Build a transport for `host` on the submissions port (465)
    ///
    /// No connection is opened until the first message is sent.
    pub fn relay(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        use lettre::transport::smtp::authentication::Credentials;

        let host = host.into();
        let mailer = lettre::AsyncSmtpTransport::<lettre::Tokio1Executor>::relay(&host)
            .map_err(|e| NotifyError::Transport(format!("SMTP setup for {}: {}", host, e)))?
            .credentials(Credentials::new(user.into(), password.into()))
            .build();

        Ok(Self { mailer, host })
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

/// Convert a rendered email into an HTML MIME message
#[cfg(feature = "smtp")]
pub fn smtp_message(message: &EmailMessage) -> Result<lettre::Message, NotifyError> {
    use lettre::message::{Mailbox, header::ContentType};

    let parse = |address: &str| {
        address.parse::<Mailbox>().map_err(|e| {
            NotifyError::Transport(format!("invalid address '{}': {}", address, e))
        })
    };

    lettre::Message::builder()
        .from(parse(&message.from)?)
        .to(parse(&message.to)?)
        .subject(message.subject.as_str())
        .header(ContentType::TEXT_HTML)
        .body(message.html.clone())
        .map_err(|e| NotifyError::Transport(e.to_string()))
}

#[cfg(feature = "smtp")]
#[async_trait]
impl MailTransport for SmtpTransport {
    fn name(&self) -> &'static str {
        "smtp"
    }

    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        use lettre::AsyncTransport;

        let email = smtp_message(message)?;
        self.mailer
            .send(email)
            .await
            .map_err(|e| NotifyError::Transport(format!("SMTP via {}: {}", self.host, e)))?;
        Ok(())
    }
}
