//! Configuration loading and management
//!
//! - [`ProductCatalog`]: the static product table, optionally loaded from YAML
//! - [`NotificationConfig`]: mail credentials and delivery; present only when
//!   both `EMAIL_USER` and `EMAIL_PASS` are set
//! - [`AppConfig`]: everything the binary needs to start serving

pub mod catalog;

pub use catalog::{Product, ProductCatalog};

use std::time::Duration;
use thiserror::Error;

/// Default notification timeout
pub const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Default address the server binds to
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// SMTP server used when `EMAIL_SMTP_HOST` is not set
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse catalog from {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    #[error("Product catalog must contain at least one product")]
    EmptyCatalog,

    #[error("Invalid product '{key}': {reason}")]
    InvalidProduct { key: String, reason: String },

    #[error("Invalid value for {variable}: {message}")]
    InvalidVariable { variable: String, message: String },
}

/// How notification emails leave the process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailDelivery {
    /// SMTP submission (implicit TLS) authenticated with the sender credentials
    Smtp { host: String },

    /// JSON POST to an HTTP mail relay
    Relay { url: String },

    /// Write the message to the log; nothing is sent
    Log,
}

impl MailDelivery {
    /// Resolve the delivery mode from the environment
    ///
    /// `MAIL_TRANSPORT` picks a mode explicitly (`smtp`, `relay` or `log`).
    /// Otherwise a `MAIL_RELAY_URL` selects the relay and everything else
    /// goes through SMTP.
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let smtp = || MailDelivery::Smtp {
            host: non_empty("EMAIL_SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
        };

        match non_empty("MAIL_TRANSPORT").map(|m| m.to_ascii_lowercase()).as_deref() {
            Some("log") => Ok(MailDelivery::Log),
            Some("smtp") => Ok(smtp()),
            Some("relay") => match non_empty("MAIL_RELAY_URL") {
                Some(url) => Ok(MailDelivery::Relay { url }),
                None => Err(ConfigError::InvalidVariable {
                    variable: "MAIL_RELAY_URL".to_string(),
                    message: "required when MAIL_TRANSPORT=relay".to_string(),
                }),
            },
            Some(other) => Err(ConfigError::InvalidVariable {
                variable: "MAIL_TRANSPORT".to_string(),
                message: format!("expected smtp, relay or log, got '{}'", other),
            }),
            None => Ok(match non_empty("MAIL_RELAY_URL") {
                Some(url) => MailDelivery::Relay { url },
                None => smtp(),
            }),
        }
    }
}

/// Credentials and addressing for order notifications
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationConfig {
    /// Sender identity (also the login for the mail service)
    pub user: String,

    /// Secret paired with `user`
    pub password: String,

    /// Recipient; falls back to `user` when not configured
    pub recipient: String,

    /// Transport used to deliver the email
    pub delivery: MailDelivery,

    /// Upper bound on a single notification attempt
    pub timeout: Duration,
}

impl NotificationConfig {
    /// Read notification settings from the process environment
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read notification settings through an arbitrary lookup
    ///
    /// Returns `Ok(None)` when either credential is missing or empty, which
    /// disables notification entirely.
    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let (Some(user), Some(password)) = (non_empty("EMAIL_USER"), non_empty("EMAIL_PASS"))
        else {
            return Ok(None);
        };

        let recipient = non_empty("EMAIL_TO").unwrap_or_else(|| user.clone());
        let timeout = match non_empty("ORDER_NOTIFY_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidVariable {
                    variable: "ORDER_NOTIFY_TIMEOUT_MS".to_string(),
                    message: e.to_string(),
                }
            })?),
            None => DEFAULT_NOTIFY_TIMEOUT,
        };

        Ok(Some(Self {
            user,
            password,
            recipient,
            delivery: MailDelivery::from_lookup(&lookup)?,
            timeout,
        }))
    }
}

/// Top-level configuration for the binary
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub catalog: ProductCatalog,
    pub notification: Option<NotificationConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let catalog = match lookup("ORDER_CATALOG_PATH").filter(|p| !p.is_empty()) {
            Some(path) => ProductCatalog::from_yaml_file(&path)?,
            None => ProductCatalog::default(),
        };

        Ok(Self {
            bind_address: lookup("ORDER_BIND_ADDR")
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            catalog,
            notification: NotificationConfig::from_lookup(&lookup)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_notification_disabled_without_credentials() {
        assert_eq!(NotificationConfig::from_lookup(env(&[])).unwrap(), None);
        assert_eq!(
            NotificationConfig::from_lookup(env(&[("EMAIL_USER", "shop@example.com")])).unwrap(),
            None
        );
        assert_eq!(
            NotificationConfig::from_lookup(env(&[("EMAIL_PASS", "secret")])).unwrap(),
            None
        );
    }

    #[test]
    fn test_empty_credential_counts_as_missing() {
        let lookup = env(&[("EMAIL_USER", ""), ("EMAIL_PASS", "secret")]);
        assert_eq!(NotificationConfig::from_lookup(lookup).unwrap(), None);
    }

    #[test]
    fn test_recipient_falls_back_to_sender() {
        let lookup = env(&[("EMAIL_USER", "shop@example.com"), ("EMAIL_PASS", "secret")]);
        let config = NotificationConfig::from_lookup(lookup).unwrap().unwrap();

        assert_eq!(config.recipient, "shop@example.com");
        assert_eq!(config.timeout, DEFAULT_NOTIFY_TIMEOUT);
    }

    #[test]
    fn test_explicit_recipient_and_timeout() {
        let lookup = env(&[
            ("EMAIL_USER", "shop@example.com"),
            ("EMAIL_PASS", "secret"),
            ("EMAIL_TO", "orders@example.com"),
            ("ORDER_NOTIFY_TIMEOUT_MS", "2500"),
            ("MAIL_RELAY_URL", "https://relay.example.com/send"),
        ]);
        let config = NotificationConfig::from_lookup(lookup).unwrap().unwrap();

        assert_eq!(config.recipient, "orders@example.com");
        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert_eq!(
            config.delivery,
            MailDelivery::Relay {
                url: "https://relay.example.com/send".to_string()
            }
        );
    }

    #[test]
    fn test_credentials_alone_select_smtp() {
        let lookup = env(&[("EMAIL_USER", "shop@example.com"), ("EMAIL_PASS", "secret")]);
        let config = NotificationConfig::from_lookup(lookup).unwrap().unwrap();

        assert_eq!(
            config.delivery,
            MailDelivery::Smtp {
                host: DEFAULT_SMTP_HOST.to_string()
            }
        );
    }

    #[test]
    fn test_smtp_host_override() {
        let lookup = env(&[
            ("EMAIL_USER", "shop@example.com"),
            ("EMAIL_PASS", "secret"),
            ("EMAIL_SMTP_HOST", "mail.example.com"),
        ]);
        let config = NotificationConfig::from_lookup(lookup).unwrap().unwrap();

        assert_eq!(
            config.delivery,
            MailDelivery::Smtp {
                host: "mail.example.com".to_string()
            }
        );
    }

    #[test]
    fn test_log_delivery_is_opt_in() {
        let lookup = env(&[
            ("EMAIL_USER", "shop@example.com"),
            ("EMAIL_PASS", "secret"),
            ("MAIL_TRANSPORT", "log"),
            ("MAIL_RELAY_URL", "https://relay.example.com/send"),
        ]);
        let config = NotificationConfig::from_lookup(lookup).unwrap().unwrap();

        assert_eq!(config.delivery, MailDelivery::Log);
    }

    #[test]
    fn test_explicit_smtp_wins_over_relay_url() {
        let lookup = env(&[
            ("EMAIL_USER", "shop@example.com"),
            ("EMAIL_PASS", "secret"),
            ("MAIL_TRANSPORT", "SMTP"),
            ("MAIL_RELAY_URL", "https://relay.example.com/send"),
        ]);
        let config = NotificationConfig::from_lookup(lookup).unwrap().unwrap();

        assert!(matches!(config.delivery, MailDelivery::Smtp { .. }));
    }

    #[test]
    fn test_bad_transport_settings_are_rejected() {
        let relay_without_url = env(&[
            ("EMAIL_USER", "shop@example.com"),
            ("EMAIL_PASS", "secret"),
            ("MAIL_TRANSPORT", "relay"),
        ]);
        assert!(matches!(
            NotificationConfig::from_lookup(relay_without_url),
            Err(ConfigError::InvalidVariable { variable, .. }) if variable == "MAIL_RELAY_URL"
        ));

        let unknown = env(&[
            ("EMAIL_USER", "shop@example.com"),
            ("EMAIL_PASS", "secret"),
            ("MAIL_TRANSPORT", "pigeon"),
        ]);
        assert!(matches!(
            NotificationConfig::from_lookup(unknown),
            Err(ConfigError::InvalidVariable { variable, .. }) if variable == "MAIL_TRANSPORT"
        ));
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let lookup = env(&[
            ("EMAIL_USER", "shop@example.com"),
            ("EMAIL_PASS", "secret"),
            ("ORDER_NOTIFY_TIMEOUT_MS", "soon"),
        ]);
        assert!(matches!(
            NotificationConfig::from_lookup(lookup),
            Err(ConfigError::InvalidVariable { .. })
        ));
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::from_lookup(env(&[])).unwrap();

        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.catalog, ProductCatalog::default());
        assert!(config.notification.is_none());
    }

    #[test]
    fn test_app_config_missing_catalog_file_fails() {
        let lookup = env(&[("ORDER_CATALOG_PATH", "/nowhere/catalog.yaml")]);
        assert!(matches!(
            AppConfig::from_lookup(lookup),
            Err(ConfigError::Io { .. })
        ));
    }
}
