//! Delivery of emails through an authenticated SMTP relay.
//!
//! The [`MailTransport`] trait is the seam the rest of the application sends
//! emails through. [`SmtpEmailClient`] is the production implementation backed
//! by lettre; tests substitute their own recording transports.

use crate::configuration::EmailClientSettings;
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use once_cell::sync::OnceCell;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;
use uuid::Uuid;

/// An HTML email ready to be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html_body: String,
}

/// The mail relay can't be used because required settings are missing.
#[derive(thiserror::Error)]
pub enum ConfigurationError {
    #[error("No sender address is configured for the mail relay")]
    MissingSender,
    #[error("No credential is configured for the mail relay")]
    MissingPassword,
}

/// A single delivery attempt failed.
#[derive(thiserror::Error)]
pub enum DeliveryError {
    #[error("Mail delivery is not configured")]
    NotConfigured(#[from] ConfigurationError),
    #[error("`{address}` is not a valid email address")]
    InvalidAddress {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },
    #[error("Failed to build the email message")]
    Message(#[from] lettre::error::Error),
    #[error("The mail relay failed to deliver the email")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("Delivery did not complete within {0:?}")]
    Timeout(Duration),
}

/// Capability to deliver emails.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Check that everything needed to deliver emails is configured, without
    /// touching the network.
    fn check_configuration(&self) -> Result<(), ConfigurationError>;

    /// Deliver `email` and return the `Message-ID` it was sent with.
    async fn send_email(&self, email: &EmailMessage) -> Result<String, DeliveryError>;
}

/// Sends emails through an SMTP relay.
///
/// The underlying lettre transport is created on the first delivery and then
/// reused for the lifetime of the client. The application creates one client
/// and shares it, so there is a single transport per process.
pub struct SmtpEmailClient {
    settings: EmailClientSettings,
    transport: OnceCell<AsyncSmtpTransport<Tokio1Executor>>,
}

impl SmtpEmailClient {
    pub fn new(settings: EmailClientSettings) -> Self {
        Self {
            settings,
            transport: OnceCell::new(),
        }
    }

    /// Sender address and relay credential. Blank values count as missing.
    fn credentials(&self) -> Result<(&str, &Secret<String>), ConfigurationError> {
        let sender = self
            .settings
            .sender
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigurationError::MissingSender)?;
        let password = self
            .settings
            .password
            .as_ref()
            .filter(|p| !p.expose_secret().is_empty())
            .ok_or(ConfigurationError::MissingPassword)?;

        Ok((sender, password))
    }

    /// Get the shared transport, building it on first use.
    fn transport(&self) -> Result<&AsyncSmtpTransport<Tokio1Executor>, DeliveryError> {
        let (sender, password) = self.credentials()?;

        self.transport
            .get_or_try_init(|| -> Result<_, DeliveryError> {
                tracing::info!(
                    host = %self.settings.host,
                    port = self.settings.port,
                    require_tls = self.settings.require_tls,
                    "Creating mail relay transport"
                );
                let builder = if self.settings.require_tls {
                    AsyncSmtpTransport::<Tokio1Executor>::relay(&self.settings.host)?
                } else {
                    // Plain connection, only meant for local capture servers.
                    AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.settings.host)
                };

                Ok(builder
                    .port(self.settings.port)
                    .credentials(Credentials::new(
                        sender.to_string(),
                        password.expose_secret().clone(),
                    ))
                    .timeout(Some(self.settings.timeout()))
                    .build())
            })
    }

    fn sender_mailbox(&self, sender: &str) -> Result<Mailbox, DeliveryError> {
        let address = parse_address(sender)?;
        Ok(Mailbox::new(self.settings.sender_name.clone(), address))
    }
}

impl std::fmt::Debug for SmtpEmailClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpEmailClient")
            .field("settings", &self.settings)
            .field("connected", &self.transport.get().is_some())
            .finish()
    }
}

#[async_trait]
impl MailTransport for SmtpEmailClient {
    fn check_configuration(&self) -> Result<(), ConfigurationError> {
        self.credentials().map(|_| ())
    }

    #[tracing::instrument(
        name = "Send email through the mail relay",
        skip(self, email),
        fields(recipient = %email.to, subject = %email.subject)
    )]
    async fn send_email(&self, email: &EmailMessage) -> Result<String, DeliveryError> {
        let transport = self.transport()?;
        let (sender, _) = self.credentials()?;

        let from = self.sender_mailbox(sender)?;
        let message_id = format!("<{}@{}>", Uuid::new_v4(), from.email.domain());

        let mut builder = Message::builder()
            .from(from)
            .to(Mailbox::new(None, parse_address(&email.to)?))
            .subject(&email.subject)
            .message_id(Some(message_id.clone()));
        if let Some(reply_to) = &email.reply_to {
            builder = builder.reply_to(Mailbox::new(None, parse_address(reply_to)?));
        }
        let message = builder
            .header(ContentType::TEXT_HTML)
            .body(email.html_body.clone())?;

        transport.send(message).await?;
        tracing::debug!(message_id = %message_id, "Email accepted by the mail relay");

        Ok(message_id)
    }
}

fn parse_address(address: &str) -> Result<Address, DeliveryError> {
    address
        .trim()
        .parse()
        .map_err(|source| DeliveryError::InvalidAddress {
            address: address.to_string(),
            source,
        })
}
