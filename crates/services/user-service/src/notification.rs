//! User notifications over the user's preferred channel.

use std::sync::Arc;

use async_trait::async_trait;
use common::{AppError, AppResult};
use domain::NotificationPreference;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// What a notification is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationAction {
    /// Invitation carrying the account completion link
    AccountInvite { link: String },
    AccountDeleted,
}

impl NotificationAction {
    pub fn subject(&self) -> &'static str {
        match self {
            NotificationAction::AccountInvite { .. } => "You are invited to the pharmacy platform",
            NotificationAction::AccountDeleted => "Your account was deleted",
        }
    }

    pub fn body(&self, recipient: &str) -> String {
        match self {
            NotificationAction::AccountInvite { link } => format!(
                "Hello {},\n\nComplete your account by following this link:\n{}\n",
                recipient, link
            ),
            NotificationAction::AccountDeleted => format!(
                "Hello {},\n\nYour pharmacy platform account has been deleted by an administrator.\n",
                recipient
            ),
        }
    }
}

/// A delivery channel.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `action` to `to` (an e-mail address or phone number).
    async fn send(&self, to: &str, action: &NotificationAction) -> AppResult<()>;
}

/// E-mail notifier. Without an SMTP relay the message is only logged.
#[derive(Clone)]
pub struct EmailNotifier {
    mailer: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
}

impl EmailNotifier {
    pub fn new(config: &SmtpConfig) -> AppResult<Self> {
        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|e| AppError::internal(format!("Invalid SMTP_FROM {}: {}", config.from, e)))?;

        let mailer = match &config.host {
            Some(host) => {
                let mut builder = if config.tls {
                    AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                        .map_err(|e| AppError::internal(format!("Invalid SMTP relay {}: {}", host, e)))?
                } else {
                    AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
                };
                builder = builder.port(config.port);
                if let Some(user) = &config.user {
                    let pass = config.pass.clone().unwrap_or_default();
                    builder = builder.credentials(Credentials::new(user.clone(), pass));
                }
                tracing::info!(host = %host, port = config.port, tls = config.tls, "SMTP relay configured");
                Some(builder.build())
            }
            None => None,
        };

        Ok(Self { mailer, from })
    }

    fn message(&self, to: &str, action: &NotificationAction) -> AppResult<Message> {
        let recipient = to
            .parse::<Mailbox>()
            .map_err(|_| AppError::validation(format!("Invalid e-mail address {}", to)))?;

        Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(action.subject())
            .header(ContentType::TEXT_PLAIN)
            .body(action.body(to))
            .map_err(|e| AppError::internal(format!("Cannot build e-mail: {}", e)))
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn send(&self, to: &str, action: &NotificationAction) -> AppResult<()> {
        let Some(mailer) = &self.mailer else {
            tracing::info!(
                to,
                subject = action.subject(),
                "SMTP not configured, e-mail not sent:\n{}",
                action.body(to)
            );
            return Ok(());
        };

        let message = self.message(to, action)?;
        mailer.send(message).await.map_err(|e| {
            tracing::warn!(to, "SMTP delivery failed: {}", e);
            AppError::service_unavailable("smtp")
        })?;

        tracing::info!(to, subject = action.subject(), "E-mail sent");
        Ok(())
    }
}

/// SMS notifier. No gateway is integrated, messages are logged.
#[derive(Debug, Clone, Default)]
pub struct SmsNotifier;

#[async_trait]
impl Notifier for SmsNotifier {
    async fn send(&self, to: &str, action: &NotificationAction) -> AppResult<()> {
        tracing::info!(to, subject = action.subject(), "SMS: {}", action.body(to));
        Ok(())
    }
}

/// One notifier per channel.
#[derive(Clone)]
pub struct Notifications {
    email: Arc<dyn Notifier>,
    sms: Arc<dyn Notifier>,
}

impl Notifications {
    pub fn new(email: Arc<dyn Notifier>, sms: Arc<dyn Notifier>) -> Self {
        Self { email, sms }
    }

    pub fn email(&self) -> &Arc<dyn Notifier> {
        &self.email
    }

    pub fn channel(&self, preference: NotificationPreference) -> &Arc<dyn Notifier> {
        match preference {
            NotificationPreference::Email => &self.email,
            NotificationPreference::Sms => &self.sms,
        }
    }
}
