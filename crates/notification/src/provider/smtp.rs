//! SMTP provider using lettre

use std::time::Duration;

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};

use super::{EmailMessage, EmailProvider, ProviderError};
use crate::SmtpConfig;

pub struct SmtpProvider {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpProvider {
    pub fn new(config: &SmtpConfig, timeout: Duration) -> anyhow::Result<Self> {
        let mailer = if config.username.is_empty() || config.password.is_empty() {
            tracing::info!(
                smtp_host = %config.host,
                smtp_port = config.port,
                "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
            );
            // Use builder_dangerous for unauthenticated SMTP (e.g., MailDev)
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                .port(config.port)
                .timeout(Some(timeout))
                .build()
        } else {
            tracing::info!(
                smtp_host = %config.host,
                smtp_port = config.port,
                tls = config.tls,
                "SMTP provider initialized with authentication"
            );

            let creds = Credentials::new(config.username.clone(), config.password.clone());
            let builder = if config.tls {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            };

            builder
                .port(config.port)
                .credentials(creds)
                .timeout(Some(timeout))
                .build()
        };

        Ok(Self { mailer })
    }
}

fn mailbox(value: &str) -> Result<Mailbox, ProviderError> {
    value
        .parse()
        .map_err(|e| ProviderError::Rejected(format!("invalid address {value}: {e}")))
}

#[async_trait::async_trait]
impl EmailProvider for SmtpProvider {
    fn name(&self) -> &'static str {
        "smtp"
    }

    async fn send(&self, email: &EmailMessage) -> Result<String, ProviderError> {
        let from = mailbox(&email.from)?;
        let message_id = format!("<{}@{}>", uuid::Uuid::new_v4(), from.email.domain());

        let message = Message::builder()
            .message_id(Some(message_id.clone()))
            .from(from)
            .reply_to(mailbox(&email.reply_to)?)
            .to(mailbox(&email.to)?)
            .subject(&email.subject)
            .multipart(MultiPart::alternative_plain_html(
                email.text.clone(),
                email.html.clone(),
            ))
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        match self.mailer.send(message).await {
            Ok(_) => Ok(message_id),
            Err(e) if e.is_permanent() => Err(ProviderError::Rejected(e.to_string())),
            Err(e) => Err(ProviderError::Transport(e.to_string())),
        }
    }
}
