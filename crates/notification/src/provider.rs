//! Outbound email delivery providers

mod log;
mod resend;
mod smtp;

use std::sync::Arc;

pub use log::LogProvider;
pub use resend::ResendProvider;
pub use smtp::SmtpProvider;

use crate::{NotificationConfig, ProviderKind};

/// A fully composed email, ready to hand to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider answered and refused the message.
    #[error("{0}")]
    Rejected(String),

    /// The provider could not be reached or answered something unreadable.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Transactional email delivery.
///
/// `send` makes exactly one delivery request and returns the provider's
/// message identifier.
#[async_trait::async_trait]
pub trait EmailProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn send(&self, email: &EmailMessage) -> Result<String, ProviderError>;
}

/// Build the provider selected by configuration.
pub fn build_provider(config: &NotificationConfig) -> anyhow::Result<Arc<dyn EmailProvider>> {
    let provider: Arc<dyn EmailProvider> = match config.provider {
        ProviderKind::Resend => Arc::new(ResendProvider::new(&config.resend)?),
        ProviderKind::Smtp => Arc::new(SmtpProvider::new(&config.smtp, config.timeout())?),
        ProviderKind::Log => Arc::new(LogProvider),
    };

    tracing::info!(provider = provider.name(), "Email provider initialized");

    Ok(provider)
}
