use super::{EmailMessage, EmailProvider, ProviderError};

/// Logs the notification instead of delivering it. Used for local development.
#[derive(Debug, Clone, Default)]
pub struct LogProvider;

#[async_trait::async_trait]
impl EmailProvider for LogProvider {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, email: &EmailMessage) -> Result<String, ProviderError> {
        let id = format!("log-{}", uuid::Uuid::new_v4());

        tracing::info!(
            id = %id,
            to = %email.to,
            reply_to = %email.reply_to,
            subject = %email.subject,
            "Email delivery skipped (log provider)"
        );
        tracing::debug!(body = %email.text);

        Ok(id)
    }
}
