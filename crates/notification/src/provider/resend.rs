//! Resend HTTP API provider

use serde::{Deserialize, Serialize};

use super::{EmailMessage, EmailProvider, ProviderError};
use crate::ResendConfig;

pub struct ResendProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
    reply_to: &'a str,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: String,
}

impl ResendProvider {
    pub fn new(config: &ResendConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("agentika/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/emails", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.to_owned(),
        })
    }
}

#[async_trait::async_trait]
impl EmailProvider for ResendProvider {
    fn name(&self) -> &'static str {
        "resend"
    }

    async fn send(&self, email: &EmailMessage) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&SendEmailRequest {
                from: &email.from,
                to: [&email.to],
                subject: &email.subject,
                html: &email.html,
                text: &email.text,
                reply_to: &email.reply_to,
            })
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();

        if status.is_success() {
            let body = response
                .json::<SendEmailResponse>()
                .await
                .map_err(|e| ProviderError::Transport(e.to_string()))?;

            return Ok(body.id);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.message)
            .unwrap_or_else(|_| format!("provider answered {status}"));

        tracing::warn!(status = %status, message = %message, "Resend rejected email");

        Err(ProviderError::Rejected(message))
    }
}
