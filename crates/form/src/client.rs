use std::time::Duration;

use agentika_lead::{LeadService, LeadSubmission, SubmissionResult};
use reqwest::StatusCode;

/// Sends leads to a running server over `POST /api/leads`.
#[derive(Clone)]
pub struct HttpLeadClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpLeadClient {
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("agentika-form/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/api/leads", base_url.trim_end_matches('/')),
        })
    }

    async fn send(&self, lead: &LeadSubmission) -> reqwest::Result<SubmissionResult> {
        let response = self.client.post(&self.endpoint).json(lead).send().await?;

        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            tracing::warn!(endpoint = %self.endpoint, "Server refused lead as invalid");

            return Ok(SubmissionResult::failure(crate::UNEXPECTED_MESSAGE));
        }

        response.error_for_status()?.json().await
    }
}

#[async_trait::async_trait]
impl LeadService for HttpLeadClient {
    async fn submit(&self, lead: LeadSubmission) -> SubmissionResult {
        match self.send(&lead).await {
            Ok(result) => result,
            Err(err) if err.is_timeout() => {
                tracing::error!(error = %err, "Lead endpoint timed out");
                SubmissionResult::failure(crate::TIMEOUT_MESSAGE)
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to reach lead endpoint");
                SubmissionResult::failure(crate::UNEXPECTED_MESSAGE)
            }
        }
    }
}
