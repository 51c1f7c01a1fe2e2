//! Form controller talking to a running server over HTTP

mod common;

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use agentika::AppState;
use agentika_form::{Field, FormState, FormTimings, HttpLeadClient, LeadForm, SubmitOutcome};
use agentika_notification::{EmailMessage, EmailProvider, LeadNotifier, ProviderError};
use common::test_config;

struct RecordingProvider {
    reject_with: Option<&'static str>,
    sent: Mutex<Vec<EmailMessage>>,
}

#[async_trait::async_trait]
impl EmailProvider for RecordingProvider {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, email: &EmailMessage) -> Result<String, ProviderError> {
        self.sent.lock().unwrap().push(email.clone());

        match self.reject_with {
            Some(message) => Err(ProviderError::Rejected(message.to_owned())),
            None => Ok("re_e2e".to_owned()),
        }
    }
}

async fn spawn_server(provider: Arc<RecordingProvider>) -> anyhow::Result<String> {
    let config = test_config();
    let notifier = LeadNotifier::new(provider, &config.notification);
    let app = agentika::router(AppState {
        config,
        leads: Arc::new(notifier),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    Ok(format!("http://{addr}"))
}

fn form(base_url: &str) -> anyhow::Result<LeadForm> {
    let client = HttpLeadClient::new(base_url, Duration::from_secs(5))?;
    let form = LeadForm::new(client, FormTimings::default());

    form.set_field(Field::Name, "Ana Martín");
    form.set_field(Field::Email, "ana@example.com");
    form.set_field(Field::Company, "GrowthLab");
    form.set_field(Field::Processes, "Lead follow-up\nReport generation");

    Ok(form)
}

#[tokio::test]
async fn test_submitted_lead_reaches_provider() -> anyhow::Result<()> {
    let provider = Arc::new(RecordingProvider {
        reject_with: None,
        sent: Mutex::new(Vec::new()),
    });
    let base_url = spawn_server(provider.clone()).await?;
    let form = form(&base_url)?;

    let outcome = form.submit().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Submitted {
            provider_message_id: "re_e2e".to_owned()
        }
    );
    assert_eq!(form.state(), FormState::Submitted);

    let sent = provider.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "New lead: Ana Martín from GrowthLab");
    assert_eq!(sent[0].reply_to, "ana@example.com");
    assert_eq!(sent[0].to, agentika_notification::DEFAULT_RECIPIENT);
    assert!(sent[0].text.contains("Role: not specified"));

    Ok(())
}

#[tokio::test]
async fn test_rejected_lead_keeps_fields() -> anyhow::Result<()> {
    let provider = Arc::new(RecordingProvider {
        reject_with: Some("invalid API key"),
        sent: Mutex::new(Vec::new()),
    });
    let base_url = spawn_server(provider.clone()).await?;
    let form = form(&base_url)?;
    let before = form.fields();

    let outcome = form.submit().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Failed {
            message: "invalid API key".to_owned()
        }
    );
    assert_eq!(
        form.state(),
        FormState::Error {
            message: "invalid API key".to_owned()
        }
    );
    assert_eq!(form.fields(), before);
    assert_eq!(provider.sent.lock().unwrap().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_unreachable_server_is_a_generic_failure() -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let form = form(&format!("http://{addr}"))?;

    assert_eq!(
        form.submit().await,
        SubmitOutcome::Failed {
            message: agentika_form::UNEXPECTED_MESSAGE.to_owned()
        }
    );

    Ok(())
}
