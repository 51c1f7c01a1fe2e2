//! Lead notification service

use std::{panic::AssertUnwindSafe, sync::Arc, time::Duration};

use agentika_lead::{LeadService, LeadSubmission, SubmissionResult};
use futures::FutureExt;
use time::OffsetDateTime;

use crate::{
    EmailMessage, EmailProvider, NotificationConfig, ProviderError,
    template::{Template, filters},
};

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("failed to render notification: {0}")]
    Template(#[from] askama::Error),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("provider did not answer within {0:?}")]
    Timeout(Duration),
}

#[derive(askama::Template)]
#[template(path = "lead.html")]
pub struct LeadHtmlTemplate {
    pub lang: String,
    pub subject: String,
    pub name: String,
    pub email: String,
    pub company: String,
    pub role: String,
    pub employees: String,
    pub processes: Vec<String>,
    pub message: Vec<String>,
    pub year: i32,
}

#[derive(askama::Template)]
#[template(path = "lead.txt")]
pub struct LeadPlainTemplate {
    pub lang: String,
    pub name: String,
    pub email: String,
    pub company: String,
    pub role: String,
    pub employees: String,
    pub processes: String,
    pub message: String,
    pub year: i32,
}

/// Turns a lead into an email and hands it to the configured provider.
#[derive(Clone)]
pub struct LeadNotifier {
    provider: Arc<dyn EmailProvider>,
    from: String,
    recipient: String,
    locale: String,
    timeout: Duration,
}

impl LeadNotifier {
    pub fn new(provider: Arc<dyn EmailProvider>, config: &NotificationConfig) -> Self {
        Self {
            provider,
            from: config.from.to_owned(),
            recipient: config.recipient.to_owned(),
            locale: config.locale.to_owned(),
            timeout: config.timeout(),
        }
    }

    /// Create the notifier and the provider selected by configuration
    pub fn from_config(config: &NotificationConfig) -> anyhow::Result<Self> {
        let provider = crate::build_provider(config)?;

        Ok(Self::new(provider, config))
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn compose(&self, lead: &LeadSubmission) -> Result<EmailMessage, NotificationError> {
        let template = Template::new(&self.locale);
        let year = OffsetDateTime::now_utc().year();
        let not_specified = rust_i18n::t!("lead.not_specified", locale = &self.locale).to_string();

        let subject = rust_i18n::t!(
            "lead.subject",
            locale = &self.locale,
            name = lead.name.as_str(),
            company = lead.company.as_str()
        )
        .to_string();

        let role = lead.role.clone().unwrap_or_else(|| not_specified.clone());
        let employees = lead
            .employees
            .map(|b| b.to_string())
            .unwrap_or_else(|| not_specified.clone());
        let message = lead
            .message
            .clone()
            .unwrap_or_else(|| not_specified.clone());

        let html = template.render(LeadHtmlTemplate {
            lang: self.locale.to_owned(),
            subject: subject.to_owned(),
            name: lead.name.to_owned(),
            email: lead.email.to_owned(),
            company: lead.company.to_owned(),
            role: role.to_owned(),
            employees: employees.to_owned(),
            processes: lines(&lead.processes),
            message: lines(&message),
            year,
        })?;

        let text = template.render(LeadPlainTemplate {
            lang: self.locale.to_owned(),
            name: lead.name.to_owned(),
            email: lead.email.to_owned(),
            company: lead.company.to_owned(),
            role,
            employees,
            processes: lead.processes.to_owned(),
            message,
            year,
        })?;

        Ok(EmailMessage {
            from: self.from.to_owned(),
            to: self.recipient.to_owned(),
            reply_to: lead.email.to_owned(),
            subject,
            html,
            text,
        })
    }

    async fn deliver(&self, lead: &LeadSubmission) -> Result<String, NotificationError> {
        let email = self.compose(lead)?;

        tracing::info!(
            provider = self.provider.name(),
            to = %email.to,
            subject = %email.subject,
            "Sending lead notification"
        );

        match tokio::time::timeout(self.timeout, self.provider.send(&email)).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(NotificationError::Timeout(self.timeout)),
        }
    }

    /// Send one notification for `lead`.
    ///
    /// Never fails: provider rejections come back as a failure carrying the
    /// provider's message, anything else as a generic failure that is logged.
    #[tracing::instrument(skip_all, fields(company = %lead.company))]
    pub async fn notify(&self, lead: LeadSubmission) -> SubmissionResult {
        let outcome = AssertUnwindSafe(self.deliver(&lead)).catch_unwind().await;

        match outcome {
            Ok(Ok(id)) => {
                tracing::info!(provider_message_id = %id, "Lead notification sent");
                SubmissionResult::success(id)
            }
            Ok(Err(NotificationError::Provider(ProviderError::Rejected(message)))) => {
                tracing::warn!(error = %message, "Lead notification rejected by provider");
                SubmissionResult::failure(message)
            }
            Ok(Err(NotificationError::Timeout(timeout))) => {
                tracing::error!(?timeout, "Lead notification timed out");
                SubmissionResult::failure(rust_i18n::t!("error.timeout", locale = &self.locale))
            }
            Ok(Err(err)) => {
                tracing::error!(error = %err, "Unexpected error sending lead notification");
                SubmissionResult::failure(rust_i18n::t!("error.unexpected", locale = &self.locale))
            }
            Err(_) => {
                tracing::error!("Lead notification panicked");
                SubmissionResult::failure(rust_i18n::t!("error.unexpected", locale = &self.locale))
            }
        }
    }
}

#[async_trait::async_trait]
impl LeadService for LeadNotifier {
    async fn submit(&self, lead: LeadSubmission) -> SubmissionResult {
        self.notify(lead).await
    }
}

fn lines(value: &str) -> Vec<String> {
    value.lines().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use agentika_lead::EmployeeBucket;

    use super::*;
    use crate::ProviderKind;

    enum Behavior {
        Accept,
        Reject(&'static str),
        Unreachable,
        Hang,
        Panic,
    }

    struct MockProvider {
        behavior: Behavior,
        sent: Mutex<Vec<EmailMessage>>,
    }

    impl MockProvider {
        fn new(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                sent: Mutex::new(Vec::new()),
            })
        }

        fn sent(&self) -> Vec<EmailMessage> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl EmailProvider for MockProvider {
        fn name(&self) -> &'static str {
            "mock"
        }

        async fn send(&self, email: &EmailMessage) -> Result<String, ProviderError> {
            self.sent.lock().unwrap().push(email.clone());

            match self.behavior {
                Behavior::Accept => Ok("msg_1".to_owned()),
                Behavior::Reject(message) => Err(ProviderError::Rejected(message.to_owned())),
                Behavior::Unreachable => {
                    Err(ProviderError::Transport("connection refused".to_owned()))
                }
                Behavior::Hang => {
                    std::future::pending::<()>().await;
                    unreachable!()
                }
                Behavior::Panic => panic!("provider exploded"),
            }
        }
    }

    fn config() -> NotificationConfig {
        NotificationConfig {
            provider: ProviderKind::Log,
            ..Default::default()
        }
    }

    fn notifier(provider: Arc<MockProvider>) -> LeadNotifier {
        LeadNotifier::new(provider, &config())
    }

    fn lead() -> LeadSubmission {
        LeadSubmission {
            name: "Ana Martín".to_owned(),
            email: "ana@example.com".to_owned(),
            company: "GrowthLab".to_owned(),
            role: None,
            employees: Some(EmployeeBucket::Small),
            processes: "Lead follow-up\nReport generation".to_owned(),
            message: None,
        }
    }

    #[test]
    fn test_compose_scenario() {
        let email = notifier(MockProvider::new(Behavior::Accept))
            .compose(&lead())
            .unwrap();

        assert_eq!(email.subject, "New lead: Ana Martín from GrowthLab");
        assert_eq!(email.to, crate::DEFAULT_RECIPIENT);
        assert_eq!(email.from, crate::DEFAULT_SENDER);
        assert_eq!(email.reply_to, "ana@example.com");

        for body in [&email.html, &email.text] {
            assert!(body.contains("Ana Martín"));
            assert!(body.contains("ana@example.com"));
            assert!(body.contains("GrowthLab"));
            assert!(body.contains("not specified"));
            assert!(body.contains("11-50"));
        }

        assert!(email.text.contains("Role: not specified"));
        assert!(email.html.contains("<strong>Role:</strong> not specified"));

        assert!(email.html.contains("Lead follow-up<br>Report generation"));
        assert!(email.text.contains("Lead follow-up\nReport generation"));
    }

    #[test]
    fn test_compose_includes_optional_fields_when_present() {
        let mut value = lead();
        value.role = Some("Operations Director".to_owned());
        value.message = Some("We use HubSpot\nand Sheets".to_owned());
        value.employees = None;

        let email = notifier(MockProvider::new(Behavior::Accept))
            .compose(&value)
            .unwrap();

        assert!(email.text.contains("Role: Operations Director"));
        assert!(email.text.contains("Employees: not specified"));
        assert!(email.text.contains("We use HubSpot\nand Sheets"));
        assert!(email.html.contains("We use HubSpot<br>and Sheets"));
    }

    #[test]
    fn test_compose_escapes_html_only() {
        let mut value = lead();
        value.company = "Smith & <Sons>".to_owned();

        let email = notifier(MockProvider::new(Behavior::Accept))
            .compose(&value)
            .unwrap();

        assert!(email.html.contains("Smith &#38; &#60;Sons&#62;"));
        assert!(!email.html.contains("Smith & "));
        assert!(!email.html.contains("<Sons>"));
        assert!(email.text.contains("Smith & <Sons>"));
        assert_eq!(email.subject, "New lead: Ana Martín from Smith & <Sons>");
    }

    #[test]
    fn test_compose_spanish_locale() {
        let mut config = config();
        config.locale = "es".to_owned();
        let notifier = LeadNotifier::new(MockProvider::new(Behavior::Accept), &config);

        let email = notifier.compose(&lead()).unwrap();

        assert_eq!(email.subject, "Nuevo lead: Ana Martín de GrowthLab");
        assert!(email.text.contains("Cargo: no especificado"));
    }

    #[tokio::test]
    async fn test_notify_success_makes_one_call() {
        let provider = MockProvider::new(Behavior::Accept);
        let result = notifier(provider.clone()).notify(lead()).await;

        assert_eq!(result, SubmissionResult::success("msg_1"));
        assert_eq!(provider.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_notify_rejection_carries_provider_message() {
        let provider = MockProvider::new(Behavior::Reject("invalid API key"));
        let result = notifier(provider.clone()).notify(lead()).await;

        assert_eq!(result, SubmissionResult::failure("invalid API key"));
        assert_eq!(provider.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_notify_transport_error_is_generic() {
        let provider = MockProvider::new(Behavior::Unreachable);
        let result = notifier(provider.clone()).notify(lead()).await;

        assert_eq!(
            result,
            SubmissionResult::failure("An unexpected error occurred while sending the form.")
        );
        assert_eq!(provider.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_notify_panic_is_caught() {
        let provider = MockProvider::new(Behavior::Panic);
        let result = notifier(provider).notify(lead()).await;

        assert!(!result.is_success());
    }

    #[tokio::test(start_paused = true)]
    async fn test_notify_times_out() {
        let provider = MockProvider::new(Behavior::Hang);
        let result = notifier(provider.clone()).notify(lead()).await;

        assert_eq!(
            result,
            SubmissionResult::failure(
                "The email service did not answer in time. Please try again."
            )
        );
        assert_eq!(provider.sent().len(), 1);
    }
}
