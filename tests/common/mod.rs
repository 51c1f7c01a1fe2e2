#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use agentika::{AppState, Config};
use agentika_lead::{LeadService, LeadSubmission, SubmissionResult};
use agentika_notification::{NotificationConfig, ProviderKind};
use axum::{Router, body::Body, http::Response};
use http_body_util::BodyExt;

/// Records every lead it receives and answers with a fixed result.
pub struct MockLeads {
    result: SubmissionResult,
    received: Mutex<Vec<LeadSubmission>>,
}

impl MockLeads {
    pub fn new(result: SubmissionResult) -> Arc<Self> {
        Arc::new(Self {
            result,
            received: Mutex::new(Vec::new()),
        })
    }

    pub fn received(&self) -> Vec<LeadSubmission> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LeadService for MockLeads {
    async fn submit(&self, lead: LeadSubmission) -> SubmissionResult {
        self.received.lock().unwrap().push(lead);
        self.result.clone()
    }
}

pub fn test_config() -> Config {
    Config {
        server: agentika::config::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        notification: NotificationConfig {
            provider: ProviderKind::Log,
            ..Default::default()
        },
        logging: agentika::config::LoggingConfig::default(),
    }
}

pub fn test_app(leads: Arc<dyn LeadService>) -> Router {
    agentika::router(AppState {
        config: test_config(),
        leads,
    })
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn ana() -> LeadSubmission {
    LeadSubmission {
        name: "Ana Martín".to_owned(),
        email: "ana@example.com".to_owned(),
        company: "GrowthLab".to_owned(),
        role: None,
        employees: None,
        processes: "Lead follow-up\nReport generation".to_owned(),
        message: None,
    }
}
