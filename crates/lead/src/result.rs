use serde::{Deserialize, Serialize};

/// Outcome of one dispatch attempt.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionResult {
    Success { provider_message_id: String },
    Failure { error_message: String },
}

impl SubmissionResult {
    pub fn success(provider_message_id: impl Into<String>) -> Self {
        Self::Success {
            provider_message_id: provider_message_id.into(),
        }
    }

    pub fn failure(error_message: impl Into<String>) -> Self {
        Self::Failure {
            error_message: error_message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
