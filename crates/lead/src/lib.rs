mod error;
mod result;
mod submission;
mod types;

use std::sync::Arc;

pub use error::*;
pub use result::*;
pub use submission::*;
pub use types::*;

/// Anything that can take a lead and report how its delivery went.
///
/// Implemented in-process by the notification service and remotely by the
/// HTTP client used by the form controller.
#[async_trait::async_trait]
pub trait LeadService: Send + Sync {
    async fn submit(&self, lead: LeadSubmission) -> SubmissionResult;
}

#[async_trait::async_trait]
impl<T: LeadService + ?Sized> LeadService for Arc<T> {
    async fn submit(&self, lead: LeadSubmission) -> SubmissionResult {
        (**self).submit(lead).await
    }
}
