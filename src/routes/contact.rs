use agentika_lead::{LeadInput, SubmissionResult};
use axum::{
    extract::{Form, State},
    response::IntoResponse,
};

use crate::{
    routes::AppState,
    template::{Template, ToastErrorTemplate, ToastSuccessTemplate},
};

pub async fn action(
    template: Template,
    State(app_state): State<AppState>,
    Form(input): Form<LeadInput>,
) -> impl IntoResponse {
    let lead = crate::try_response!(input.into_submission(), template);

    match app_state.leads.submit(lead).await {
        SubmissionResult::Success { .. } => {
            let message = rust_i18n::t!("toast.sent", locale = template.lang());
            let description = rust_i18n::t!("toast.sent_description", locale = template.lang());

            template
                .render(ToastSuccessTemplate {
                    message: &message,
                    description: Some(&description),
                })
                .into_response()
        }
        SubmissionResult::Failure { error_message } => {
            let message = rust_i18n::t!("toast.failed", locale = template.lang());

            template
                .render(ToastErrorTemplate {
                    message: &message,
                    description: Some(&error_message),
                })
                .into_response()
        }
    }
}
