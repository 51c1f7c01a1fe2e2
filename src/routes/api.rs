use agentika_lead::LeadInput;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::routes::AppState;

/// POST /api/leads
///
/// Answers 422 with the failing fields, otherwise the `SubmissionResult`.
/// Missing keys and unknown `employees` values reach validation as blank
/// or unknown strings, so they get the same 422 body.
pub async fn submit(State(app_state): State<AppState>, Json(input): Json<LeadInput>) -> Response {
    let lead = match input.into_submission() {
        Ok(lead) => lead,
        Err(err) => {
            tracing::debug!(error = %err, "Lead rejected");

            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": "invalid_lead",
                    "fields": err.fields(),
                })),
            )
                .into_response();
        }
    };

    let result = app_state.leads.submit(lead).await;

    Json(result).into_response()
}
