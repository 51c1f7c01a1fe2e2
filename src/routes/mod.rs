use std::sync::Arc;

use agentika_lead::LeadService;
use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::template::{NotFoundTemplate, Template};

mod api;
mod contact;
mod health;
mod index;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub leads: Arc<dyn LeadService>,
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    let page = template.render(NotFoundTemplate {
        lang: template.lang(),
    });

    (StatusCode::NOT_FOUND, page)
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/", get(index::page))
        .route("/contact", post(contact::action))
        .route("/api/leads", post(api::submit))
        .nest_service("/static", crate::assets::AssetsService::new())
        .fallback(fallback)
        .layer(axum::middleware::from_fn(
            crate::middleware::security_headers_middleware,
        ))
        .with_state(app_state)
}
