use agentika_lead::EmployeeBucket;
use axum::response::IntoResponse;
use strum::VariantArray;

use crate::template::{Template, filters};

#[derive(askama::Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub lang: &'a str,
    pub buckets: &'static [EmployeeBucket],
}

pub async fn page(template: Template) -> impl IntoResponse {
    template.render(IndexTemplate {
        lang: template.lang(),
        buckets: EmployeeBucket::VARIANTS,
    })
}
