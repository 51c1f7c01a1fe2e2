use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Response},
};
use std::{collections::HashMap, convert::Infallible};

use crate::language::UserLanguage;

pub(crate) mod filters {
    #[askama::filter_fn]
    pub fn t(value: &str, values: &dyn askama::Values) -> askama::Result<String> {
        let lang = askama::get_value::<String>(values, "lang")
            .ok()
            .cloned()
            .unwrap_or_else(|| crate::language::DEFAULT_LANGUAGE.to_owned());

        Ok(rust_i18n::t!(value, locale = lang).to_string())
    }
}

/// Page renderer bound to the language negotiated for the request.
pub struct Template {
    lang: String,
}

impl Template {
    pub fn new(lang: impl Into<String>) -> Self {
        Self { lang: lang.into() }
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    fn render_with_values<T: askama::Template>(
        &self,
        template: T,
    ) -> Result<String, askama::Error> {
        let mut values: HashMap<&str, Box<dyn std::any::Any>> = HashMap::new();
        values.insert("lang", Box::new(self.lang.to_owned()));

        template.render_with_values(&values)
    }

    pub fn render<T: askama::Template>(&self, template: T) -> Response {
        match self.render_with_values(template) {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "Failed to render template");

                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE).into_response()
            }
        }
    }
}

pub const SERVER_ERROR_MESSAGE: &str = "Something went wrong, please retry later";

impl<S: Send + Sync> FromRequestParts<S> for Template {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let lang = UserLanguage::from_headers(&parts.headers).negotiate();

        Ok(Template::new(lang))
    }
}

#[derive(askama::Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate<'a> {
    pub lang: &'a str,
}

#[derive(askama::Template)]
#[template(path = "partials/toast-success.html")]
pub struct ToastSuccessTemplate<'a> {
    pub message: &'a str,
    pub description: Option<&'a str>,
}

#[derive(askama::Template)]
#[template(path = "partials/toast-error.html")]
pub struct ToastErrorTemplate<'a> {
    pub message: &'a str,
    pub description: Option<&'a str>,
}

/// Localized list of the form fields named by a validation error.
pub fn invalid_fields(err: &agentika_lead::Error, lang: &str) -> String {
    err.fields()
        .iter()
        .map(|field| rust_i18n::t!(format!("form.{field}"), locale = lang).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Unwrap a lead result or return an error toast for the fields that failed.
#[macro_export]
macro_rules! try_response {
    ($result:expr, $template:expr) => {
        match $result {
            Ok(r) => r,
            Err(err) => {
                tracing::debug!(error = %err, "Lead rejected");

                let description = $crate::template::invalid_fields(&err, $template.lang());
                let message = rust_i18n::t!("toast.invalid", locale = $template.lang());

                return (
                    axum::http::StatusCode::UNPROCESSABLE_ENTITY,
                    $template.render($crate::template::ToastErrorTemplate {
                        message: &message,
                        description: Some(&description),
                    }),
                )
                    .into_response();
            }
        }
    };
}
