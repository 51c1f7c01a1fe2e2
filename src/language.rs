use axum::http::{HeaderMap, header};

pub const SUPPORTED_LANGUAGES: [&str; 2] = ["en", "es"];
pub const DEFAULT_LANGUAGE: &str = "en";

/// Languages listed in `Accept-Language`, most preferred first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserLanguage(Vec<String>);

impl UserLanguage {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let Some(value) = headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
        else {
            return Self::default();
        };

        let mut languages = value
            .split(',')
            .filter_map(|item| {
                let mut parts = item.split(';');
                let tag = parts.next()?.trim().to_lowercase();
                let quality = parts
                    .filter_map(|p| p.trim().strip_prefix("q="))
                    .find_map(|q| q.parse::<f32>().ok())
                    .unwrap_or(1.0);

                (!tag.is_empty() && tag != "*" && quality > 0.0).then_some((tag, quality))
            })
            .collect::<Vec<_>>();

        // stable, so equal weights keep header order
        languages.sort_by(|a, b| b.1.total_cmp(&a.1));

        Self(languages.into_iter().map(|(tag, _)| tag).collect())
    }

    pub fn preferred_languages(&self) -> &[String] {
        &self.0
    }

    /// First preferred language we have translations for.
    pub fn negotiate(&self) -> &'static str {
        self.0
            .iter()
            .find_map(|tag| {
                let primary = tag.split_once('-').map(|(p, _)| p).unwrap_or(tag);
                SUPPORTED_LANGUAGES.into_iter().find(|l| *l == primary)
            })
            .unwrap_or(DEFAULT_LANGUAGE)
    }
}
