use std::collections::HashMap;

pub(crate) mod filters {
    #[askama::filter_fn]
    pub fn t(value: &str, values: &dyn askama::Values) -> askama::Result<String> {
        let lang = askama::get_value::<String>(values, "lang")
            .ok()
            .cloned()
            .unwrap_or_else(|| "en".to_owned());

        Ok(rust_i18n::t!(value, locale = lang).to_string())
    }
}

pub struct Template {
    lang: String,
}

impl Template {
    pub fn new(lang: impl Into<String>) -> Self {
        let lang = lang.into();

        Self { lang }
    }

    pub fn render<T: askama::Template>(&self, template: T) -> Result<String, askama::Error> {
        let mut values: HashMap<&str, Box<dyn std::any::Any>> = HashMap::new();
        values.insert("lang", Box::new(self.lang.to_owned()));

        template.render_with_values(&values)
    }
}
