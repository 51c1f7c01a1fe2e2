mod config;
mod provider;
mod service;
pub(crate) mod template;

pub use config::*;
pub use provider::*;
pub use service::*;

rust_i18n::i18n!("locales", fallback = "en");
