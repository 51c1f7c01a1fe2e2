use std::time::Duration;

use lettre::message::Mailbox;
use serde::Deserialize;

/// Inbox receiving lead notifications when no recipient is configured.
pub const DEFAULT_RECIPIENT: &str = "hola@agentika.es";

/// Fixed sender identity of every notification.
pub const DEFAULT_SENDER: &str = "Agentika <notificaciones@agentika.es>";

pub const DEFAULT_RESEND_URL: &str = "https://api.resend.com";

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Resend,
    Smtp,
    Log,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotificationConfig {
    #[serde(default)]
    pub provider: ProviderKind,
    #[serde(default = "default_from")]
    pub from: String,
    #[serde(default = "default_recipient")]
    pub recipient: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub resend: ResendConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            from: default_from(),
            recipient: default_recipient(),
            locale: default_locale(),
            timeout_secs: default_timeout_secs(),
            resend: ResendConfig::default(),
            smtp: SmtpConfig::default(),
        }
    }
}

impl NotificationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.from.parse::<Mailbox>().is_err() {
            return Err(format!("Invalid notification sender: {}", self.from));
        }
        if self.recipient.parse::<Mailbox>().is_err() {
            return Err(format!("Invalid notification recipient: {}", self.recipient));
        }
        if self.timeout_secs == 0 {
            return Err("Notification timeout_secs must be greater than 0".to_string());
        }
        if self.provider == ProviderKind::Resend && self.resend.api_key.is_empty() {
            return Err("Resend provider requires an API key (RESEND_API_KEY)".to_string());
        }
        if self.provider == ProviderKind::Smtp && self.smtp.host.is_empty() {
            return Err("SMTP provider requires a host".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResendConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_resend_url")]
    pub base_url: String,
}

impl Default for ResendConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_resend_url(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_smtp_tls")]
    pub tls: bool,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            tls: default_smtp_tls(),
        }
    }
}

fn default_from() -> String {
    DEFAULT_SENDER.to_string()
}

fn default_recipient() -> String {
    DEFAULT_RECIPIENT.to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_resend_url() -> String {
    DEFAULT_RESEND_URL.to_string()
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_smtp_tls() -> bool {
    true
}
