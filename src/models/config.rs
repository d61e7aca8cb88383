//! Configuration model loaded from external sources.

use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{TypeConstraintError, WebhookUrl};

pub const DEFAULT_CLIENTS_TABLE: &str = "template-pesquisa-satisfacao-clientes";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

fn default_clients_table() -> String {
    DEFAULT_CLIENTS_TABLE.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Reasons the service refuses to start with the given settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error loading server config: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid server config: {0}")]
    Invalid(#[from] ValidationErrors),
}

#[derive(Clone, Debug, Deserialize, Validate)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    pub assets_dir: String,
    /// Key material for the flash message cookies.
    #[validate(length(min = 64))]
    pub secret: String,
    /// Base URL of the hosted record source.
    #[validate(url)]
    pub supabase_url: String,
    /// Access key sent with every record source request.
    #[validate(length(min = 1))]
    pub supabase_key: String,
    #[serde(default = "default_clients_table")]
    #[validate(length(min = 1))]
    pub clients_table: String,
    /// Receiver of forwarded client data. Empty or absent disables dispatch.
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Layers `config/default.yaml`, the optional `config/{app_env}.yaml`
    /// profile and `APP_*` environment variables.
    pub fn load(app_env: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?;
        Self::from_settings(settings)
    }

    /// Deserializes and validates already layered settings.
    ///
    /// The record source URL and key have no defaults, so settings that
    /// leave them out are rejected here.
    pub fn from_settings(settings: Config) -> Result<Self, ConfigError> {
        let server_config: ServerConfig = settings.try_deserialize()?;
        server_config.validate()?;
        Ok(server_config)
    }

    /// Returns the configured webhook, treating a blank value as unset.
    pub fn webhook_url(&self) -> Result<Option<WebhookUrl>, TypeConstraintError> {
        match self.webhook_url.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(url) => WebhookUrl::new(url).map(Some),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ServerConfig {
        ServerConfig {
            address: "127.0.0.1".to_string(),
            port: 8080,
            templates_dir: "templates/**/*".to_string(),
            assets_dir: "./assets".to_string(),
            secret: "x".repeat(64),
            supabase_url: "https://project.supabase.co".to_string(),
            supabase_key: "anon-key".to_string(),
            clients_table: default_clients_table(),
            webhook_url: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn missing_record_source_credentials_fail_validation() {
        let mut cfg = valid_config();
        cfg.supabase_key = String::new();
        assert!(cfg.validate().is_err());

        let mut cfg = valid_config();
        cfg.supabase_url = "nowhere".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn short_secret_fails_validation() {
        let mut cfg = valid_config();
        cfg.secret = "short".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn blank_webhook_is_treated_as_unset() {
        let mut cfg = valid_config();
        assert_eq!(cfg.webhook_url(), Ok(None));

        cfg.webhook_url = Some("   ".to_string());
        assert_eq!(cfg.webhook_url(), Ok(None));

        cfg.webhook_url = Some("https://hooks.example.com/x".to_string());
        assert_eq!(
            cfg.webhook_url().expect("valid").map(WebhookUrl::into_inner),
            Some("https://hooks.example.com/x".to_string())
        );

        cfg.webhook_url = Some("bogus".to_string());
        assert_eq!(cfg.webhook_url(), Err(TypeConstraintError::InvalidUrl));
    }

    fn defaults() -> config::ConfigBuilder<config::builder::DefaultState> {
        Config::builder().add_source(File::with_name("config/default"))
    }

    #[test]
    fn shipped_defaults_without_credentials_are_rejected() {
        let settings = defaults().build().expect("default.yaml parses");

        let result = ServerConfig::from_settings(settings);

        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn shipped_defaults_with_credentials_start() {
        let settings = defaults()
            .set_override("supabase_url", "https://project.supabase.co")
            .and_then(|builder| builder.set_override("supabase_key", "anon-key"))
            .and_then(|builder| builder.build())
            .expect("settings build");

        let server_config = ServerConfig::from_settings(settings).expect("valid config");

        assert_eq!(server_config.clients_table, DEFAULT_CLIENTS_TABLE);
        assert_eq!(server_config.webhook_url(), Ok(None));
        assert_eq!(server_config.request_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn blank_record_source_key_is_rejected() {
        let settings = defaults()
            .set_override("supabase_url", "https://project.supabase.co")
            .and_then(|builder| builder.set_override("supabase_key", ""))
            .and_then(|builder| builder.build())
            .expect("settings build");

        let result = ServerConfig::from_settings(settings);

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
