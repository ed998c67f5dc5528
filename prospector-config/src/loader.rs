//! Configuration loading and environment variable handling

use crate::domains::http::HttpConfig;
use crate::domains::logging::{LogFormat, LogLevel, LoggingConfig};
use crate::domains::middleware::MiddlewareConfig;
use crate::domains::site::{SiteConfig, UserConfig};
use crate::domains::ProspectorConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::Path;
use std::str::FromStr;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "PROSPECTOR".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<ProspectorConfig> {
        let path = path.as_ref();
        log::debug!("Loading configuration from {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let mut config: ProspectorConfig = if content.trim().is_empty() {
            ProspectorConfig::default()
        } else {
            serde_yaml::from_str(&content)?
        };

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<ProspectorConfig> {
        let mut config = ProspectorConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<ProspectorConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut ProspectorConfig) -> ConfigResult<()> {
        self.apply_middleware_overrides(&mut config.middleware);
        self.apply_integration_overrides(&mut config.integration);
        self.apply_http_overrides(&mut config.http)?;
        self.apply_logging_overrides(&mut config.logging)?;
        self.apply_site_overrides(&mut config.site);
        self.apply_user_overrides(&mut config.user);
        Ok(())
    }

    /// Apply middleware endpoint overrides
    fn apply_middleware_overrides(&self, config: &mut MiddlewareConfig) {
        if let Ok(url) = self.get_env_var("ENDPOINT_URL") {
            config.endpoint_url = Some(url);
        }

        if let Ok(user) = self.get_env_var("AUTH_USER") {
            config.auth.user = Some(user);
        }

        if let Ok(pass) = self.get_env_var("AUTH_PASS") {
            config.auth.pass = Some(pass);
        }
    }

    /// Apply integration overrides
    fn apply_integration_overrides(&self, config: &mut prospector_interfaces::IntegrationConfig) {
        if let Ok(uuid) = self.get_env_var("INTERACTION_UUID") {
            config.interaction_uuid = uuid;
        }

        if let Ok(included) = self.get_env_var("INCLUDED_DATA") {
            config.included_data = included
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    /// Apply HTTP config overrides
    fn apply_http_overrides(&self, config: &mut HttpConfig) -> ConfigResult<()> {
        if let Ok(timeout) = self.get_env_var("HTTP_TIMEOUT") {
            let seconds: u64 = timeout
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid HTTP_TIMEOUT: {}", e)))?;
            config.timeout = std::time::Duration::from_secs(seconds);
        }

        if let Ok(user_agent) = self.get_env_var("HTTP_USER_AGENT") {
            config.user_agent = user_agent;
        }

        Ok(())
    }

    /// Apply logging config overrides
    fn apply_logging_overrides(&self, config: &mut LoggingConfig) -> ConfigResult<()> {
        if let Ok(log_level) = self.get_env_var("LOG_LEVEL") {
            config.level = LogLevel::from_str(&log_level)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_LEVEL: {}", log_level)))?;
        }

        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            config.format = LogFormat::from_str(&format)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_FORMAT: {}", format)))?;
        }

        Ok(())
    }

    /// Apply site context overrides
    fn apply_site_overrides(&self, config: &mut SiteConfig) {
        if let Ok(name) = self.get_env_var("SITE_NAME") {
            config.name = Some(name);
        }

        if let Ok(url) = self.get_env_var("SITE_URL") {
            config.url = Some(url);
        }

        if let Ok(mail) = self.get_env_var("SITE_MAIL") {
            config.mail = Some(mail);
        }
    }

    /// Apply acting user overrides
    fn apply_user_overrides(&self, config: &mut UserConfig) {
        if let Ok(name) = self.get_env_var("USER_NAME") {
            config.name = Some(name);
        }

        if let Ok(mail) = self.get_env_var("USER_MAIL") {
            config.mail = Some(mail);
        }
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        let key = format!("{}_{}", self.prefix, name);
        let value = std::env::var(&key);
        if value.is_ok() {
            log::debug!("Applying environment override {}", key);
        }
        value
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
