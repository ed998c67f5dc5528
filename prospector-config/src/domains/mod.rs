//! Domain-specific configuration modules

pub mod http;
pub mod logging;
pub mod middleware;
pub mod site;
pub mod utils;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use prospector_interfaces::IntegrationConfig;
use serde::{Deserialize, Serialize};

/// Main Prospector configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProspectorConfig {
    /// Middleware endpoint and credentials
    pub middleware: middleware::MiddlewareConfig,

    /// Operator-selected fields and interaction UUID
    pub integration: IntegrationConfig,

    /// HTTP transport configuration
    pub http: http::HttpConfig,

    /// Logging configuration
    pub logging: logging::LoggingConfig,

    /// Site values available to tokens
    pub site: site::SiteConfig,

    /// Acting user values available to tokens
    pub user: site::UserConfig,
}

impl ProspectorConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.middleware.validate()?;
        self.integration.validate()?;
        self.http.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Everything that would stop a delivery from going out
    pub fn readiness_warnings(&self) -> Vec<String> {
        let mut warnings = self.middleware.readiness_warnings();

        if self.integration.interaction_uuid.trim().is_empty() {
            warnings.push(
                "The middleware interaction UUID is empty. \
                 Without this, no data will be sent to the middleware."
                    .to_string(),
            );
        }

        warnings
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let mut config = ProspectorConfig::default();
        config.middleware.endpoint_url = Some("https://middleware.example.edu/api/rfi".to_string());
        config.middleware.auth.user = Some("prospector".to_string());
        config.middleware.auth.pass = Some("change-me".to_string());
        config.integration = IntegrationConfig::new(["email", "first_name", "last_name"], "");
        serde_yaml::to_string(&config)
            .unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}

impl Validatable for IntegrationConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.included_data.iter().any(|id| id.trim().is_empty()) {
            return Err(self.validation_error("included_data cannot contain empty element ids"));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "integration"
    }
}
