//! Domain-driven configuration management for the Prospector relay
//!
//! Configuration is split by functional domain (middleware endpoint,
//! integration settings, HTTP transport, logging, token context), loaded from
//! YAML with `PROSPECTOR_*` environment overrides, and validated per domain.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::Validatable;

// Re-export domain configurations
pub use domains::{
    http::HttpConfig,
    logging::{LogFormat, LogLevel, LoggingConfig},
    middleware::{AuthConfig, MiddlewareConfig},
    site::{SiteConfig, UserConfig},
    ProspectorConfig,
};

// Re-export utilities
pub use domains::utils::serde_duration;
