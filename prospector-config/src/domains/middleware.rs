//! Middleware endpoint configuration

use crate::domains::utils::non_empty;
use crate::error::ConfigResult;
use crate::validation::{validate_url, Validatable};
use prospector_interfaces::{Credentials, EndpointConfig};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Middleware endpoint and credentials.
///
/// Every field is optional here. A deployment without an endpoint or
/// credentials still loads; the pipeline refuses to deliver instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MiddlewareConfig {
    /// URL the submissions are posted to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,

    /// HTTP Basic credentials
    pub auth: AuthConfig,
}

/// HTTP Basic credential pair
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass: Option<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("user", &self.user)
            .field("pass", &self.pass.as_ref().map(|_| "***"))
            .finish()
    }
}

impl MiddlewareConfig {
    /// The credential pair, if both halves are set.
    ///
    /// A set-but-empty value still counts as set.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.auth.user, &self.auth.pass) {
            (Some(user), Some(pass)) => Some(Credentials::new(user.clone(), pass.clone())),
            _ => None,
        }
    }

    /// Endpoint settings as read by the pipeline
    pub fn endpoint(&self) -> EndpointConfig {
        EndpointConfig {
            url: non_empty(&self.endpoint_url).map(str::to_string),
            credentials: self.credentials(),
        }
    }

    /// Operator warnings for an endpoint that cannot deliver yet
    pub fn readiness_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if non_empty(&self.endpoint_url).is_none() {
            warnings.push(
                "The AIS RFI Middleware endpoint URL is missing. \
                 Please contact the SiteNow team for assistance."
                    .to_string(),
            );
        }

        if self.credentials().is_none() {
            warnings.push(
                "The AIS RFI Middleware authentication credentials are missing. \
                 Please contact the SiteNow team for assistance."
                    .to_string(),
            );
        }

        warnings
    }
}

impl Validatable for MiddlewareConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(url) = non_empty(&self.endpoint_url) {
            validate_url(url, "endpoint_url", self.domain_name())?;
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "middleware"
    }
}
