//! Per-integration and endpoint settings read by the pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operator-controlled settings of one integration.
///
/// Populated by the administrative form of the form system; the defaults are
/// an empty selection and no interaction UUID, which is a valid but inert
/// state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationConfig {
    /// Element ids whose values are sent to the middleware
    pub included_data: Vec<String>,

    /// Middleware interaction UUID (the routing identifier)
    pub interaction_uuid: String,
}

impl IntegrationConfig {
    pub fn new(
        included_data: impl IntoIterator<Item = impl Into<String>>,
        interaction_uuid: impl Into<String>,
    ) -> Self {
        Self {
            included_data: included_data.into_iter().map(Into::into).collect(),
            interaction_uuid: interaction_uuid.into(),
        }
    }

    /// Trim ids and drop blank entries
    pub fn normalized(mut self) -> Self {
        self.included_data = self
            .included_data
            .into_iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        self.interaction_uuid = self.interaction_uuid.trim().to_string();
        self
    }
}

/// HTTP Basic credentials for the middleware
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub user: String,
    pub pass: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, pass: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            pass: pass.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("pass", &"***")
            .finish()
    }
}

/// Where and as whom deliveries are made
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointConfig {
    pub url: Option<String>,
    pub credentials: Option<Credentials>,
}

impl EndpointConfig {
    pub fn new(url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            url: Some(url.into()),
            credentials: Some(credentials),
        }
    }

    /// Endpoint URL, treating an empty string as absent
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}
