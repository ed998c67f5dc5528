//! Delivery interface for outbound documents

use crate::integration::Credentials;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// The flat key/value map posted to the middleware
pub type OutboundDocument = Map<String, JsonValue>;

/// Result of a single delivery attempt
pub type DeliveryOutcome = Result<DeliveryResponse, DeliveryError>;

/// Successful middleware response, kept for audit logging only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryResponse {
    pub status: u16,
    pub body: String,
}

/// Delivery failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// Network, TLS, or request-building failure
    #[error("{0}")]
    Transport(String),

    /// Middleware answered with a non-2xx status
    #[error("Middleware responded with status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Authenticated delivery of an outbound document.
///
/// One call is one request; implementations never retry.
#[async_trait]
pub trait DeliveryClient: Send + Sync {
    async fn deliver(
        &self,
        endpoint_url: &str,
        credentials: &Credentials,
        document: &OutboundDocument,
    ) -> DeliveryOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_error_display() {
        assert_eq!(DeliveryError::Transport("timeout".to_string()).to_string(), "timeout");
        assert_eq!(
            DeliveryError::Status {
                status: 401,
                body: "Unauthorized".to_string()
            }
            .to_string(),
            "Middleware responded with status 401: Unauthorized"
        );
    }
}
