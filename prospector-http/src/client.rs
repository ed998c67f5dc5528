//! Middleware delivery client

use crate::config::HttpConfig;
use crate::errors::HttpError;
use async_trait::async_trait;
use prospector_interfaces::{
    Credentials, DeliveryClient, DeliveryError, DeliveryOutcome, DeliveryResponse,
    OutboundDocument,
};
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Posts outbound documents to the middleware with HTTP Basic auth.
///
/// The underlying reqwest client is built once and reused, so a single
/// `MiddlewareClient` can serve concurrent pipeline runs.
#[derive(Debug, Clone)]
pub struct MiddlewareClient {
    client: Client,
}

impl MiddlewareClient {
    /// Create a client with default transport settings
    pub fn new() -> Result<Self, HttpError> {
        Self::with_config(HttpConfig::default())
    }

    /// Create a client with specific transport settings
    pub fn with_config(config: HttpConfig) -> Result<Self, HttpError> {
        debug!(
            "Creating MiddlewareClient with timeout: {}s",
            config.timeout.as_secs()
        );

        let client = Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects as usize))
            .build()?;

        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DeliveryClient for MiddlewareClient {
    async fn deliver(
        &self,
        endpoint_url: &str,
        credentials: &Credentials,
        document: &OutboundDocument,
    ) -> DeliveryOutcome {
        let start_time = Instant::now();
        debug!(endpoint = endpoint_url, fields = document.len(), "Posting document to middleware");

        let response = self
            .client
            .post(endpoint_url)
            .basic_auth(&credentials.user, Some(&credentials.pass))
            .json(document)
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint = endpoint_url, "Middleware request failed: {}", e);
                DeliveryError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        info!(
            endpoint = endpoint_url,
            status = status.as_u16(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Middleware response received"
        );

        if !status.is_success() {
            return Err(DeliveryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(DeliveryResponse {
            status: status.as_u16(),
            body,
        })
    }
}
