//! Submission pipeline: prerequisites, document building, delivery, reporting

use crate::assembler::{assemble, CLIENT_KEY};
use crate::reporter::TracingReporter;
use crate::selector::{select, select_metadata};
use crate::tokens::TemplateTokenResolver;
use async_trait::async_trait;
use prospector_config::ProspectorConfig;
use prospector_interfaces::{
    Credentials, DeliveryClient, EndpointConfig, IntegrationConfig, MissingPrerequisite,
    OutboundDocument, PipelineReport, Reporter, Submission, SubmissionHandler, TokenResolver,
};
use std::sync::Arc;
use tracing::{debug, info_span, Instrument};

/// Prefix of every operator-facing message
const LOG_PREFIX: &str = "AIS RFI Middleware";

/// Machine name of the handler
pub const HANDLER_ID: &str = "ais_rfi_middleware_prospector";

/// Human readable handler label
pub const HANDLER_LABEL: &str = "AIS RFI Prospector";

/// Errors that stop a delivery before it starts
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("{0}")]
    ConfigurationIncomplete(MissingPrerequisite),
}

/// Everything a delivery needs, borrowed from the pipeline's configuration
#[derive(Debug)]
pub struct Prerequisites<'a> {
    pub credentials: &'a Credentials,
    pub interaction_uuid: &'a str,
    pub endpoint_url: &'a str,
}

/// Relays saved submissions to the AIS RFI middleware.
///
/// Configuration is fixed at construction (or replaced through
/// [`SubmissionHandler::configure`]); a run reads it but never mutates it, so
/// one pipeline can serve concurrent submissions.
pub struct MiddlewarePipeline {
    integration: IntegrationConfig,
    endpoint: EndpointConfig,
    client: Arc<dyn DeliveryClient>,
    resolver: Arc<dyn TokenResolver>,
    reporter: Arc<dyn Reporter>,
}

impl MiddlewarePipeline {
    pub fn new(
        integration: IntegrationConfig,
        endpoint: EndpointConfig,
        client: Arc<dyn DeliveryClient>,
    ) -> Self {
        Self {
            integration: integration.normalized(),
            endpoint,
            client,
            resolver: Arc::new(TemplateTokenResolver::new()),
            reporter: Arc::new(TracingReporter::new()),
        }
    }

    /// Build a pipeline from loaded configuration
    pub fn from_config(config: &ProspectorConfig, client: Arc<dyn DeliveryClient>) -> Self {
        let resolver = TemplateTokenResolver::new()
            .with_site(config.site.clone())
            .with_user(config.user.clone());

        Self::new(config.integration.clone(), config.middleware.endpoint(), client)
            .with_resolver(Arc::new(resolver))
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn TokenResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn integration(&self) -> &IntegrationConfig {
        &self.integration
    }

    /// Check credentials, interaction UUID and endpoint URL, in that order
    pub fn check_prerequisites(&self) -> Result<Prerequisites<'_>, PipelineError> {
        let credentials = self
            .endpoint
            .credentials
            .as_ref()
            .ok_or(PipelineError::ConfigurationIncomplete(MissingPrerequisite::Credentials))?;

        if self.integration.interaction_uuid.is_empty() {
            return Err(PipelineError::ConfigurationIncomplete(
                MissingPrerequisite::InteractionUuid,
            ));
        }

        let endpoint_url = self
            .endpoint
            .url()
            .ok_or(PipelineError::ConfigurationIncomplete(MissingPrerequisite::EndpointUrl))?;

        Ok(Prerequisites {
            credentials,
            interaction_uuid: &self.integration.interaction_uuid,
            endpoint_url,
        })
    }

    /// Build the outbound document for a submission without sending it
    pub fn preview(&self, submission: &Submission) -> OutboundDocument {
        let metadata = select_metadata(&submission.metadata);
        let element_data = select(
            &submission.data,
            self.integration.included_data.iter().map(String::as_str),
        );

        assemble(
            submission,
            element_data,
            metadata,
            &self.integration.interaction_uuid,
            CLIENT_KEY,
            self.resolver.as_ref(),
        )
    }
}

#[async_trait]
impl SubmissionHandler for MiddlewarePipeline {
    fn handler_id(&self) -> &'static str {
        HANDLER_ID
    }

    fn label(&self) -> &'static str {
        HANDLER_LABEL
    }

    fn configure(&mut self, config: IntegrationConfig) {
        self.integration = config.normalized();
    }

    async fn on_submission_saved(&self, submission: &Submission, update: bool) -> PipelineReport {
        let span = info_span!("submission", submission_id = submission.id, update);
        self.relay(submission).instrument(span).await
    }
}

impl MiddlewarePipeline {
    async fn relay(&self, submission: &Submission) -> PipelineReport {
        debug!("Relaying saved submission");

        let prerequisites = match self.check_prerequisites() {
            Ok(prerequisites) => prerequisites,
            Err(PipelineError::ConfigurationIncomplete(reason)) => {
                self.reporter.log_error(&format!(
                    "{}: {}. No data was sent to the middleware.",
                    LOG_PREFIX, reason
                ));
                return PipelineReport::Skipped { reason };
            }
        };

        let document = self.preview(submission);
        debug!(
            interaction_uuid = prerequisites.interaction_uuid,
            fields = document.len(),
            "Outbound document assembled"
        );

        match self
            .client
            .deliver(prerequisites.endpoint_url, prerequisites.credentials, &document)
            .await
        {
            Ok(response) => {
                self.reporter
                    .log_notice(&format!("{}: Success: {}", LOG_PREFIX, response.body));
                PipelineReport::Delivered {
                    status: response.status,
                    response: response.body,
                }
            }
            Err(e) => {
                self.reporter.log_error(&format!(
                    "{}: An error occurred while posting the webform submission to the \
                     middleware. Error: {}",
                    LOG_PREFIX, e
                ));
                self.reporter.notify_user_error(&format!(
                    "{}: An error occurred while posting the webform submission to the middleware.",
                    LOG_PREFIX
                ));
                PipelineReport::Failed { error: e.to_string() }
            }
        }
    }
}
