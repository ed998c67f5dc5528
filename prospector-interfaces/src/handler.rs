//! Submission handler capability invoked by the host on every save

use crate::integration::IntegrationConfig;
use crate::submission::Submission;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prerequisite that stopped a delivery before any network call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPrerequisite {
    Credentials,
    InteractionUuid,
    EndpointUrl,
}

impl MissingPrerequisite {
    /// Operator-facing description
    pub fn description(&self) -> &'static str {
        match self {
            MissingPrerequisite::Credentials => "Authentication credentials are missing",
            MissingPrerequisite::InteractionUuid => "Interaction UUID is missing",
            MissingPrerequisite::EndpointUrl => "Endpoint URL is missing",
        }
    }
}

impl fmt::Display for MissingPrerequisite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// What happened to one submission's delivery.
///
/// This is a report, not an error: the save workflow that fired the handler
/// succeeds regardless of which variant comes back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PipelineReport {
    /// Configuration incomplete; nothing was sent
    Skipped { reason: MissingPrerequisite },
    /// Middleware accepted the document
    Delivered { status: u16, response: String },
    /// Transport failure or non-2xx response
    Failed { error: String },
}

impl PipelineReport {
    pub fn is_delivered(&self) -> bool {
        matches!(self, PipelineReport::Delivered { .. })
    }
}

/// A handler attached to a form and run after each submission is saved
#[async_trait]
pub trait SubmissionHandler: Send + Sync {
    /// Stable machine name
    fn handler_id(&self) -> &'static str;

    /// Human readable label
    fn label(&self) -> &'static str;

    /// Replace the operator-controlled settings
    fn configure(&mut self, config: IntegrationConfig);

    /// React to a saved submission. `update` is true when an existing
    /// submission was re-saved.
    async fn on_submission_saved(&self, submission: &Submission, update: bool) -> PipelineReport;
}
