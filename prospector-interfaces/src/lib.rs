//! # Prospector Interfaces
//!
//! Core interfaces and traits shared by the Prospector relay crates.
//!
//! The relay takes a saved form submission, reduces it to the fields an
//! operator selected, and posts it to the AIS RFI middleware. Every crate in
//! the workspace talks to its neighbours through the types defined here so
//! that the HTTP transport, the token resolver and the host's logging can all
//! be swapped independently.
//!
//! ## Main Interfaces
//!
//! - [`DeliveryClient`] - Authenticated POST of an outbound document
//! - [`TokenResolver`] - Placeholder substitution over submission context
//! - [`Reporter`] - Operator log and user-visible notice sinks
//! - [`SubmissionHandler`] - Capability invoked by the host on every save

pub mod delivery;
pub mod handler;
pub mod integration;
pub mod reporting;
pub mod submission;
pub mod tokens;

// Re-export commonly used types
pub use delivery::{
    DeliveryClient, DeliveryError, DeliveryOutcome, DeliveryResponse, OutboundDocument,
};
pub use handler::{MissingPrerequisite, PipelineReport, SubmissionHandler};
pub use integration::{Credentials, EndpointConfig, IntegrationConfig};
pub use reporting::Reporter;
pub use submission::{Submission, SubmissionError};
pub use tokens::TokenResolver;
