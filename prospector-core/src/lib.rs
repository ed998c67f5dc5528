//! # Prospector Core
//!
//! Relays saved form submissions to the AIS RFI middleware.
//!
//! A run goes through these stages:
//!
//! 1. Prerequisite checks (credentials, interaction UUID, endpoint URL)
//! 2. Field selection over element data and the fixed metadata subset
//! 3. Payload assembly with token resolution
//! 4. Delivery through a [`prospector_interfaces::DeliveryClient`]
//! 5. Reporting through a [`prospector_interfaces::Reporter`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use prospector_core::MiddlewarePipeline;
//! use prospector_interfaces::{
//!     Credentials, DeliveryClient, EndpointConfig, IntegrationConfig, Submission,
//!     SubmissionHandler,
//! };
//! use std::sync::Arc;
//!
//! # async fn example(client: Arc<dyn DeliveryClient>) {
//! let pipeline = MiddlewarePipeline::new(
//!     IntegrationConfig::new(["email"], "UUID-7"),
//!     EndpointConfig::new(
//!         "https://middleware.example.edu/rfi",
//!         Credentials::new("ais", "secret"),
//!     ),
//!     client,
//! );
//!
//! let submission = Submission::new(42)
//!     .with_data("email", "a@b.com")
//!     .with_metadata("webform_id", "rfi");
//! let report = pipeline.on_submission_saved(&submission, false).await;
//! println!("{:?}", report);
//! # }
//! ```

pub mod assembler;
pub mod pipeline;
pub mod reporter;
pub mod selector;
pub mod tokens;

pub use assembler::{assemble, merge, CLIENT_KEY, CLIENT_KEY_FIELD, INTERACTION_UUID_KEY};
pub use pipeline::{MiddlewarePipeline, PipelineError, Prerequisites, HANDLER_ID, HANDLER_LABEL};
pub use reporter::{NoticeCollector, TracingReporter, MESSENGER_TARGET};
pub use selector::{select, select_metadata, DEFAULT_METADATA_KEYS};
pub use tokens::TemplateTokenResolver;
