//! HTTP delivery for the Prospector relay
//!
//! This crate provides the reqwest-backed [`MiddlewareClient`], the production
//! implementation of [`prospector_interfaces::DeliveryClient`].

pub mod client;
pub mod config;
pub mod errors;

// Re-export main types for convenience
pub use client::MiddlewareClient;
pub use config::HttpConfig;
pub use errors::HttpError;
