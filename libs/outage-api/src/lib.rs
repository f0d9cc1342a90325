//! Client library for the outage service.
//!
//! Provides the wire models exchanged with the service, an immutable client
//! configuration, a retry policy with exponential backoff, and
//! [`OutageApiClient`] with one typed operation per endpoint.
//!
//! ## Usage
//!
//! ```ignore
//! use outage_api::{ApiConfig, OutageApiClient};
//!
//! let client = OutageApiClient::new(ApiConfig::default())?;
//! let outages = client.get_outages().await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod retry;
pub mod secret;

// Client and configuration
pub use client::OutageApiClient;
pub use config::ApiConfig;

// Error types
pub use error::ApiError;

// Wire models
pub use models::{Device, Outage, SiteInfo, SiteOutage};

// Retry types
pub use retry::{RetryPolicy, retry};

// Secret handling
pub use secret::SecretString;
