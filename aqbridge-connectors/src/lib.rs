//! Data-Source Connectors and Polling for aqbridge
//!
//! ## Overview
//!
//! This crate is the I/O half of aqbridge. `aqbridge-core` knows how to turn a
//! batch of readings into device state; this crate knows where batches come
//! from and when to ask for them.
//!
//! ```text
//! ┌──────────────┐  fetch()   ┌───────────────┐  derive   ┌──────────────┐
//! │ FetchClient  │──────────▶ │ PollingEngine │─────────▶ │ DeviceState  │
//! │ (HTTP, mock) │  batch     │  timer, phase │  publish  │    Sink      │
//! └──────────────┘            └───────────────┘           └──────────────┘
//! ```
//!
//! ## Fetch Clients
//!
//! A [`FetchClient`] returns one batch per call. Retry and timeout policy
//! belong to the client; the engine calls it once per cycle and treats any
//! error as a fault for that cycle.
//!
//! ### HTTP (feature `http`, default)
//!
//! [`http::AwairClient`] reads the air-data REST API with a bearer token. It
//! uses the blocking `ureq` client on tokio's blocking pool, so a slow
//! request never stalls the timer.
//!
//! ## Polling
//!
//! [`engine::PollingEngine`] runs one initial cycle on start, then one per
//! configured period. Each tick starts its cycle independently. A fetch slower
//! than the period can therefore overlap the next cycle, and the later cycle
//! may publish first.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use aqbridge_connectors::{engine::PollingEngine, http::AwairClient};
//! use aqbridge_core::DeviceConfig;
//! # use aqbridge_core::{DeviceStateSink, QualityTier};
//! # struct HubSink;
//! # impl DeviceStateSink for HubSink {
//! #     fn write_temperature(&mut self, _: Option<f64>, _: bool) {}
//! #     fn write_humidity(&mut self, _: Option<f64>, _: bool) {}
//! #     fn write_co2(&mut self, _: Option<f64>, _: Option<bool>, _: bool) {}
//! #     fn write_air_quality(&mut self, _: Option<QualityTier>, _: Option<f64>,
//! #         _: Option<f64>, _: Option<f64>, _: bool) {}
//! # }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DeviceConfig::new("awair-r2", "12345", "api-token")
//!     .co2_threshold(1200.0)
//!     .logging(true);
//!
//! let client = AwairClient::for_device(&config)?;
//! let mut engine = PollingEngine::new(&config, client, HubSink)?;
//! engine.start();
//!
//! // ... on device removal
//! engine.stop();
//! # Ok(())
//! # }
//! ```

use aqbridge_core::ScoredReading;
use thiserror::Error;

pub mod engine;
pub mod wire;

#[cfg(feature = "http")]
pub mod http;

// Re-export common types
pub use engine::{CycleFailure, CycleOutcome, CycleStats, EnginePhase, PollingEngine};

#[cfg(feature = "http")]
pub use http::{AwairClient, HttpConfig};

/// Errors a fetch client can report for one batch request
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network or transport failure
    #[error("Request failed: {0}")]
    Request(String),

    /// Token rejected by the data source
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Response body was not a batch
    #[error("Parse error: {0}")]
    Parse(String),

    /// Client configuration unusable
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Source of reading batches, called once per polling cycle
#[async_trait::async_trait]
pub trait FetchClient: Send + Sync {
    /// Fetch one batch of readings
    async fn fetch(&self) -> Result<Vec<ScoredReading>, FetchError>;
}

#[async_trait::async_trait]
impl<T: FetchClient + ?Sized> FetchClient for std::sync::Arc<T> {
    async fn fetch(&self) -> Result<Vec<ScoredReading>, FetchError> {
        (**self).fetch().await
    }
}

/// Request statistics kept by fetch clients
#[derive(Debug, Default, Clone)]
pub struct FetchStats {
    /// Requests that returned a body
    pub requests_ok: u64,
    /// Requests that gave up with an error
    pub requests_failed: u64,
    /// Extra attempts made after a retryable failure
    pub retries: u64,
    /// Total response bytes received
    pub bytes_received: u64,
    /// Last error message
    pub last_error: Option<String>,
}
