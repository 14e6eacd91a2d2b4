//! Core reconciliation engine for aqbridge
//!
//! Turns a batch of air-quality readings into the state a device publishes:
//! one reconciled value per sensor component, converted units, a discrete
//! quality tier, and a fault state when the batch is unusable.
//!
//! Key constraints:
//! - Pure and synchronous: no I/O, no clocks, no hidden state between cycles
//! - `no_std` capable (needs `alloc` for batch storage)
//! - Fixed-capacity component map, so reconciliation never grows unbounded
//!
//! ```no_run
//! use aqbridge_core::{CycleSettings, DeviceState, ScoredReading, SensorComponentKind};
//!
//! let batch = [ScoredReading::new(85.0)
//!     .with_sample(SensorComponentKind::Temperature, 22.0)
//!     .with_sample(SensorComponentKind::Voc, 300.0)];
//!
//! let settings = CycleSettings::default();
//! let state = settings.derive(&batch).unwrap_or(DeviceState::Fault);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

// Macros for optional logging
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

pub mod aggregate;
pub mod config;
pub mod constants;
pub mod convert;
pub mod cycle;
pub mod errors;
pub mod readings;
pub mod sink;

// Public API
pub use aggregate::{ComponentMap, ReconciledState, SensorAggregator};
pub use config::{DeviceConfig, DeviceInfo, Endpoint};
pub use convert::{score_to_quality_tier, voc_to_mass_concentration, QualityTier};
pub use cycle::CycleSettings;
pub use errors::{ConfigError, ReconcileError, ReconcileResult};
pub use readings::{ScoredReading, SensorComponentKind, SensorSample};
pub use sink::{AirQualityState, Co2State, DeviceState, DeviceStateSink, NominalState};

/// Crate version, reported as the firmware revision in [`DeviceInfo`]
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
