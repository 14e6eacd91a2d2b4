//! Error Types for Batch Reconciliation and Configuration
//!
//! ## Design Philosophy
//!
//! The core crate keeps its errors small and `Copy`, the same way the rest of
//! the core avoids heap traffic in the per-cycle path:
//!
//! 1. **No Heap Allocation**: variants carry only numbers or `&'static str`.
//! 2. **Copy Semantics**: errors are returned by value and may be logged after
//!    the batch that produced them has been dropped.
//! 3. **Actionable**: a caller can decide between "publish a fault" and "refuse
//!    to start" from the variant alone.
//!
//! ## Error Categories
//!
//! ### Cycle Errors (recoverable)
//! - `EmptyBatch`: the source returned zero readings, so no average score exists
//! - `CapacityExceeded`: more distinct components than the reconciled map holds
//!
//! Both are converted to a fault publish by the polling engine and never reach
//! the engine's caller.
//!
//! ### Configuration Errors (fatal at construction)
//! - `InvalidConfig`: a configuration value can never produce a usable cycle
//!
//! ## Handling Strategy
//!
//! ```rust
//! use aqbridge_core::{ReconcileError, SensorAggregator};
//!
//! let aggregator = SensorAggregator::new();
//! match aggregator.reconcile(&[]) {
//!     Ok(_state) => {}
//!     Err(ReconcileError::EmptyBatch) => {
//!         // Treat exactly like a failed fetch: publish a fault
//!     }
//!     Err(_) => {}
//! }
//! ```
//!
//! Non-finite numbers are deliberately *not* an error here. A VOC conversion
//! without a temperature sample yields NaN, and that NaN is published as-is.

use thiserror_no_std::Error;

/// Result type for reconciliation operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Errors raised while turning a fetched batch into a reconciled state
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ReconcileError {
    /// The batch held no readings, so the mean score is undefined
    #[error("Empty batch: no readings to reconcile")]
    EmptyBatch,

    /// More distinct components than the reconciled map can hold
    #[error("Component capacity exceeded: limit {capacity}")]
    CapacityExceeded {
        /// Number of distinct components the map can hold
        capacity: usize,
    },
}

/// Configuration rejected at construction time
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A configuration field holds a value no cycle could use
    #[error("Invalid configuration field {field}: {reason}")]
    InvalidConfig {
        /// Name of the offending field as it appears in the config file
        field: &'static str,
        /// Why the value was rejected
        reason: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ReconcileError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::EmptyBatch =>
                defmt::write!(fmt, "Empty batch"),
            Self::CapacityExceeded { capacity } =>
                defmt::write!(fmt, "Component capacity {} exceeded", capacity),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidConfig { field, reason } =>
                defmt::write!(fmt, "Invalid {}: {}", field, reason),
        }
    }
}
