//! Constants for aqbridge Core
//!
//! Centralized numeric values used by the conversion, reconciliation and
//! polling code. Every value states its unit in the name.
//!
//! ## Organization
//!
//! - **Physics**: gas-law constants used by the VOC conversion
//! - **Quality**: score boundaries for the discrete air-quality tiers
//! - **Polling**: configuration defaults for the polling cycle
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Keep the unit in the constant name
//! 3. Changing a default here changes the behavior of every device that
//!    leaves the matching config key unset

/// Gas-law constants and reference conditions.
pub mod physics;

/// Score boundaries for the air-quality tiers.
pub mod quality;

/// Polling and data-source defaults.
pub mod polling;

// Re-export commonly used constants for convenience
pub use physics::{
    ZERO_CELSIUS_IN_KELVIN, GAS_CONSTANT_J_PER_MOL_K,
    STANDARD_PRESSURE_KPA, DEFAULT_VOC_MOLECULAR_WEIGHT_G_PER_MOL,
};

pub use quality::{
    SCORE_EXCELLENT_MIN, SCORE_GOOD_MIN, SCORE_FAIR_MIN, SCORE_INFERIOR_MIN,
};

pub use polling::{
    DEFAULT_POLLING_INTERVAL_S, DEFAULT_RESULT_LIMIT, DEFAULT_MANUFACTURER,
};
