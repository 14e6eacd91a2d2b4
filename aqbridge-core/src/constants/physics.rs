//! Physical Constants for the VOC Conversion
//!
//! The remote source reports total VOC as a volume mixing ratio (ppb). Health
//! guidance and most downstream hubs expect a mass concentration (µg/m³). The
//! ideal gas law bridges the two:
//!
//! ```text
//! µg/m³ = ppb × MW × atm × P₀ / ((T₀ + t) × R)
//! ```

// ===== FUNDAMENTAL CONSTANTS =====

/// Offset between the Celsius and Kelvin scales (K).
///
/// Source: SI definition of the degree Celsius
pub const ZERO_CELSIUS_IN_KELVIN: f64 = 273.15;

/// Molar gas constant (J·mol⁻¹·K⁻¹), rounded to the precision the
/// conversion has always used.
///
/// Source: CODATA 8.314462618, truncated
pub const GAS_CONSTANT_J_PER_MOL_K: f64 = 8.3144;

/// Standard atmosphere (kPa) used to scale the `atmospheres` factor.
///
/// The conversion uses 101.32 rather than the exact 101.325.
pub const STANDARD_PRESSURE_KPA: f64 = 101.32;

/// Pressure factor used for every conversion (atm).
///
/// No altitude or weather correction is modeled.
pub const SEA_LEVEL_ATMOSPHERES: f64 = 1.0;

// ===== REFERENCE GAS =====

/// Molecular weight of the reference VOC mixture (g/mol).
///
/// Default used when the configuration does not name a mixture. Weighted
/// average of a typical indoor VOC profile.
pub const DEFAULT_VOC_MOLECULAR_WEIGHT_G_PER_MOL: f64 = 72.66578273019740;
