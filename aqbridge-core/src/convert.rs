//! Unit Conversion and Quality Tiers
//!
//! ## Overview
//!
//! Two pure transforms sit between the reconciled batch and the published
//! state:
//!
//! 1. **VOC mass concentration**: ppb (volume mixing ratio) to µg/m³ through
//!    the ideal gas law.
//! 2. **Quality tier**: the continuous 0-100 score to a discrete tier.
//!
//! Both are total functions. Neither checks its inputs.
//!
//! ## VOC Conversion
//!
//! ```text
//! µg/m³ = (ppb × MW × atm × 101.32) / ((273.15 + t°C) × 8.3144)
//! ```
//!
//! The temperature is the batch's reconciled temperature. When the batch has
//! no temperature sample the caller passes NaN and the result is NaN; that
//! value is published unchanged as a signal of incomplete input.
//!
//! ```rust
//! use aqbridge_core::convert::voc_to_mass_concentration;
//!
//! let tvoc = voc_to_mass_concentration(450.0, 72.66578273019740, 1.0, 25.0);
//! assert!((tvoc - 1336.5).abs() < 0.05);
//!
//! assert!(voc_to_mass_concentration(450.0, 72.66578273019740, 1.0, f64::NAN).is_nan());
//! ```

use core::fmt;

use crate::constants::physics::{
    GAS_CONSTANT_J_PER_MOL_K, STANDARD_PRESSURE_KPA, ZERO_CELSIUS_IN_KELVIN,
};
use crate::constants::quality::{
    SCORE_EXCELLENT_MIN, SCORE_FAIR_MIN, SCORE_GOOD_MIN, SCORE_INFERIOR_MIN,
};

/// Convert a VOC reading from ppb to µg/m³
pub fn voc_to_mass_concentration(
    voc_ppb: f64,
    molecular_weight_g_per_mol: f64,
    atmospheres: f64,
    temperature_c: f64,
) -> f64 {
    (voc_ppb * molecular_weight_g_per_mol * atmospheres * STANDARD_PRESSURE_KPA)
        / ((ZERO_CELSIUS_IN_KELVIN + temperature_c) * GAS_CONSTANT_J_PER_MOL_K)
}

/// Discrete air-quality classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum QualityTier {
    /// Score could not be classified (NaN)
    Invalid = 0,
    /// Score 90 and above
    Excellent = 1,
    /// Score 80 up to 90
    Good = 2,
    /// Score 60 up to 80
    Fair = 3,
    /// Score 50 up to 60
    Inferior = 4,
    /// Score below 50
    Poor = 5,
}

impl QualityTier {
    /// Numeric code used by home-automation hubs (0 = unknown, 1 = best)
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    /// Lower-case label
    pub const fn name(&self) -> &'static str {
        match self {
            QualityTier::Invalid => "invalid",
            QualityTier::Excellent => "excellent",
            QualityTier::Good => "good",
            QualityTier::Fair => "fair",
            QualityTier::Inferior => "inferior",
            QualityTier::Poor => "poor",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Map a 0-100 quality score to its tier
///
/// Every finite score lands in a real tier, including scores above 100 and
/// below 0. Only NaN yields [`QualityTier::Invalid`].
pub fn score_to_quality_tier(score: f64) -> QualityTier {
    if score >= SCORE_EXCELLENT_MIN {
        QualityTier::Excellent
    } else if score >= SCORE_GOOD_MIN {
        QualityTier::Good
    } else if score >= SCORE_FAIR_MIN {
        QualityTier::Fair
    } else if score >= SCORE_INFERIOR_MIN {
        QualityTier::Inferior
    } else if score < SCORE_INFERIOR_MIN {
        QualityTier::Poor
    } else {
        QualityTier::Invalid
    }
}
