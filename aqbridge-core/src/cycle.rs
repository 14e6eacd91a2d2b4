//! Per-Cycle Derivation
//!
//! Turns one fetched batch into the [`DeviceState`] a polling cycle publishes.
//! Everything here is synchronous and pure; scheduling and fetching live in
//! the connectors crate.
//!
//! ## Routing
//!
//! | Component   | Channel      | Transform                              |
//! |-------------|--------------|----------------------------------------|
//! | Temperature | Temperature  | none                                   |
//! | Humidity    | Humidity     | none                                   |
//! | Co2         | CO2          | none, plus threshold signal            |
//! | Voc         | VOC density  | ppb → µg/m³ at the batch temperature   |
//! | Dust, Pm10  | PM10 density | none; later in iteration order wins    |
//! | Pm25        | PM2.5        | none                                   |
//! | Unknown     | -            | ignored                                |
//!
//! Dust and PM10 share one output channel and are not merged with each other.

use alloc::string::String;

use crate::aggregate::{ReconciledState, SensorAggregator};
use crate::constants::physics::{DEFAULT_VOC_MOLECULAR_WEIGHT_G_PER_MOL, SEA_LEVEL_ATMOSPHERES};
use crate::convert::{score_to_quality_tier, voc_to_mass_concentration};
use crate::errors::ReconcileResult;
use crate::readings::{ScoredReading, SensorComponentKind};
use crate::sink::{AirQualityState, Co2State, DeviceState, NominalState};

/// Fixed per-device parameters for deriving state
#[derive(Debug, Clone, PartialEq)]
pub struct CycleSettings {
    /// CO2 level (ppm) at which `detected` is raised; 0 or less disables it
    pub co2_threshold_ppm: f64,

    /// Molecular weight (g/mol) of the reference VOC mixture
    pub voc_molecular_weight: f64,

    /// Whether the device variant has a CO2 channel at all
    pub has_co2_channel: bool,

    /// Emit per-cycle detail lines (reconciled values, CO2, VOC inputs)
    pub logging: bool,

    /// Prefix for every detail line
    pub serial: String,
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            co2_threshold_ppm: 0.0,
            voc_molecular_weight: DEFAULT_VOC_MOLECULAR_WEIGHT_G_PER_MOL,
            has_co2_channel: true,
            logging: false,
            serial: String::new(),
        }
    }
}

impl CycleSettings {
    /// True when the threshold is enabled and `level` reaches it
    pub fn co2_detected(&self, level: f64) -> bool {
        self.co2_threshold_ppm > 0.0 && level >= self.co2_threshold_ppm
    }

    /// Reconcile a batch and derive the state to publish
    ///
    /// Errors (an empty batch) mean the caller must publish a fault.
    pub fn derive(&self, readings: &[ScoredReading]) -> ReconcileResult<DeviceState> {
        let reconciled = SensorAggregator::new().reconcile(readings)?;

        if self.logging {
            for sample in readings.iter().flat_map(|r| &r.samples) {
                if !sample.component.is_known() {
                    log_debug!("[{}] ignoring {}: {}", self.serial, sample.component, sample.value);
                }
            }
            if reconciled.components.is_empty() {
                log_info!("[{}] batch held no known components", self.serial);
            }
            for (component, value) in reconciled.components.iter() {
                log_info!("[{}] {}: {} {}", self.serial, component, value, component.unit());
            }
            log_info!("[{}] score: {}", self.serial, reconciled.average_score);
        }

        Ok(DeviceState::Nominal(self.nominal_state(&reconciled)))
    }

    /// Route reconciled components to their channels
    pub fn nominal_state(&self, reconciled: &ReconciledState) -> NominalState {
        // NaN when absent; flows into the VOC channel unchanged
        let temperature_c = reconciled
            .components
            .get(SensorComponentKind::Temperature)
            .unwrap_or(f64::NAN);

        let mut state = NominalState {
            temperature: None,
            humidity: None,
            co2: None,
            air_quality: AirQualityState {
                tier: score_to_quality_tier(reconciled.average_score),
                voc_density: None,
                pm10_density: None,
                pm25_density: None,
            },
        };

        for (component, value) in reconciled.components.iter() {
            match component {
                SensorComponentKind::Temperature => state.temperature = Some(value),
                SensorComponentKind::Humidity => state.humidity = Some(value),
                SensorComponentKind::Co2 => {
                    let detected = self.co2_detected(value);
                    if self.logging {
                        if detected {
                            log_info!("[{}] CO2 HIGH: {} >= {}", self.serial, value, self.co2_threshold_ppm);
                        } else {
                            log_info!("[{}] CO2 NORMAL: {} < {}", self.serial, value, self.co2_threshold_ppm);
                        }
                    }
                    state.co2 = Some(Co2State { level: value, detected });
                }
                SensorComponentKind::Voc => {
                    let tvoc = voc_to_mass_concentration(
                        value,
                        self.voc_molecular_weight,
                        SEA_LEVEL_ATMOSPHERES,
                        temperature_c,
                    );
                    if self.logging {
                        log_debug!(
                            "[{}] voc ({} ppb) => tvoc ({} ug/m^3) at {} C, mw {}",
                            self.serial, value, tvoc, temperature_c, self.voc_molecular_weight
                        );
                    }
                    state.air_quality.voc_density = Some(tvoc);
                }
                SensorComponentKind::Dust | SensorComponentKind::Pm10 => {
                    state.air_quality.pm10_density = Some(value);
                }
                SensorComponentKind::Pm25 => state.air_quality.pm25_density = Some(value),
                // dropped by the aggregator
                SensorComponentKind::Unknown => {}
            }
        }

        state
    }
}
