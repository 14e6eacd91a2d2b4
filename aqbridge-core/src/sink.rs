//! Device State and the Sink It Is Published To
//!
//! ## Overview
//!
//! A [`DeviceStateSink`] is whatever hub or bus shows the device to users. It
//! exposes four logical channels:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Temperature   value (°C)                        fault    │
//! │ Humidity      value (%)                         fault    │
//! │ CO2           level (ppm), detected             fault    │
//! │ AirQuality    tier, VOC / PM10 / PM2.5 (µg/m³)  fault    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! `None` in any value slot means "unavailable". The fault flag tells the hub
//! whether the write is live data or a failure placeholder.
//!
//! ## One Write Per Cycle
//!
//! Each cycle produces exactly one [`DeviceState`] and publishes it whole:
//! every applicable channel gets written, so no channel keeps a fault flag from
//! an earlier cycle once a later one succeeds. Devices without CO2 hardware
//! never see a CO2 write.

use crate::convert::QualityTier;

/// Multi-channel publisher that receives device state each cycle
pub trait DeviceStateSink {
    /// Publish the temperature channel (°C)
    fn write_temperature(&mut self, value: Option<f64>, fault: bool);

    /// Publish the relative humidity channel (%)
    fn write_humidity(&mut self, value: Option<f64>, fault: bool);

    /// Publish the CO2 channel (ppm) and its threshold signal
    fn write_co2(&mut self, level: Option<f64>, detected: Option<bool>, fault: bool);

    /// Publish the air-quality channel with its particle and VOC densities (µg/m³)
    fn write_air_quality(
        &mut self,
        tier: Option<QualityTier>,
        voc_density: Option<f64>,
        pm10_density: Option<f64>,
        pm25_density: Option<f64>,
        fault: bool,
    );
}

impl<S: DeviceStateSink + ?Sized> DeviceStateSink for &mut S {
    fn write_temperature(&mut self, value: Option<f64>, fault: bool) {
        (**self).write_temperature(value, fault);
    }

    fn write_humidity(&mut self, value: Option<f64>, fault: bool) {
        (**self).write_humidity(value, fault);
    }

    fn write_co2(&mut self, level: Option<f64>, detected: Option<bool>, fault: bool) {
        (**self).write_co2(level, detected, fault);
    }

    fn write_air_quality(
        &mut self,
        tier: Option<QualityTier>,
        voc_density: Option<f64>,
        pm10_density: Option<f64>,
        pm25_density: Option<f64>,
        fault: bool,
    ) {
        (**self).write_air_quality(tier, voc_density, pm10_density, pm25_density, fault);
    }
}

/// CO2 channel contents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Co2State {
    /// Level in ppm
    pub level: f64,
    /// Level is at or over the configured threshold
    pub detected: bool,
}

/// Air-quality channel contents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirQualityState {
    /// Tier derived from the mean batch score
    pub tier: QualityTier,
    /// VOC mass concentration in µg/m³
    pub voc_density: Option<f64>,
    /// PM10 (or dust) density in µg/m³
    pub pm10_density: Option<f64>,
    /// PM2.5 density in µg/m³
    pub pm25_density: Option<f64>,
}

/// Live values for every channel after a successful cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NominalState {
    /// Degrees Celsius
    pub temperature: Option<f64>,
    /// Relative humidity in percent
    pub humidity: Option<f64>,
    /// `None` when the batch had no CO2 component
    pub co2: Option<Co2State>,
    pub air_quality: AirQualityState,
}

/// State written to the sink once per cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceState {
    /// Fetch and reconciliation succeeded
    Nominal(NominalState),
    /// Cycle failed: every channel unavailable with its fault flag set
    Fault,
}

impl DeviceState {
    /// True for the fault state
    pub const fn is_fault(&self) -> bool {
        matches!(self, DeviceState::Fault)
    }

    /// Write this state to every channel the device has
    pub fn publish<S: DeviceStateSink + ?Sized>(&self, sink: &mut S, has_co2_channel: bool) {
        match self {
            DeviceState::Nominal(state) => {
                sink.write_temperature(state.temperature, false);
                sink.write_humidity(state.humidity, false);
                if has_co2_channel {
                    sink.write_co2(
                        state.co2.map(|co2| co2.level),
                        state.co2.map(|co2| co2.detected),
                        false,
                    );
                }
                let aq = &state.air_quality;
                sink.write_air_quality(
                    Some(aq.tier),
                    aq.voc_density,
                    aq.pm10_density,
                    aq.pm25_density,
                    false,
                );
            }
            DeviceState::Fault => {
                sink.write_temperature(None, true);
                sink.write_humidity(None, true);
                if has_co2_channel {
                    sink.write_co2(None, None, true);
                }
                sink.write_air_quality(None, None, None, None, true);
            }
        }
    }
}
