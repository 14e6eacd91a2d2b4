//! Common test utilities for integration tests
//!
//! This module provides:
//! - A recording sink that keeps every channel write in order
//! - Batch builders for typical device responses

#![allow(dead_code)]

use aqbridge_core::{
    DeviceStateSink, QualityTier, ScoredReading,
    SensorComponentKind::{self, *},
};

/// One write observed by [`RecordingSink`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SinkWrite {
    Temperature {
        value: Option<f64>,
        fault: bool,
    },
    Humidity {
        value: Option<f64>,
        fault: bool,
    },
    Co2 {
        level: Option<f64>,
        detected: Option<bool>,
        fault: bool,
    },
    AirQuality {
        tier: Option<QualityTier>,
        voc: Option<f64>,
        pm10: Option<f64>,
        pm25: Option<f64>,
        fault: bool,
    },
}

impl SinkWrite {
    pub fn fault(&self) -> bool {
        match self {
            SinkWrite::Temperature { fault, .. }
            | SinkWrite::Humidity { fault, .. }
            | SinkWrite::Co2 { fault, .. }
            | SinkWrite::AirQuality { fault, .. } => *fault,
        }
    }
}

/// Sink that records writes instead of publishing them
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub writes: Vec<SinkWrite>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }

    pub fn co2_writes(&self) -> usize {
        self.writes
            .iter()
            .filter(|w| matches!(w, SinkWrite::Co2 { .. }))
            .count()
    }

    pub fn all_faulted(&self) -> bool {
        !self.writes.is_empty() && self.writes.iter().all(SinkWrite::fault)
    }

    pub fn none_faulted(&self) -> bool {
        !self.writes.is_empty() && self.writes.iter().all(|w| !w.fault())
    }
}

impl DeviceStateSink for RecordingSink {
    fn write_temperature(&mut self, value: Option<f64>, fault: bool) {
        self.writes.push(SinkWrite::Temperature { value, fault });
    }

    fn write_humidity(&mut self, value: Option<f64>, fault: bool) {
        self.writes.push(SinkWrite::Humidity { value, fault });
    }

    fn write_co2(&mut self, level: Option<f64>, detected: Option<bool>, fault: bool) {
        self.writes.push(SinkWrite::Co2 { level, detected, fault });
    }

    fn write_air_quality(
        &mut self,
        tier: Option<QualityTier>,
        voc: Option<f64>,
        pm10: Option<f64>,
        pm25: Option<f64>,
        fault: bool,
    ) {
        self.writes.push(SinkWrite::AirQuality { tier, voc, pm10, pm25, fault });
    }
}

/// Build a reading from `(kind, value)` pairs
pub fn reading(score: f64, samples: &[(SensorComponentKind, f64)]) -> ScoredReading {
    samples
        .iter()
        .fold(ScoredReading::new(score), |r, &(kind, value)| r.with_sample(kind, value))
}

/// Single-period batch from a typical indoor room
pub fn indoor_batch() -> Vec<ScoredReading> {
    vec![reading(
        85.0,
        &[(Temperature, 22.0), (Humidity, 45.0), (Co2, 600.0), (Voc, 300.0)],
    )]
}
