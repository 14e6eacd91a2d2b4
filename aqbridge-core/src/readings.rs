//! Reading Types Returned by the Air-Quality Source
//!
//! ## Overview
//!
//! One fetch returns a *batch*: an ordered sequence of [`ScoredReading`]s, each
//! covering one averaging period. A reading carries the raw samples measured in
//! that period plus the source's overall quality score for it.
//!
//! ```text
//! Batch
//! ├── ScoredReading { score: 85, samples: [temp 22.1, humid 45.0, co2 612, ...] }
//! ├── ScoredReading { score: 83, samples: [temp 22.3, humid 44.8, co2 640, ...] }
//! └── ...
//! ```
//!
//! ## Component Kinds
//!
//! The source names each sample with a short component string. Only the kinds
//! the publish step knows how to route are modeled; anything else becomes
//! [`SensorComponentKind::Unknown`] and is dropped during reconciliation.
//!
//! | Wire name | Kind          | Unit  |
//! |-----------|---------------|-------|
//! | `temp`    | Temperature   | °C    |
//! | `humid`   | Humidity      | %     |
//! | `co2`     | Co2           | ppm   |
//! | `voc`     | Voc           | ppb   |
//! | `dust`    | Dust          | µg/m³ |
//! | `pm25`    | Pm25          | µg/m³ |
//! | `pm10`    | Pm10          | µg/m³ |
//!
//! All types here are transient: they live for one polling cycle.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Sensor component enumeration
///
/// Closed set of measured quantities, plus `Unknown` for anything the source
/// adds later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SensorComponentKind {
    /// Air temperature (°C)
    Temperature = 0,
    /// Relative humidity (%)
    Humidity = 1,
    /// Carbon dioxide (ppm)
    Co2 = 2,
    /// Total volatile organic compounds (ppb)
    Voc = 3,
    /// Dust, reported by older devices in place of PM10
    Dust = 4,
    /// Fine particulate matter
    Pm25 = 5,
    /// Coarse particulate matter
    Pm10 = 6,
    /// Any component name not listed above
    Unknown = 255,
}

impl SensorComponentKind {
    /// Every kind that reconciliation keeps, in declaration order
    pub const KNOWN: [SensorComponentKind; 7] = [
        SensorComponentKind::Temperature,
        SensorComponentKind::Humidity,
        SensorComponentKind::Co2,
        SensorComponentKind::Voc,
        SensorComponentKind::Dust,
        SensorComponentKind::Pm25,
        SensorComponentKind::Pm10,
    ];

    /// Map a wire component name to its kind
    pub fn from_wire(name: &str) -> Self {
        match name {
            "temp" => SensorComponentKind::Temperature,
            "humid" => SensorComponentKind::Humidity,
            "co2" => SensorComponentKind::Co2,
            "voc" => SensorComponentKind::Voc,
            "dust" => SensorComponentKind::Dust,
            "pm25" => SensorComponentKind::Pm25,
            "pm10" => SensorComponentKind::Pm10,
            _ => SensorComponentKind::Unknown,
        }
    }

    /// Wire name of the component
    pub const fn name(&self) -> &'static str {
        match self {
            SensorComponentKind::Temperature => "temp",
            SensorComponentKind::Humidity => "humid",
            SensorComponentKind::Co2 => "co2",
            SensorComponentKind::Voc => "voc",
            SensorComponentKind::Dust => "dust",
            SensorComponentKind::Pm25 => "pm25",
            SensorComponentKind::Pm10 => "pm10",
            SensorComponentKind::Unknown => "unknown",
        }
    }

    /// Unit the source reports the component in
    pub const fn unit(&self) -> &'static str {
        match self {
            SensorComponentKind::Temperature => "°C",
            SensorComponentKind::Humidity => "%",
            SensorComponentKind::Co2 => "ppm",
            SensorComponentKind::Voc => "ppb",
            SensorComponentKind::Dust
            | SensorComponentKind::Pm25
            | SensorComponentKind::Pm10 => "µg/m³",
            SensorComponentKind::Unknown => "",
        }
    }

    /// Whether reconciliation keeps samples of this kind
    pub const fn is_known(&self) -> bool {
        !matches!(self, SensorComponentKind::Unknown)
    }
}

impl fmt::Display for SensorComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One measured quantity at one point in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSample {
    /// What was measured
    pub component: SensorComponentKind,
    /// Value in the component's source unit
    pub value: f64,
}

impl SensorSample {
    /// Create a sample
    pub const fn new(component: SensorComponentKind, value: f64) -> Self {
        Self { component, value }
    }
}

/// One reading period returned by the source
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoredReading {
    /// Samples measured in this period, in source order
    pub samples: Vec<SensorSample>,

    /// Overall air-quality score for the period (0-100)
    pub quality_score: f64,

    /// Period timestamp as reported by the source, if any
    pub timestamp: Option<String>,
}

impl ScoredReading {
    /// Reading with a score and no samples
    pub fn new(quality_score: f64) -> Self {
        Self {
            samples: Vec::new(),
            quality_score,
            timestamp: None,
        }
    }

    /// Add a sample (builder style)
    pub fn with_sample(mut self, component: SensorComponentKind, value: f64) -> Self {
        self.samples.push(SensorSample::new(component, value));
        self
    }

    /// Attach the source timestamp (builder style)
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}
