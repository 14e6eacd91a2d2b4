//! Common test utilities for engine integration tests
//!
//! This module provides:
//! - A scripted fetch client with a call counter and optional latency
//! - A recording sink that keeps every channel write in order
//! - Device configurations and response bodies used across scenarios

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use aqbridge_connectors::{wire, FetchClient, FetchError};
use aqbridge_core::{DeviceConfig, DeviceStateSink, QualityTier, ScoredReading};

/// Fetch client that replays queued results, then repeats a fallback
pub struct ScriptedFetcher {
    queue: Mutex<VecDeque<Result<Vec<ScoredReading>, FetchError>>>,
    fallback: Result<Vec<ScoredReading>, String>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedFetcher {
    /// Always answer with `body` decoded through the wire format
    pub fn json(body: &str) -> Self {
        Self::always(wire::parse_batch(body).expect("test body must decode"))
    }

    pub fn always(batch: Vec<ScoredReading>) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: Ok(batch),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Always fail with a transport error
    pub fn failing(message: &str) -> Self {
        Self {
            fallback: Err(message.to_string()),
            ..Self::always(Vec::new())
        }
    }

    /// Queue a one-off result ahead of the fallback
    pub fn then(self, result: Result<Vec<ScoredReading>, FetchError>) -> Self {
        self.queue.lock().unwrap().push_back(result);
        self
    }

    /// Hold every fetch for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Shared handle to the number of fetches started
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait::async_trait]
impl FetchClient for ScriptedFetcher {
    async fn fetch(&self) -> Result<Vec<ScoredReading>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let queued = self.queue.lock().unwrap().pop_front();
        match queued {
            Some(result) => result,
            None => match &self.fallback {
                Ok(batch) => Ok(batch.clone()),
                Err(message) => Err(FetchError::Request(message.clone())),
            },
        }
    }
}

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

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub writes: Vec<SinkWrite>,
}

impl RecordingSink {
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

    /// Writes of the most recent `n` channels
    pub fn last(&self, n: usize) -> &[SinkWrite] {
        &self.writes[self.writes.len().saturating_sub(n)..]
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

/// Device polled every `interval` seconds
pub fn device(device_type: &str, interval: i64) -> DeviceConfig {
    DeviceConfig::new(device_type, "4242", "test-token").polling_interval_secs(interval)
}

/// Two 15-minute periods, newest first
pub const OFFICE_RESPONSE: &str = r#"{"data":[
    {"timestamp":"2024-03-01T12:15:00.000Z","score":88,
     "sensors":[{"comp":"temp","value":22.0},{"comp":"humid","value":40.0},
                {"comp":"co2","value":1300},{"comp":"voc","value":450},
                {"comp":"pm25","value":8}]},
    {"timestamp":"2024-03-01T12:00:00.000Z","score":84,
     "sensors":[{"comp":"temp","value":24.0},{"comp":"humid","value":42.0},
                {"comp":"co2","value":1100},{"comp":"voc","value":450},
                {"comp":"pm25","value":6},{"comp":"lux","value":310}]}
]}"#;
