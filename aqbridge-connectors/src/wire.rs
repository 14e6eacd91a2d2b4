//! Air-Data Wire Format
//!
//! The data API answers every air-data request with the same JSON shape:
//!
//! ```json
//! {
//!   "data": [
//!     {
//!       "timestamp": "2024-03-01T12:15:00.000Z",
//!       "score": 85,
//!       "sensors": [
//!         { "comp": "temp", "value": 22.1 },
//!         { "comp": "humid", "value": 45.0 },
//!         { "comp": "co2", "value": 612 }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Raw endpoints use `"sensors"`; averaged endpoints use the same key, so one
//! decoder covers all four. Extra keys (`indices`, ...) are ignored. A body
//! without `data` is a parse error, never an empty batch.

use aqbridge_core::{ScoredReading, SensorComponentKind};
use serde::Deserialize;

use crate::FetchError;

#[derive(Debug, Deserialize)]
struct AirDataResponse {
    data: Vec<AirDataPeriod>,
}

#[derive(Debug, Deserialize)]
struct AirDataPeriod {
    #[serde(default)]
    timestamp: Option<String>,
    score: f64,
    #[serde(default)]
    sensors: Vec<AirDataSensor>,
}

#[derive(Debug, Deserialize)]
struct AirDataSensor {
    comp: String,
    value: f64,
}

impl From<AirDataPeriod> for ScoredReading {
    fn from(period: AirDataPeriod) -> Self {
        let reading = period
            .sensors
            .into_iter()
            .fold(ScoredReading::new(period.score), |reading, sensor| {
                reading.with_sample(SensorComponentKind::from_wire(&sensor.comp), sensor.value)
            });

        match period.timestamp {
            Some(timestamp) => reading.with_timestamp(timestamp),
            None => reading,
        }
    }
}

/// Decode an air-data response body into a batch, preserving order
pub fn parse_batch(body: &str) -> Result<Vec<ScoredReading>, FetchError> {
    let response: AirDataResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    Ok(response.data.into_iter().map(ScoredReading::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqbridge_core::SensorSample;

    #[test]
    fn parses_periods_in_order() {
        let body = r#"{"data":[
            {"timestamp":"2024-03-01T12:15:00.000Z","score":85,
             "sensors":[{"comp":"temp","value":22.1},{"comp":"co2","value":612}]},
            {"timestamp":"2024-03-01T12:00:00.000Z","score":80,
             "sensors":[{"comp":"temp","value":21.9}]}
        ]}"#;
        let batch = parse_batch(body).unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].quality_score, 85.0);
        assert_eq!(batch[0].samples[1], SensorSample::new(SensorComponentKind::Co2, 612.0));
        assert_eq!(batch[1].timestamp.as_deref(), Some("2024-03-01T12:00:00.000Z"));
    }

    #[test]
    fn unknown_components_survive_as_unknown() {
        let body = r#"{"data":[{"score":70,"sensors":[{"comp":"lux","value":300}]}]}"#;
        let batch = parse_batch(body).unwrap();

        assert_eq!(batch[0].samples[0].component, SensorComponentKind::Unknown);
        assert!(batch[0].timestamp.is_none());
    }

    #[test]
    fn empty_data_is_an_empty_batch() {
        assert!(parse_batch(r#"{"data":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn missing_data_is_a_parse_error() {
        let result = parse_batch(r#"{"message":"Unauthorized"}"#);
        assert!(matches!(result, Err(FetchError::Parse(_))));
    }

    #[test]
    fn extra_keys_are_ignored() {
        let body = r#"{"data":[{"score":91,"sensors":[],"indices":[{"comp":"temp","value":0}]}]}"#;
        let batch = parse_batch(body).unwrap();

        assert_eq!(batch[0].quality_score, 91.0);
        assert!(batch[0].samples.is_empty());
    }
}
