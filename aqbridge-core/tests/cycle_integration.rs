//! Integration tests for the per-cycle derivation and publish path
//!
//! Exercises the full synchronous flow a polling cycle runs after its fetch:
//! batch → reconcile → convert → publish to a sink.

mod common;

use aqbridge_core::{
    constants::physics::DEFAULT_VOC_MOLECULAR_WEIGHT_G_PER_MOL, voc_to_mass_concentration,
    CycleSettings, DeviceConfig, DeviceState, QualityTier, SensorComponentKind::*,
};

use common::{indoor_batch, reading, RecordingSink, SinkWrite};

fn publish(settings: &CycleSettings, batch: &[aqbridge_core::ScoredReading], sink: &mut RecordingSink) {
    let state = settings.derive(batch).unwrap_or(DeviceState::Fault);
    state.publish(sink, settings.has_co2_channel);
}

#[test]
fn indoor_batch_publishes_every_channel() {
    let settings = DeviceConfig::new("awair-r2", "1", "t")
        .co2_threshold(800.0)
        .cycle_settings();
    let mut sink = RecordingSink::new();

    publish(&settings, &indoor_batch(), &mut sink);

    let tvoc = voc_to_mass_concentration(300.0, DEFAULT_VOC_MOLECULAR_WEIGHT_G_PER_MOL, 1.0, 22.0);
    assert_eq!(
        sink.writes,
        vec![
            SinkWrite::Temperature { value: Some(22.0), fault: false },
            SinkWrite::Humidity { value: Some(45.0), fault: false },
            SinkWrite::Co2 { level: Some(600.0), detected: Some(false), fault: false },
            SinkWrite::AirQuality {
                tier: Some(QualityTier::Good),
                voc: Some(tvoc),
                pm10: None,
                pm25: None,
                fault: false,
            },
        ]
    );
}

#[test]
fn empty_batch_publishes_fault_everywhere() {
    let settings = DeviceConfig::new("awair-r2", "1", "t").cycle_settings();
    let mut sink = RecordingSink::new();

    publish(&settings, &[], &mut sink);

    assert_eq!(sink.writes.len(), 4);
    assert!(sink.all_faulted());
    assert!(sink.writes.contains(&SinkWrite::AirQuality {
        tier: None,
        voc: None,
        pm10: None,
        pm25: None,
        fault: true,
    }));
}

#[test]
fn mint_fault_skips_co2() {
    let settings = DeviceConfig::new("awair-mint", "1", "t").cycle_settings();
    let mut sink = RecordingSink::new();

    publish(&settings, &[], &mut sink);

    assert_eq!(sink.co2_writes(), 0);
    assert_eq!(sink.writes.len(), 3);
    assert!(sink.all_faulted());
}

#[test]
fn mint_success_skips_co2_even_with_samples() {
    let settings = DeviceConfig::new("awair-mint", "1", "t").cycle_settings();
    let mut sink = RecordingSink::new();

    publish(&settings, &[reading(70.0, &[(Co2, 900.0), (Temperature, 20.0)])], &mut sink);

    assert_eq!(sink.co2_writes(), 0);
    assert!(sink.none_faulted());
}

#[test]
fn success_after_failure_clears_every_fault() {
    let settings = DeviceConfig::new("awair", "1", "t").cycle_settings();
    let mut sink = RecordingSink::new();

    publish(&settings, &[], &mut sink);
    assert!(sink.all_faulted());

    sink.clear();
    publish(&settings, &[reading(55.0, &[(Humidity, 61.0)])], &mut sink);

    // Channels without data are still written, with their fault cleared
    assert_eq!(sink.writes.len(), 4);
    assert!(sink.none_faulted());
    assert!(sink.writes.contains(&SinkWrite::Temperature { value: None, fault: false }));
    assert!(sink.writes.contains(&SinkWrite::AirQuality {
        tier: Some(QualityTier::Inferior),
        voc: None,
        pm10: None,
        pm25: None,
        fault: false,
    }));
}

#[test]
fn co2_over_threshold_is_detected() {
    let settings = DeviceConfig::new("awair", "1", "t")
        .co2_threshold(1000.0)
        .cycle_settings();
    let mut sink = RecordingSink::new();

    publish(
        &settings,
        &[reading(40.0, &[(Co2, 900.0)]), reading(40.0, &[(Co2, 1300.0)])],
        &mut sink,
    );

    assert!(sink.writes.contains(&SinkWrite::Co2 {
        level: Some(1100.0),
        detected: Some(true),
        fault: false,
    }));
}

#[test]
fn multi_period_batch_reconciles_before_routing() {
    let settings = DeviceConfig::new("awair-omni", "1", "t").cycle_settings();
    let mut sink = RecordingSink::new();
    let batch = [
        reading(92.0, &[(Temperature, 20.0), (Pm25, 4.0), (Dust, 10.0)]),
        reading(90.0, &[(Temperature, 22.0), (Pm25, 6.0), (Pm10, 14.0)]),
        reading(88.0, &[(Temperature, 24.0), (Pm25, 8.0), (Pm10, 18.0)]),
    ];

    publish(&settings, &batch, &mut sink);

    assert!(sink.writes.contains(&SinkWrite::Temperature { value: Some(22.5), fault: false }));
    // Dust observed first, PM10 later: PM10's running value lands on the channel
    assert!(sink.writes.contains(&SinkWrite::AirQuality {
        tier: Some(QualityTier::Excellent),
        voc: None,
        pm10: Some(16.0),
        pm25: Some(6.5),
        fault: false,
    }));
}

#[test]
fn identical_batches_publish_identical_state() {
    let settings = DeviceConfig::new("awair", "1", "t").co2_threshold(700.0).cycle_settings();
    let mut first = RecordingSink::new();
    let mut second = RecordingSink::new();

    publish(&settings, &indoor_batch(), &mut first);
    publish(&settings, &indoor_batch(), &mut second);

    assert_eq!(first.writes, second.writes);
}
