//! Unit tests for CSC value decoding and rate derivation.
//!
//! These tests run on the host and cover the pure decoding logic.

use super::measurement::decode;
use super::{CscFeature, CscMeasurement, RevolutionRate, SensorLocation};
use crate::error::Error;

// ═══════════════════════════════════════════════════════════════════════════
// CSC Measurement Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn measurement_flags_only() {
    let m = CscMeasurement::from_ble_bytes(&[0x00]).unwrap();
    assert!(!m.is_wheel_rev_data_present());
    assert!(!m.is_crank_rev_data_present());
    assert_eq!(m.encoded_len(), 1);
}

#[test]
fn measurement_wheel_only() {
    let data = [0x01, 0x05, 0x00, 0x00, 0x00, 0x10, 0x00];
    let m = decode(&data).unwrap();

    let wheel = m.wheel.unwrap();
    assert_eq!(wheel.cumulative_revolutions, 5);
    assert_eq!(wheel.last_event_time, 16);
    assert!(!m.is_crank_rev_data_present());
    assert_eq!(m.encoded_len(), 7);
}

#[test]
fn measurement_wheel_and_crank() {
    let data = [
        0x03, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x00, 0x03, 0x00,
    ];
    let m = decode(&data).unwrap();

    let wheel = m.wheel.unwrap();
    assert_eq!(wheel.cumulative_revolutions, 10);
    assert_eq!(wheel.last_event_time, 256);

    let crank = m.crank.unwrap();
    assert_eq!(crank.cumulative_revolutions, 2);
    assert_eq!(crank.last_event_time, 3);
    assert_eq!(m.encoded_len(), data.len());
}

#[test]
fn measurement_crank_only_starts_after_flags() {
    // No wheel block: crank data begins at offset 1.
    let data = [0x02, 0x34, 0x12, 0x00, 0x80];
    let m = decode(&data).unwrap();

    assert!(m.wheel.is_none());
    let crank = m.crank.unwrap();
    assert_eq!(crank.cumulative_revolutions, 0x1234);
    assert_eq!(crank.last_event_time, 0x8000);
}

#[test]
fn measurement_full_range_values() {
    let data = [0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
    let wheel = decode(&data).unwrap().wheel.unwrap();
    assert_eq!(wheel.cumulative_revolutions, u32::MAX);
    assert_eq!(wheel.last_event_time, u16::MAX);
}

#[test]
fn measurement_reserved_flag_bits_ignored() {
    let m = decode(&[0xFC]).unwrap();
    assert_eq!(m, CscMeasurement::default());
}

#[test]
fn measurement_trailing_bytes_ignored() {
    let data = [0x02, 0x01, 0x00, 0x02, 0x00, 0xAA, 0xBB];
    let m = decode(&data).unwrap();
    assert_eq!(m.crank.unwrap().cumulative_revolutions, 1);
    assert_eq!(m.encoded_len(), 5);
}

#[test]
fn measurement_empty_payload_fails() {
    assert_eq!(decode(&[]), Err(Error::MalformedPayload));
}

#[test]
fn measurement_short_wheel_block_fails() {
    assert_eq!(decode(&[0x01]), Err(Error::MalformedPayload));
    assert_eq!(
        decode(&[0x01, 0x05, 0x00, 0x00, 0x00, 0x10]),
        Err(Error::MalformedPayload)
    );
}

#[test]
fn measurement_short_crank_block_fails() {
    assert_eq!(decode(&[0x02, 0x01, 0x00, 0x02]), Err(Error::MalformedPayload));

    // Wheel block complete, crank block truncated.
    let data = [0x03, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x00, 0x03];
    assert_eq!(decode(&data), Err(Error::MalformedPayload));
}

// ═══════════════════════════════════════════════════════════════════════════
// Feature / Sensor Location Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn feature_bits() {
    let f = CscFeature::from_ble_bytes(&[0x03, 0x00]).unwrap();
    assert!(f.wheel_revolution_data_supported());
    assert!(f.crank_revolution_data_supported());
    assert!(!f.multiple_sensor_locations_supported());

    let f = CscFeature::from_ble_bytes(&[0x04, 0x00]).unwrap();
    assert!(f.multiple_sensor_locations_supported());
    assert!(!f.wheel_revolution_data_supported());
}

#[test]
fn feature_short_payload_fails() {
    assert_eq!(CscFeature::from_ble_bytes(&[0x03]), Err(Error::MalformedPayload));
}

#[test]
fn sensor_location_known_and_reserved() {
    assert_eq!(
        SensorLocation::from_ble_bytes(&[4]).unwrap(),
        SensorLocation::FrontWheel
    );
    assert_eq!(SensorLocation::from(16), SensorLocation::ChainRing);
    assert_eq!(SensorLocation::from(17), SensorLocation::Unknown(17));
    assert_eq!(SensorLocation::from_ble_bytes(&[]), Err(Error::MalformedPayload));
}

// ═══════════════════════════════════════════════════════════════════════════
// Revolution Rate Tests
// ═══════════════════════════════════════════════════════════════════════════

fn wheel(revs: u32, time: u16) -> CscMeasurement {
    let mut data = [0x01, 0, 0, 0, 0, 0, 0];
    data[1..5].copy_from_slice(&revs.to_le_bytes());
    data[5..7].copy_from_slice(&time.to_le_bytes());
    decode(&data).unwrap()
}

fn crank(revs: u16, time: u16) -> CscMeasurement {
    let mut data = [0x02, 0, 0, 0, 0];
    data[1..3].copy_from_slice(&revs.to_le_bytes());
    data[3..5].copy_from_slice(&time.to_le_bytes());
    decode(&data).unwrap()
}

#[test]
fn rate_wheel_rpm() {
    // 2 revolutions in 1024 ticks (1 s).
    let rate = RevolutionRate::between(&wheel(100, 0), &wheel(102, 1024));
    assert_eq!(rate.wheel_rpm, Some(120.0));
    assert_eq!(rate.crank_rpm, None);
}

#[test]
fn rate_crank_handles_time_rollover() {
    // 1 revolution in 512 ticks across the 16-bit wrap.
    let rate = RevolutionRate::between(&crank(10, 65280), &crank(11, 256));
    assert_eq!(rate.crank_rpm, Some(120.0));
}

#[test]
fn rate_counter_rollover() {
    let rate = RevolutionRate::between(&crank(u16::MAX, 0), &crank(0, 1024));
    assert_eq!(rate.crank_rpm, Some(60.0));
}

#[test]
fn rate_zero_time_delta_is_none() {
    let rate = RevolutionRate::between(&wheel(5, 300), &wheel(5, 300));
    assert_eq!(rate.wheel_rpm, None);
}

#[test]
fn rate_wheel_speed() {
    let rate = RevolutionRate::between(&wheel(0, 0), &wheel(2, 1024));
    let kmh = rate.wheel_speed_kmh(2100).unwrap();
    assert!((kmh - 15.12).abs() < 0.01);
}
