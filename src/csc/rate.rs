//! Speed and cadence derived from two consecutive measurements.
//!
//! Both revolution counters and event times wrap; deltas use wrapping
//! subtraction so a single rollover between samples is handled. Event
//! times tick at 1/1024 s, so the longest measurable gap is 64 s.

use crate::config::EVENT_TIME_TICKS_PER_SEC;
use crate::csc::CscMeasurement;

/// Revolution rates between two measurements, in revolutions per minute.
///
/// A block is `None` when either sample lacks it or no event time elapsed
/// (sensor reported the same event again).
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RevolutionRate {
    pub wheel_rpm: Option<f32>,
    pub crank_rpm: Option<f32>,
}

impl RevolutionRate {
    pub fn between(previous: &CscMeasurement, current: &CscMeasurement) -> Self {
        let wheel_rpm = match (previous.wheel, current.wheel) {
            (Some(prev), Some(curr)) => rpm(
                curr.cumulative_revolutions
                    .wrapping_sub(prev.cumulative_revolutions),
                curr.last_event_time.wrapping_sub(prev.last_event_time),
            ),
            _ => None,
        };

        let crank_rpm = match (previous.crank, current.crank) {
            (Some(prev), Some(curr)) => rpm(
                u32::from(
                    curr.cumulative_revolutions
                        .wrapping_sub(prev.cumulative_revolutions),
                ),
                curr.last_event_time.wrapping_sub(prev.last_event_time),
            ),
            _ => None,
        };

        Self {
            wheel_rpm,
            crank_rpm,
        }
    }

    /// Wheel speed in km/h for a wheel of the given circumference (mm).
    pub fn wheel_speed_kmh(&self, circumference_mm: u32) -> Option<f32> {
        // rpm * mm -> mm/min; * 60 / 1_000_000 -> km/h
        self.wheel_rpm
            .map(|rpm| rpm * circumference_mm as f32 * 60.0 / 1_000_000.0)
    }
}

fn rpm(revolutions: u32, ticks: u16) -> Option<f32> {
    if ticks == 0 {
        return None;
    }
    let seconds = f32::from(ticks) / EVENT_TIME_TICKS_PER_SEC as f32;
    Some(revolutions as f32 * 60.0 / seconds)
}
