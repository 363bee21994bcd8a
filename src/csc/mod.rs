//! Cycling Speed and Cadence data types and value decoders.
//!
//! Everything in here is pure: no connection state, no I/O. The client in
//! [`crate::ble`] feeds raw attribute values in and gets typed records out.

pub mod feature;
pub mod measurement;
pub mod rate;

#[cfg(test)]
mod tests;

pub use feature::{CscFeature, SensorLocation};
pub use measurement::{CrankRevolutionData, CscMeasurement, WheelRevolutionData};
pub use rate::RevolutionRate;
