//! CSC Feature (0x2A5C) and Sensor Location (0x2A5D) values.

use crate::error::Error;

/// CSC Feature bitfield (u16, little-endian on the wire).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CscFeature(pub u16);

impl CscFeature {
    pub const WHEEL_REVOLUTION_DATA: u16 = 1 << 0;
    pub const CRANK_REVOLUTION_DATA: u16 = 1 << 1;
    pub const MULTIPLE_SENSOR_LOCATIONS: u16 = 1 << 2;

    /// Parse from a raw read response. Extra bytes (reserved for future use) are ignored.
    pub fn from_ble_bytes(data: &[u8]) -> Result<Self, Error> {
        match data {
            [lo, hi, ..] => Ok(Self(u16::from_le_bytes([*lo, *hi]))),
            _ => Err(Error::MalformedPayload),
        }
    }

    pub fn wheel_revolution_data_supported(&self) -> bool {
        self.0 & Self::WHEEL_REVOLUTION_DATA != 0
    }

    pub fn crank_revolution_data_supported(&self) -> bool {
        self.0 & Self::CRANK_REVOLUTION_DATA != 0
    }

    pub fn multiple_sensor_locations_supported(&self) -> bool {
        self.0 & Self::MULTIPLE_SENSOR_LOCATIONS != 0
    }
}

/// Mounting position reported by the Sensor Location characteristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorLocation {
    Other,
    TopOfShoe,
    InShoe,
    Hip,
    FrontWheel,
    LeftCrank,
    RightCrank,
    LeftPedal,
    RightPedal,
    FrontHub,
    RearDropout,
    Chainstay,
    RearWheel,
    RearHub,
    Chest,
    Spider,
    ChainRing,
    /// Reserved for future use.
    Unknown(u8),
}

impl From<u8> for SensorLocation {
    fn from(code: u8) -> Self {
        match code {
            0 => SensorLocation::Other,
            1 => SensorLocation::TopOfShoe,
            2 => SensorLocation::InShoe,
            3 => SensorLocation::Hip,
            4 => SensorLocation::FrontWheel,
            5 => SensorLocation::LeftCrank,
            6 => SensorLocation::RightCrank,
            7 => SensorLocation::LeftPedal,
            8 => SensorLocation::RightPedal,
            9 => SensorLocation::FrontHub,
            10 => SensorLocation::RearDropout,
            11 => SensorLocation::Chainstay,
            12 => SensorLocation::RearWheel,
            13 => SensorLocation::RearHub,
            14 => SensorLocation::Chest,
            15 => SensorLocation::Spider,
            16 => SensorLocation::ChainRing,
            other => SensorLocation::Unknown(other),
        }
    }
}

impl SensorLocation {
    pub fn from_ble_bytes(data: &[u8]) -> Result<Self, Error> {
        data.first()
            .copied()
            .map(SensorLocation::from)
            .ok_or(Error::MalformedPayload)
    }
}
