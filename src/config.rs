//! Protocol constants and compile-time configuration.
//!
//! UUIDs, descriptor values and fixed capacities live here so they can be
//! tuned in one place.

// GATT identifiers (Bluetooth SIG assigned numbers)

/// Cycling Speed and Cadence service.
pub const UUID_CSC_SERVICE: u16 = 0x1816;

/// CSC Measurement characteristic (notify).
pub const UUID_CSC_MEASUREMENT: u16 = 0x2A5B;

/// CSC Feature characteristic (read).
pub const UUID_CSC_FEATURE: u16 = 0x2A5C;

/// Sensor Location characteristic (read).
pub const UUID_SENSOR_LOCATION: u16 = 0x2A5D;

// Client Characteristic Configuration Descriptor

/// CCCD value length in bytes.
pub const CCCD_VALUE_LEN: usize = 2;

/// CCCD bit enabling notifications.
pub const CCCD_NOTIFICATION: u16 = 0x0001;

/// CCCD bit enabling indications.
pub const CCCD_INDICATION: u16 = 0x0002;

/// Largest value the client ever writes. Only CCCD writes are issued.
pub const MAX_WRITE_LEN: usize = CCCD_VALUE_LEN;

// CSC Measurement layout

/// Flags bit: Wheel Revolution Data present.
pub const CSCM_FLAG_WHEEL_PRESENT: u8 = 1 << 0;

/// Flags bit: Crank Revolution Data present.
pub const CSCM_FLAG_CRANK_PRESENT: u8 = 1 << 1;

/// Event times count in 1/1024 s and wrap at 64 s.
pub const EVENT_TIME_TICKS_PER_SEC: u32 = 1024;

// Dispatch

/// Priority new CSC client instances register with.
/// Lower values are dispatched first.
pub const CSCS_OBSERVER_PRIO: u8 = 2;

/// Maximum listeners a single dispatcher fans out to.
pub const MAX_OBSERVERS: usize = 8;
