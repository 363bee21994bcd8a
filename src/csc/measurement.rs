//! CSC Measurement characteristic (0x2A5B) decoder.
//!
//! Layout (little-endian, positional):
//! ```text
//! Byte 0:      Flags
//!              Bit 0 = Wheel Revolution Data present
//!              Bit 1 = Crank Revolution Data present
//! If bit 0:    u32 cumulative wheel revolutions
//!              u16 last wheel event time (1/1024 s)
//! If bit 1:    u16 cumulative crank revolutions
//!              u16 last crank event time (1/1024 s)
//! ```
//! The optional blocks are not tagged; the crank block starts wherever the
//! wheel block (if any) ended.

use crate::config::{CSCM_FLAG_CRANK_PRESENT, CSCM_FLAG_WHEEL_PRESENT};
use crate::error::Error;

/// Flags byte size.
const FLAGS_SIZE: usize = 1;

/// Wheel Revolution Data block size.
pub const WHEEL_DATA_SIZE: usize = 6;

/// Crank Revolution Data block size.
pub const CRANK_DATA_SIZE: usize = 4;

/// Wheel Revolution Data block.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WheelRevolutionData {
    /// Cumulative wheel revolutions.
    pub cumulative_revolutions: u32,
    /// Last wheel event time, 1/1024 s, wraps.
    pub last_event_time: u16,
}

/// Crank Revolution Data block.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CrankRevolutionData {
    /// Cumulative crank revolutions.
    pub cumulative_revolutions: u16,
    /// Last crank event time, 1/1024 s, wraps.
    pub last_event_time: u16,
}

/// One decoded CSC Measurement notification.
///
/// Each block is `Some` exactly when its presence flag was set.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CscMeasurement {
    pub wheel: Option<WheelRevolutionData>,
    pub crank: Option<CrankRevolutionData>,
}

impl CscMeasurement {
    /// Parse from raw BLE notification bytes.
    ///
    /// Fails with [`Error::MalformedPayload`] when the payload is shorter
    /// than its flags require. Bytes past the declared blocks are ignored.
    pub fn from_ble_bytes(data: &[u8]) -> Result<Self, Error> {
        let mut reader = Reader::new(data);

        let flags = reader.read_u8()?;
        let mut measurement = CscMeasurement::default();

        if flags & CSCM_FLAG_WHEEL_PRESENT != 0 {
            measurement.wheel = Some(WheelRevolutionData {
                cumulative_revolutions: reader.read_u32_le()?,
                last_event_time: reader.read_u16_le()?,
            });
        }

        if flags & CSCM_FLAG_CRANK_PRESENT != 0 {
            measurement.crank = Some(CrankRevolutionData {
                cumulative_revolutions: reader.read_u16_le()?,
                last_event_time: reader.read_u16_le()?,
            });
        }

        Ok(measurement)
    }

    pub fn is_wheel_rev_data_present(&self) -> bool {
        self.wheel.is_some()
    }

    pub fn is_crank_rev_data_present(&self) -> bool {
        self.crank.is_some()
    }

    /// Number of payload bytes this measurement occupies on the wire.
    pub fn encoded_len(&self) -> usize {
        let mut len = FLAGS_SIZE;
        if self.wheel.is_some() {
            len += WHEEL_DATA_SIZE;
        }
        if self.crank.is_some() {
            len += CRANK_DATA_SIZE;
        }
        len
    }
}

/// Decode a CSC Measurement payload. Alias for [`CscMeasurement::from_ble_bytes`].
pub fn decode(data: &[u8]) -> Result<CscMeasurement, Error> {
    CscMeasurement::from_ble_bytes(data)
}

/// Bounds-checked little-endian reader with a running offset.
struct Reader<'d> {
    buf: &'d [u8],
    pos: usize,
}

impl<'d> Reader<'d> {
    fn new(buf: &'d [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let end = self.pos + N;
        let bytes = self.buf.get(self.pos..end).ok_or(Error::MalformedPayload)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        self.pos = end;
        Ok(out)
    }

    fn read_u8(&mut self) -> Result<u8, Error> {
        self.take::<1>().map(|b| b[0])
    }

    fn read_u16_le(&mut self) -> Result<u16, Error> {
        self.take().map(u16::from_le_bytes)
    }

    fn read_u32_le(&mut self) -> Result<u32, Error> {
        self.take().map(u32::from_le_bytes)
    }
}
