//! Peer Handle Table - attribute handles of the CSC service on one peer.

use crate::ble::AttHandle;

/// Handles related to the CSC service found on the peer.
///
/// `None` means unassigned. Only meaningful while the owning client holds
/// the connection they were discovered on.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeerHandles {
    /// CSC Measurement characteristic value handle.
    pub measurement: Option<AttHandle>,
    /// CCCD of the CSC Measurement characteristic.
    pub measurement_cccd: Option<AttHandle>,
    /// CSC Feature characteristic value handle.
    pub feature: Option<AttHandle>,
    /// Sensor Location characteristic value handle.
    pub sensor_location: Option<AttHandle>,
}

impl PeerHandles {
    /// A table with every slot unassigned.
    pub const fn unassigned() -> Self {
        Self {
            measurement: None,
            measurement_cccd: None,
            feature: None,
            sensor_location: None,
        }
    }

    /// Both the measurement value and its CCCD are known.
    pub fn has_measurement(&self) -> bool {
        self.measurement.is_some() && self.measurement_cccd.is_some()
    }

    pub fn reset(&mut self) {
        *self = Self::unassigned();
    }
}
