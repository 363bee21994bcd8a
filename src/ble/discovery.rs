//! Discovery Adapter.
//!
//! Filters generic "database discovery" results down to completed CSC
//! service discoveries and folds the reported characteristics into a
//! [`PeerHandles`] table. No I/O; the discovery engine calls in
//! synchronously and fan-out to clients is the dispatcher's job.

use crate::ble::{AttHandle, ConnHandle, PeerHandles, Uuid};
use crate::config::{UUID_CSC_FEATURE, UUID_CSC_MEASUREMENT, UUID_CSC_SERVICE, UUID_SENSOR_LOCATION};

/// CSC service identifier.
pub const CSC_SERVICE: Uuid = Uuid::sig(UUID_CSC_SERVICE);
/// CSC Measurement characteristic identifier.
pub const CSC_MEASUREMENT: Uuid = Uuid::sig(UUID_CSC_MEASUREMENT);
/// CSC Feature characteristic identifier.
pub const CSC_FEATURE: Uuid = Uuid::sig(UUID_CSC_FEATURE);
/// Sensor Location characteristic identifier.
pub const SENSOR_LOCATION: Uuid = Uuid::sig(UUID_SENSOR_LOCATION);

/// One characteristic reported by the discovery engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DiscoveredCharacteristic {
    pub uuid: Uuid,
    pub handle_decl: AttHandle,
    pub handle_value: AttHandle,
    /// Client Characteristic Configuration Descriptor, if the peer has one.
    pub cccd_handle: Option<AttHandle>,
}

/// A service and the characteristics found inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiscoveredService<'a> {
    pub srv_uuid: Uuid,
    pub characteristics: &'a [DiscoveredCharacteristic],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscoveryEventKind<'a> {
    /// A registered service was found and fully enumerated.
    Complete(DiscoveredService<'a>),
    /// A registered service is not present on the peer.
    ServiceNotFound { srv_uuid: Uuid },
    /// The procedure failed with a stack status code.
    Error(u32),
    /// The discovery engine could not run (e.g. busy).
    Unavailable,
}

/// Result of a discovery procedure on one connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiscoveryEvent<'a> {
    pub conn: ConnHandle,
    pub kind: DiscoveryEventKind<'a>,
}

/// Build a handle table from a discovery result.
///
/// Returns `None` unless the event is a completed discovery of the CSC
/// service in the SIG namespace. Unrecognised characteristics are skipped.
/// Slots not reported stay unassigned, so the result replaces any earlier
/// table rather than merging into it.
pub fn csc_peer_handles(evt: &DiscoveryEvent<'_>) -> Option<PeerHandles> {
    let DiscoveryEventKind::Complete(service) = evt.kind else {
        return None;
    };

    if service.srv_uuid != CSC_SERVICE {
        return None;
    }

    let mut peer = PeerHandles::unassigned();
    for chr in service.characteristics {
        match chr.uuid {
            CSC_MEASUREMENT => {
                peer.measurement = Some(chr.handle_value);
                peer.measurement_cccd = chr.cccd_handle;
            }
            CSC_FEATURE => peer.feature = Some(chr.handle_value),
            SENSOR_LOCATION => peer.sensor_location = Some(chr.handle_value),
            _ => {}
        }
    }

    Some(peer)
}
