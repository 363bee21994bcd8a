//! Cycling Speed and Cadence client instance.
//!
//! One instance tracks exactly one peer link:
//!
//! ```text
//!   Idle ──assign_connection──▶ ConnectedUndiscovered ──discovery──▶ Ready
//!    ▲                                  │                             │
//!    └────────────── Disconnected (matching conn) ◀───────────────────┘
//! ```
//!
//! Events for other links are ignored, so a single dispatcher can feed the
//! same stack event to many instances. Serving several peers means creating
//! several instances.

use crate::ble::discovery::{csc_peer_handles, CSC_SERVICE};
use crate::ble::observer::{BleObserver, DiscoveryObserver};
use crate::ble::queue::{DiscoveryRegistry, GattQueue};
use crate::ble::{AttHandle, BleEvent, ConnHandle, DiscoveryEvent, GattRequest, PeerHandles, WriteOp};
use crate::config::{CCCD_NOTIFICATION, CCCD_VALUE_LEN};
use crate::csc::{CscFeature, CscMeasurement, SensorLocation};
use crate::error::{Error, TransportError};
use heapless::Vec;

/// Events the client emits to its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CscsEvent {
    /// The CSC service was discovered on `conn`.
    DiscoveryComplete { conn: ConnHandle, peer: PeerHandles },
    /// A CSC Measurement notification arrived on `conn`.
    Measurement {
        conn: ConnHandle,
        measurement: CscMeasurement,
    },
    /// CSC Feature value read from the peer.
    Feature { conn: ConnHandle, feature: CscFeature },
    /// Sensor Location value read from the peer.
    SensorLocation {
        conn: ConnHandle,
        location: SensorLocation,
    },
}

impl CscsEvent {
    pub fn conn(&self) -> ConnHandle {
        match self {
            CscsEvent::DiscoveryComplete { conn, .. }
            | CscsEvent::Measurement { conn, .. }
            | CscsEvent::Feature { conn, .. }
            | CscsEvent::SensorLocation { conn, .. } => *conn,
        }
    }
}

/// Owner callback for [`CscsEvent`]s. Called synchronously from the
/// dispatch path; must not block.
pub trait EventHandler {
    fn on_event(&mut self, evt: CscsEvent);
}

impl<F: FnMut(CscsEvent)> EventHandler for F {
    fn on_event(&mut self, evt: CscsEvent) {
        self(evt)
    }
}

/// Called for failures that have no caller to return to: asynchronous GATT
/// queue errors and undecodable values received on the dispatch path.
pub type ErrorHandler = fn(ConnHandle, Error);

/// Client initialisation parameters.
pub struct CscsClientConfig<H> {
    pub evt_handler: H,
    pub error_handler: Option<ErrorHandler>,
}

/// Where an instance is in its connection lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClientState {
    /// No connection, no handles.
    Idle,
    /// Bound to a connection, CSC measurement handles unknown.
    ConnectedUndiscovered,
    /// Bound to a connection with the measurement value and CCCD handles known.
    Ready,
}

pub struct CscsClient<H> {
    conn: Option<ConnHandle>,
    peer_db: PeerHandles,
    evt_handler: H,
    error_handler: Option<ErrorHandler>,
}

impl<H: EventHandler> CscsClient<H> {
    /// Create an instance and register interest in the CSC service with the
    /// discovery engine.
    pub fn init(
        config: CscsClientConfig<H>,
        registry: &mut impl DiscoveryRegistry,
    ) -> Result<Self, Error> {
        registry.register_service(CSC_SERVICE)?;
        Ok(Self::new(config))
    }

    /// Create an instance without touching the discovery engine.
    pub fn new(config: CscsClientConfig<H>) -> Self {
        Self {
            conn: None,
            peer_db: PeerHandles::unassigned(),
            evt_handler: config.evt_handler,
            error_handler: config.error_handler,
        }
    }

    pub fn state(&self) -> ClientState {
        match self.conn {
            None => ClientState::Idle,
            Some(_) if self.peer_db.has_measurement() => ClientState::Ready,
            Some(_) => ClientState::ConnectedUndiscovered,
        }
    }

    pub fn conn_handle(&self) -> Option<ConnHandle> {
        self.conn
    }

    pub fn peer_handles(&self) -> &PeerHandles {
        &self.peer_db
    }

    pub fn event_handler(&self) -> &H {
        &self.evt_handler
    }

    pub fn event_handler_mut(&mut self) -> &mut H {
        &mut self.evt_handler
    }

    /// Bind this instance to `conn`, optionally with handles already known
    /// (e.g. from a bonded peer or a discovery result the owner relayed).
    ///
    /// The link is registered with `queue` first; nothing changes if that
    /// fails. Re-binding the current link is allowed and keeps the existing
    /// handles when `peer` is `None`. Binding while a different link is held
    /// fails with [`Error::InvalidState`].
    pub fn assign_connection(
        &mut self,
        queue: &mut impl GattQueue,
        conn: ConnHandle,
        peer: Option<PeerHandles>,
    ) -> Result<(), Error> {
        if !conn.is_valid() {
            return Err(Error::NullArgument);
        }
        if matches!(self.conn, Some(current) if current != conn) {
            warn!("CSC client already bound to another link");
            return Err(Error::InvalidState);
        }

        queue.register_conn(conn)?;

        self.conn = Some(conn);
        if let Some(peer) = peer {
            self.peer_db = peer;
        }
        debug!("CSC client bound to conn {}", conn);
        Ok(())
    }

    /// Request the peer to start sending CSC Measurement notifications.
    pub fn enable_notifications(&mut self, queue: &mut impl GattQueue) -> Result<(), Error> {
        self.cccd_configure(queue, true)
    }

    /// Request the peer to stop sending CSC Measurement notifications.
    pub fn disable_notifications(&mut self, queue: &mut impl GattQueue) -> Result<(), Error> {
        self.cccd_configure(queue, false)
    }

    /// Queue a read of the CSC Feature characteristic. The value arrives as
    /// [`CscsEvent::Feature`].
    pub fn read_feature(&mut self, queue: &mut impl GattQueue) -> Result<(), Error> {
        let handle = self.peer_db.feature;
        self.read(queue, handle)
    }

    /// Queue a read of the Sensor Location characteristic. The value arrives
    /// as [`CscsEvent::SensorLocation`].
    pub fn read_sensor_location(&mut self, queue: &mut impl GattQueue) -> Result<(), Error> {
        let handle = self.peer_db.sensor_location;
        self.read(queue, handle)
    }

    /// Entry point for the GATT queue to report a request that failed after
    /// it was accepted.
    pub fn on_gatt_error(&mut self, conn: ConnHandle, error: TransportError) {
        debug!("GATT client error on conn {}: {}", conn, error);
        if self.conn != Some(conn) {
            return;
        }
        self.report(conn, Error::Transport(error));
    }

    fn cccd_configure(&mut self, queue: &mut impl GattQueue, enable: bool) -> Result<(), Error> {
        let conn = self.conn.ok_or(Error::InvalidState)?;
        let cccd = self.peer_db.measurement_cccd.ok_or(Error::InvalidState)?;

        debug!("Configuring CCCD {} on conn {} (enable={})", cccd, conn, enable);

        let value: u16 = if enable { CCCD_NOTIFICATION } else { 0 };
        let mut payload: Vec<u8, CCCD_VALUE_LEN> = Vec::new();
        // Capacity equals the value length, cannot fail.
        let _ = payload.extend_from_slice(&value.to_le_bytes());

        queue.submit(GattRequest::Write {
            conn,
            handle: cccd,
            value: payload,
            op: WriteOp::Request,
        })?;
        Ok(())
    }

    fn read(&mut self, queue: &mut impl GattQueue, handle: Option<AttHandle>) -> Result<(), Error> {
        let conn = self.conn.ok_or(Error::InvalidState)?;
        let handle = handle.ok_or(Error::InvalidState)?;
        queue.submit(GattRequest::Read { conn, handle })?;
        Ok(())
    }

    fn on_hvx(&mut self, conn: ConnHandle, handle: AttHandle, data: &[u8]) {
        if self.conn != Some(conn) || self.peer_db.measurement != Some(handle) {
            return;
        }

        match CscMeasurement::from_ble_bytes(data) {
            Ok(measurement) => self
                .evt_handler
                .on_event(CscsEvent::Measurement { conn, measurement }),
            Err(e) => {
                warn!("Dropping CSC measurement ({} bytes): {}", data.len(), e);
                self.report(conn, e);
            }
        }
    }

    fn on_read_response(&mut self, conn: ConnHandle, handle: AttHandle, data: &[u8]) {
        if self.conn != Some(conn) {
            return;
        }

        let evt = if self.peer_db.feature == Some(handle) {
            CscFeature::from_ble_bytes(data).map(|feature| CscsEvent::Feature { conn, feature })
        } else if self.peer_db.sensor_location == Some(handle) {
            SensorLocation::from_ble_bytes(data)
                .map(|location| CscsEvent::SensorLocation { conn, location })
        } else {
            return;
        };

        match evt {
            Ok(evt) => self.evt_handler.on_event(evt),
            Err(e) => {
                warn!("Dropping read response for {}: {}", handle, e);
                self.report(conn, e);
            }
        }
    }

    fn on_disconnected(&mut self, conn: ConnHandle) {
        if self.conn != Some(conn) {
            return;
        }
        debug!("CSC client released conn {}", conn);
        self.conn = None;
        self.peer_db.reset();
    }

    fn report(&self, conn: ConnHandle, error: Error) {
        if let Some(handler) = self.error_handler {
            handler(conn, error);
        }
    }
}

impl<H: EventHandler> BleObserver for CscsClient<H> {
    fn on_ble_evt(&mut self, evt: &BleEvent<'_>) {
        match *evt {
            BleEvent::Hvx {
                conn, handle, data, ..
            } => self.on_hvx(conn, handle, data),
            BleEvent::ReadResponse { conn, handle, data } => {
                self.on_read_response(conn, handle, data)
            }
            BleEvent::Disconnected { conn, .. } => self.on_disconnected(conn),
            BleEvent::Connected { .. } | BleEvent::Other => {}
        }
    }
}

impl<H: EventHandler> DiscoveryObserver for CscsClient<H> {
    /// Replace the handle table when the CSC service was discovered on this
    /// instance's link, then notify the owner.
    fn on_db_disc_evt(&mut self, evt: &DiscoveryEvent<'_>) {
        let Some(peer) = csc_peer_handles(evt) else {
            return;
        };

        if self.conn != Some(evt.conn) {
            debug!("Ignoring CSC discovery for conn {}", evt.conn);
            return;
        }

        self.peer_db = peer;
        info!(
            "CSC service discovered on conn {} (measurement ready: {})",
            evt.conn,
            peer.has_measurement()
        );

        self.evt_handler.on_event(CscsEvent::DiscoveryComplete {
            conn: evt.conn,
            peer,
        });
    }
}
