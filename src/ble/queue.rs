//! Seams to the external collaborators: the GATT request queue and the
//! discovery service.
//!
//! Neither is implemented here. The queue guarantees in-order delivery of
//! requests per link; a request that fails after it was accepted is reported
//! back through [`CscsClient::on_gatt_error`](crate::ble::CscsClient::on_gatt_error).

use crate::ble::{ConnHandle, GattRequest, Uuid};
use crate::error::TransportError;

/// Queued GATT transport shared by every client on a link.
pub trait GattQueue {
    /// Make `conn` known to the queue so requests for it are accepted.
    fn register_conn(&mut self, conn: ConnHandle) -> Result<(), TransportError>;

    /// Enqueue one request. `Ok` means accepted, not delivered.
    fn submit(&mut self, request: GattRequest) -> Result<(), TransportError>;
}

/// Discovery service accepting "watch for this service" registrations.
pub trait DiscoveryRegistry {
    fn register_service(&mut self, uuid: Uuid) -> Result<(), TransportError>;
}

impl<T: GattQueue + ?Sized> GattQueue for &mut T {
    fn register_conn(&mut self, conn: ConnHandle) -> Result<(), TransportError> {
        (**self).register_conn(conn)
    }

    fn submit(&mut self, request: GattRequest) -> Result<(), TransportError> {
        (**self).submit(request)
    }
}

impl<T: DiscoveryRegistry + ?Sized> DiscoveryRegistry for &mut T {
    fn register_service(&mut self, uuid: Uuid) -> Result<(), TransportError> {
        (**self).register_service(uuid)
    }
}
