//! Bluetooth Low Energy client side of the Cycling Speed and Cadence profile.
//!
//! The stack itself (link layer, discovery procedure, write queue) lives
//! elsewhere; this module consumes its events and hands requests back:
//!
//! 1. **Discovery Adapter** - folds a "service discovered" result into a
//!    [`PeerHandles`] table.
//! 2. **CSC Client** - per-connection state machine that decodes
//!    measurement notifications and issues CCCD writes.
//! 3. **Observers** - ordered listener list fanning stack events out to
//!    any number of client instances.

#[cfg(feature = "embassy")]
pub mod channel;
pub mod cscs_client;
pub mod discovery;
pub mod observer;
pub mod peer_db;
pub mod queue;


use core::fmt;

use crate::config::MAX_WRITE_LEN;
use heapless::Vec;

pub use cscs_client::{ClientState, CscsClient, CscsClientConfig, CscsEvent, EventHandler};
pub use discovery::{DiscoveredCharacteristic, DiscoveredService, DiscoveryEvent, DiscoveryEventKind};
pub use observer::{BleObserver, Dispatcher, DiscoveryObserver, ObserverList};
pub use peer_db::PeerHandles;
pub use queue::{DiscoveryRegistry, GattQueue};

/// Link identifier assigned by the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnHandle(pub u16);

impl ConnHandle {
    /// "No connection" value some stacks use in place of a handle.
    pub const INVALID: ConnHandle = ConnHandle(0xFFFF);

    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }
}

impl fmt::Display for ConnHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

/// Attribute handle on one connection's view of the peer database.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AttHandle(pub u16);

impl fmt::Display for AttHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

/// UUID namespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UuidType {
    /// Bluetooth SIG assigned 16-bit UUID.
    Sig,
    /// 16-bit alias into a vendor-specific 128-bit base, indexed by the stack.
    Vendor(u8),
}

/// 16-bit UUID qualified by its namespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Uuid {
    pub kind: UuidType,
    pub value: u16,
}

impl Uuid {
    pub const fn sig(value: u16) -> Self {
        Self {
            kind: UuidType::Sig,
            value,
        }
    }

    pub const fn vendor(base: u8, value: u16) -> Self {
        Self {
            kind: UuidType::Vendor(base),
            value,
        }
    }
}

/// Handle Value notification or indication.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HvxType {
    Notification,
    Indication,
}

/// Events delivered by the stack's event loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BleEvent<'a> {
    /// A link came up.
    Connected { conn: ConnHandle },
    /// A link went down.
    Disconnected { conn: ConnHandle, reason: u8 },
    /// Notification/indication received from the peer.
    Hvx {
        conn: ConnHandle,
        handle: AttHandle,
        kind: HvxType,
        data: &'a [u8],
    },
    /// Value returned for a previously queued read.
    ReadResponse {
        conn: ConnHandle,
        handle: AttHandle,
        data: &'a [u8],
    },
    /// Anything this crate has no interest in.
    Other,
}

impl BleEvent<'_> {
    pub fn conn(&self) -> Option<ConnHandle> {
        match self {
            BleEvent::Connected { conn }
            | BleEvent::Disconnected { conn, .. }
            | BleEvent::Hvx { conn, .. }
            | BleEvent::ReadResponse { conn, .. } => Some(*conn),
            BleEvent::Other => None,
        }
    }
}

/// ATT write semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WriteOp {
    /// Write Request - acknowledged by the peer.
    Request,
    /// Write Command - unacknowledged.
    Command,
}

/// Request handed to the external GATT queue.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GattRequest {
    Write {
        conn: ConnHandle,
        handle: AttHandle,
        value: Vec<u8, MAX_WRITE_LEN>,
        op: WriteOp,
    },
    Read {
        conn: ConnHandle,
        handle: AttHandle,
    },
}

impl GattRequest {
    pub fn conn(&self) -> ConnHandle {
        match self {
            GattRequest::Write { conn, .. } | GattRequest::Read { conn, .. } => *conn,
        }
    }

    pub fn handle(&self) -> AttHandle {
        match self {
            GattRequest::Write { handle, .. } | GattRequest::Read { handle, .. } => *handle,
        }
    }
}
