//! Cycling Speed and Cadence (CSC) GATT client.
//!
//! Binds to one peer link, consumes the CSC service handles produced by an
//! external discovery procedure, decodes CSC Measurement notifications and
//! queues the CCCD write that starts them. Radio, discovery engine and write
//! queue are supplied by the surrounding BLE stack through the traits in
//! [`ble::queue`].
//!
//! Host tests: `cargo test`. Embedded builds enable `defmt` for on-target
//! logging and `embassy` to forward events into an embassy-sync channel.

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to every module below.
mod fmt;

pub mod ble;
pub mod config;
pub mod csc;
pub mod error;

pub use ble::{
    AttHandle, BleEvent, ClientState, ConnHandle, CscsClient, CscsClientConfig, CscsEvent,
    Dispatcher, EventHandler, GattQueue, GattRequest, PeerHandles, Uuid,
};
pub use csc::{CscMeasurement, RevolutionRate};
pub use error::{Error, TransportError};
