//! Hand-off of client events to another task through an embassy channel.
//!
//! The client runs inside the stack's event dispatch and must not block, so
//! events are `try_send`-ed; if the consumer task is behind, the event is
//! dropped.

use crate::ble::{CscsEvent, EventHandler};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;

/// [`EventHandler`] forwarding every event into an embassy channel.
pub struct ChannelSink<'ch, M: RawMutex, const N: usize> {
    tx: Sender<'ch, M, CscsEvent, N>,
}

impl<'ch, M: RawMutex, const N: usize> ChannelSink<'ch, M, N> {
    pub fn new(tx: Sender<'ch, M, CscsEvent, N>) -> Self {
        Self { tx }
    }
}

impl<'ch, M: RawMutex, const N: usize> EventHandler for ChannelSink<'ch, M, N> {
    fn on_event(&mut self, evt: CscsEvent) {
        if self.tx.try_send(evt).is_err() {
            warn!("CSC event channel full - dropping event");
        }
    }
}
