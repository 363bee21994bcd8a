//! Ordered listener lists for stack and discovery events.
//!
//! Each client instance is built explicitly and then registered with a
//! priority. Dispatch walks listeners lowest priority value first; equal
//! priorities keep registration order.
//!
//! Listeners sit behind `RefCell` so the application keeps access to its
//! clients between dispatches. A listener that is already borrowed when an
//! event arrives (re-entrant dispatch) is skipped.

use core::cell::RefCell;

use crate::ble::{BleEvent, DiscoveryEvent};
use crate::error::Error;
use heapless::Vec;

/// Receives every event from the stack's event loop.
pub trait BleObserver {
    fn on_ble_evt(&mut self, evt: &BleEvent<'_>);
}

/// Receives every result from the discovery engine.
pub trait DiscoveryObserver {
    fn on_db_disc_evt(&mut self, evt: &DiscoveryEvent<'_>);
}

struct Entry<'a, T: ?Sized> {
    priority: u8,
    observer: &'a RefCell<T>,
}

/// Priority-ordered list of at most `N` listeners.
pub struct ObserverList<'a, T: ?Sized, const N: usize> {
    entries: Vec<Entry<'a, T>, N>,
}

impl<'a, T: ?Sized, const N: usize> ObserverList<'a, T, N> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert `observer` after every entry with a priority value `<= priority`.
    pub fn register(&mut self, priority: u8, observer: &'a RefCell<T>) -> Result<(), Error> {
        let index = self
            .entries
            .iter()
            .position(|e| e.priority > priority)
            .unwrap_or(self.entries.len());

        self.entries
            .insert(index, Entry { priority, observer })
            .map_err(|_| {
                warn!("Observer list full ({} entries)", N);
                Error::InvalidState
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn for_each(&self, mut f: impl FnMut(&mut T)) {
        for (index, entry) in self.entries.iter().enumerate() {
            match entry.observer.try_borrow_mut() {
                Ok(mut observer) => f(&mut *observer),
                Err(_) => warn!("Observer {} busy - skipping event", index),
            }
        }
    }
}

impl<'a, T: ?Sized, const N: usize> Default for ObserverList<'a, T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> ObserverList<'a, dyn BleObserver + 'a, N> {
    pub fn dispatch(&self, evt: &BleEvent<'_>) {
        self.for_each(|observer| observer.on_ble_evt(evt));
    }
}

impl<'a, const N: usize> ObserverList<'a, dyn DiscoveryObserver + 'a, N> {
    pub fn dispatch(&self, evt: &DiscoveryEvent<'_>) {
        self.for_each(|observer| observer.on_db_disc_evt(evt));
    }
}

/// Stack-event and discovery-result fan-out for a set of clients.
pub struct Dispatcher<'a, const N: usize> {
    ble: ObserverList<'a, dyn BleObserver + 'a, N>,
    discovery: ObserverList<'a, dyn DiscoveryObserver + 'a, N>,
}

impl<'a, const N: usize> Dispatcher<'a, N> {
    pub const fn new() -> Self {
        Self {
            ble: ObserverList::new(),
            discovery: ObserverList::new(),
        }
    }

    /// Register a listener for both stack events and discovery results.
    pub fn register<C>(&mut self, priority: u8, client: &'a RefCell<C>) -> Result<(), Error>
    where
        C: BleObserver + DiscoveryObserver + 'a,
    {
        if self.ble.len() >= N || self.discovery.len() >= N {
            return Err(Error::InvalidState);
        }
        self.ble.register(priority, client)?;
        self.discovery.register(priority, client)
    }

    /// Register a listener for stack events only.
    pub fn register_ble(
        &mut self,
        priority: u8,
        observer: &'a RefCell<dyn BleObserver + 'a>,
    ) -> Result<(), Error> {
        self.ble.register(priority, observer)
    }

    /// Register a listener for discovery results only.
    pub fn register_discovery(
        &mut self,
        priority: u8,
        observer: &'a RefCell<dyn DiscoveryObserver + 'a>,
    ) -> Result<(), Error> {
        self.discovery.register(priority, observer)
    }

    pub fn on_ble_evt(&self, evt: &BleEvent<'_>) {
        self.ble.dispatch(evt);
    }

    pub fn on_db_disc_evt(&self, evt: &DiscoveryEvent<'_>) {
        self.discovery.dispatch(evt);
    }
}

impl<'a, const N: usize> Default for Dispatcher<'a, N> {
    fn default() -> Self {
        Self::new()
    }
}
