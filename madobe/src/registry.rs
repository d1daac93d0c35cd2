use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::event::{MonitorEvent, WindowId};
use crate::host::{HostHandle, HostValue};
use crate::marshal;

/// Host-side callback plus the context it needs, behind a shared reference
/// so in-flight deliveries can outlive a replacement or removal.
#[derive(Clone)]
pub struct CallbackHandle {
    callback: Arc<dyn Fn(HostValue, HostValue, HostValue) + Send + Sync>,
}

impl CallbackHandle {
    pub fn new(callback: impl Fn(HostValue, HostValue, HostValue) + Send + Sync + 'static) -> Self {
        Self {
            callback: Arc::new(callback),
        }
    }

    fn invoke(&self, window_id: HostValue, kind: HostValue, rect: HostValue) {
        (self.callback)(window_id, kind, rect);
    }
}

/// Table of host callbacks keyed by window id: at most one per window,
/// last writer wins.
///
/// Shared between the host-driven register/unregister path and the monitor's
/// event-delivery threads. One mutex guards the whole map; the lock is never
/// held across host submission or callback invocation.
pub struct EventRegistry {
    entries: Mutex<HashMap<WindowId, CallbackHandle>>,
    host: HostHandle,
}

impl EventRegistry {
    pub fn new(host: HostHandle) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            host,
        }
    }

    // The critical sections below never panic, so a poisoned lock still
    // holds a consistent map.
    fn entries(&self) -> MutexGuard<'_, HashMap<WindowId, CallbackHandle>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert or replace the callback for a window. A replaced handle is
    /// released immediately.
    pub fn add(&self, window_id: WindowId, handle: CallbackHandle) {
        let replaced = self.entries().insert(window_id, handle);
        if replaced.is_some() {
            tracing::debug!("Replaced callback for window {}", window_id);
        }
    }

    /// Erase the entry for a window, releasing its handle. Removing an
    /// unknown id is a no-op.
    pub fn remove(&self, window_id: WindowId) {
        if self.entries().remove(&window_id).is_some() {
            tracing::debug!("Removed callback for window {}", window_id);
        }
    }

    /// Deliver a native event to the registered callback, if any.
    ///
    /// The hand-off to the host context is fire-and-forget; the delivering
    /// thread never waits for the callback. An event for a window with no
    /// entry is dropped silently: the window may have been unregistered
    /// while this event was in flight.
    pub fn fire(&self, event: MonitorEvent) {
        let handle = match self.entries().get(&event.window_id) {
            Some(handle) => handle.clone(),
            None => {
                tracing::trace!("No callback for window {}, dropping event", event.window_id);
                return;
            }
        };

        self.host.submit(Box::new(move || match marshal::host_args(&event) {
            Ok((window_id, kind, rect)) => handle.invoke(window_id, kind, rect),
            Err(e) => {
                tracing::warn!(
                    "Failed to convert event for window {}, dropping it: {}",
                    event.window_id,
                    e
                );
            }
        }));
    }

    /// Drop every stored handle. Called during teardown, before the host
    /// context goes away.
    pub fn clear(&self) {
        let mut entries = self.entries();
        if !entries.is_empty() {
            tracing::debug!("Releasing {} remaining callback(s)", entries.len());
        }
        entries.clear();
    }
}
