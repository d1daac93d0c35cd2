use std::sync::Arc;

use crate::error::ErrorCode;
use crate::event::{MonitorEvent, WindowId};
use crate::host::{HostHandle, HostValue};
use crate::monitor::{MonitorDispatcher, WindowMonitor};
use crate::registry::{CallbackHandle, EventRegistry};

/// Ties the monitor library to the host-side callback table.
///
/// Owns the registry and the single fixed dispatcher handed to the monitor
/// on every registration. The dispatcher closes over the registry only and
/// re-looks up the window id per event.
pub struct MonitorBridge<M: WindowMonitor> {
    monitor: M,
    registry: Arc<EventRegistry>,
    dispatcher: MonitorDispatcher,
}

impl<M: WindowMonitor> MonitorBridge<M> {
    pub fn new(monitor: M, host: HostHandle) -> Self {
        let registry = Arc::new(EventRegistry::new(host));
        let fire_registry = Arc::clone(&registry);
        let dispatcher: MonitorDispatcher = Arc::new(move |window_id, kind, rect| {
            fire_registry.fire(MonitorEvent {
                window_id,
                kind,
                rect,
            });
        });

        Self {
            monitor,
            registry,
            dispatcher,
        }
    }

    /// Start monitoring a window.
    ///
    /// The monitor is asked first; the callback is stored only when it
    /// answers success. Any other code comes back unchanged and leaves no
    /// entry behind.
    pub fn register_window_monitor(
        &self,
        window_id: WindowId,
        callback: impl Fn(HostValue, HostValue, HostValue) + Send + Sync + 'static,
    ) -> ErrorCode {
        let code = self
            .monitor
            .register_callback(window_id, Arc::clone(&self.dispatcher));
        if code.is_success() {
            self.registry.add(window_id, CallbackHandle::new(callback));
            tracing::debug!("Monitoring window {}", window_id);
        } else {
            tracing::warn!("Monitor rejected window {}: {}", window_id, code);
        }
        code
    }

    /// Stop monitoring a window. Safe to call for ids that were never
    /// registered; events already in flight are dropped by the registry.
    pub fn unregister_window_monitor(&self, window_id: WindowId) {
        self.monitor.unregister_callback(window_id);
        self.registry.remove(window_id);
        tracing::debug!("Stopped monitoring window {}", window_id);
    }
}

impl<M: WindowMonitor> Drop for MonitorBridge<M> {
    fn drop(&mut self) {
        // The monitor may still hold dispatcher clones, so the handles are
        // released here rather than waiting for the registry itself to drop.
        self.registry.clear();
    }
}
