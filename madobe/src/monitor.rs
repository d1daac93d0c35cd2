use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::ErrorCode;
use crate::event::{EventKind, Rect, WindowId};

/// Dispatcher the monitor invokes for every native event.
///
/// One fixed instance per bridge, cloned into each registration call. It
/// carries no per-window state; routing happens by re-looking up the window
/// id on every event.
pub type MonitorDispatcher = Arc<dyn Fn(WindowId, EventKind, Rect) + Send + Sync>;

/// The native window-monitor library.
/// This abstraction allows mocking in tests.
pub trait WindowMonitor {
    /// Ask the monitor to start delivering events for a window. Zero means
    /// accepted; any other code is the monitor's own and is passed through
    /// to the host unchanged.
    fn register_callback(&self, window_id: WindowId, dispatcher: MonitorDispatcher) -> ErrorCode;

    /// Stop delivery for a window. Idempotent.
    fn unregister_callback(&self, window_id: WindowId);
}

impl<M: WindowMonitor + ?Sized> WindowMonitor for Arc<M> {
    fn register_callback(&self, window_id: WindowId, dispatcher: MonitorDispatcher) -> ErrorCode {
        (**self).register_callback(window_id, dispatcher)
    }

    fn unregister_callback(&self, window_id: WindowId) {
        (**self).unregister_callback(window_id)
    }
}

struct SyntheticState {
    windows: HashSet<WindowId>,
    dispatchers: HashMap<WindowId, MonitorDispatcher>,
}

/// In-process stand-in for the native monitor: a set of known windows and a
/// dispatcher table. Events are delivered from whichever thread calls
/// `emit`, the way the real library delivers from its own threads.
pub struct SyntheticMonitor {
    state: Mutex<SyntheticState>,
}

impl SyntheticMonitor {
    /// Code returned when registering a window the monitor does not know.
    pub const INVALID_WINDOW: ErrorCode = ErrorCode(2);

    pub fn new() -> Self {
        Self {
            state: Mutex::new(SyntheticState {
                windows: HashSet::new(),
                dispatchers: HashMap::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, SyntheticState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make a window known to the monitor.
    pub fn add_window(&self, window_id: WindowId) {
        self.state().windows.insert(window_id);
    }

    /// Deliver an event for a window. Windows without a registered
    /// dispatcher are discarded, mirroring a monitor that has already
    /// stopped delivery.
    pub fn emit(&self, window_id: WindowId, kind: EventKind, rect: Rect) {
        let dispatcher = self.state().dispatchers.get(&window_id).cloned();
        match dispatcher {
            Some(dispatcher) => dispatcher(window_id, kind, rect),
            None => {
                tracing::trace!("No dispatcher for window {}, discarding event", window_id);
            }
        }
    }
}

impl WindowMonitor for SyntheticMonitor {
    fn register_callback(&self, window_id: WindowId, dispatcher: MonitorDispatcher) -> ErrorCode {
        let mut state = self.state();
        if !state.windows.contains(&window_id) {
            tracing::debug!("Rejecting registration for unknown window {}", window_id);
            return Self::INVALID_WINDOW;
        }
        state.dispatchers.insert(window_id, dispatcher);
        ErrorCode::SUCCESS
    }

    fn unregister_callback(&self, window_id: WindowId) {
        self.state().dispatchers.remove(&window_id);
    }
}

impl Default for SyntheticMonitor {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn rect() -> Rect {
        Rect {
            left: 0,
            top: 0,
            right: 10,
            bottom: 10,
        }
    }

    #[test]
    fn test_register_unknown_window_is_rejected() {
        let monitor = SyntheticMonitor::new();
        let dispatcher: MonitorDispatcher = Arc::new(|_, _, _| {});
        let code = monitor.register_callback(99, dispatcher);
        assert_eq!(code, SyntheticMonitor::INVALID_WINDOW);
    }

    #[test]
    fn test_emit_reaches_registered_dispatcher() {
        let monitor = SyntheticMonitor::new();
        monitor.add_window(42);

        let delivered = Arc::new(AtomicUsize::new(0));
        let delivered_clone = Arc::clone(&delivered);
        let dispatcher: MonitorDispatcher = Arc::new(move |_, _, _| {
            delivered_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(monitor.register_callback(42, dispatcher), ErrorCode::SUCCESS);
        monitor.emit(42, EventKind::MOVED, rect());
        assert_eq!(delivered.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_emit_after_unregister_is_discarded() {
        let monitor = SyntheticMonitor::new();
        monitor.add_window(42);

        let delivered = Arc::new(AtomicUsize::new(0));
        let delivered_clone = Arc::clone(&delivered);
        let dispatcher: MonitorDispatcher = Arc::new(move |_, _, _| {
            delivered_clone.fetch_add(1, Ordering::SeqCst);
        });
        monitor.register_callback(42, dispatcher);

        monitor.unregister_callback(42);
        monitor.unregister_callback(42);
        monitor.emit(42, EventKind::RESIZED, rect());
        assert_eq!(delivered.load(Ordering::SeqCst), 0);
    }
}
