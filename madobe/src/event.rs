use serde::{Deserialize, Serialize};

/// Identifier of a native window. Assigned by the host, opaque here.
pub type WindowId = i32;

/// Window bounding box at the moment an event was captured.
///
/// No range validation happens anywhere in this crate; inverted or negative
/// coordinates pass through as received from the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Event category code as defined by the monitor library.
///
/// The monitor owns the member set; codes this crate does not know about are
/// forwarded verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventKind(pub i32);

impl EventKind {
    pub const MOVED: EventKind = EventKind(1);
    pub const RESIZED: EventKind = EventKind(2);
    pub const FOCUSED: EventKind = EventKind(3);
    pub const DESTROYED: EventKind = EventKind(4);

    pub fn code(self) -> i32 {
        self.0
    }
}

/// A single native window event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorEvent {
    pub window_id: WindowId,
    pub kind: EventKind,
    pub rect: Rect,
}
