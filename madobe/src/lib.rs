pub mod bridge;
pub mod error;
pub mod event;
pub mod host;
pub mod marshal;
pub mod monitor;
pub mod registry;

pub use bridge::MonitorBridge;
pub use error::ErrorCode;
pub use event::{EventKind, MonitorEvent, Rect, WindowId};
pub use host::{HostHandle, HostLoop, HostTask, HostValue};
pub use monitor::{MonitorDispatcher, SyntheticMonitor, WindowMonitor};
pub use registry::{CallbackHandle, EventRegistry};
