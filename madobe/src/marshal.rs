use crate::event::MonitorEvent;
use crate::host::HostValue;

/// Convert an event into the three positional host callback arguments:
/// window id, event kind code, rectangle object.
///
/// Runs on the host context, never on the monitor's delivery thread. A
/// failure here loses that one event and nothing else.
pub fn host_args(event: &MonitorEvent) -> serde_json::Result<(HostValue, HostValue, HostValue)> {
    let window_id = HostValue::from(event.window_id);
    let kind = HostValue::from(event.kind.code());
    let rect = serde_json::to_value(event.rect)?;
    Ok((window_id, kind, rect))
}
