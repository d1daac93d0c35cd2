use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use argh::FromArgs;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use madobe::{EventKind, HostLoop, MonitorBridge, Rect, SyntheticMonitor, WindowId};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Madobe watch - drive the window-monitor bridge over stdin/stdout
#[derive(FromArgs)]
struct Cli {
    #[argh(subcommand)]
    command: Option<SubCommand>,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum SubCommand {
    Run(RunCmd),
    Version(VersionCmd),
}

/// Run the bridge against the built-in synthetic monitor
#[derive(FromArgs)]
#[argh(subcommand, name = "run")]
struct RunCmd {}

/// Show version information
#[derive(FromArgs)]
#[argh(subcommand, name = "version")]
struct VersionCmd {}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum Input {
    /// Make a window known to the synthetic monitor.
    AddWindow { window_id: WindowId },
    /// Register a host callback for a window.
    Register { window_id: WindowId },
    /// Stop monitoring a window.
    Unregister { window_id: WindowId },
    /// Deliver a native event, as the monitor library would.
    Emit {
        window_id: WindowId,
        kind: EventKind,
        rect: Rect,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum Output {
    Ok,
    Registered { window_id: WindowId, code: i32 },
    Error { message: String },
}

fn main() -> Result<()> {
    let cli: Cli = argh::from_env();

    match cli.command {
        None | Some(SubCommand::Run(_)) => {
            // Keep stdout clean for the line protocol.
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(io::stderr)
                .init();

            tracing::info!("madobe-watch starting");
            run()
        }
        Some(SubCommand::Version(_)) => {
            println!("madobe-watch {}", VERSION);
            Ok(())
        }
    }
}

fn run() -> Result<()> {
    let (host, host_handle) = HostLoop::new();
    let monitor = Arc::new(SyntheticMonitor::new());
    let bridge = MonitorBridge::new(Arc::clone(&monitor), host_handle);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let output = match serde_json::from_str::<Input>(&line) {
            Ok(input) => handle_input(&bridge, &monitor, input),
            Err(e) => Output::Error {
                message: e.to_string(),
            },
        };

        // Event lines queued by an emit come out before its response line.
        host.drain();

        serde_json::to_writer(&mut stdout, &output)?;
        writeln!(stdout)?;
        stdout.flush()?;
    }

    host.drain();
    Ok(())
}

fn handle_input(
    bridge: &MonitorBridge<Arc<SyntheticMonitor>>,
    monitor: &SyntheticMonitor,
    input: Input,
) -> Output {
    match input {
        Input::AddWindow { window_id } => {
            monitor.add_window(window_id);
            Output::Ok
        }
        Input::Register { window_id } => {
            let code = bridge.register_window_monitor(window_id, move |window_id, kind, rect| {
                let line = serde_json::json!({
                    "type": "event",
                    "window_id": window_id,
                    "kind": kind,
                    "rect": rect,
                });
                println!("{}", line);
            });
            Output::Registered {
                window_id,
                code: code.code(),
            }
        }
        Input::Unregister { window_id } => {
            bridge.unregister_window_monitor(window_id);
            Output::Ok
        }
        Input::Emit {
            window_id,
            kind,
            rect,
        } => {
            monitor.emit(window_id, kind, rect);
            Output::Ok
        }
    }
}
