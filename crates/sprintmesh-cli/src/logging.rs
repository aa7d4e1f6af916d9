use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` wins over the defaults.
pub fn init(debug: bool) {
    let default = if debug {
        "sprintmesh=debug,sprintmesh_core=debug,warn"
    } else {
        "sprintmesh_core=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(debug)
        .without_time()
        .try_init();
}
