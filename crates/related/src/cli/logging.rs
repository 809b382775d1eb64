//! Diagnostic logging for the CLI.

use std::io;

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Maps the `-v` count to the default log level.
fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs a stderr subscriber.
///
/// `RUST_LOG` takes precedence over the level chosen by `-v`. Output goes to stderr so that
/// `--json` output on stdout stays parseable.
pub fn init(verbose: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(verbose).into())
        .from_env_lossy();

    let installed = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .try_init();

    if let Err(e) = installed {
        eprintln!("warning: could not install logger: {e}");
    }
}
