//! Logging setup for the `cuecard` binary

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Log level selected by the global flags. `--quiet` wins over the others.
pub fn log_level(verbose: bool, debug: bool, quiet: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if debug {
        Level::DEBUG
    } else if verbose {
        Level::TRACE
    } else {
        Level::WARN
    }
}

/// Install the global subscriber, writing to stderr so stdout stays clean
/// for rendered prompts and machine-readable output. `RUST_LOG` overrides the
/// level picked from the flags.
pub fn configure_logging(verbose: bool, debug: bool, quiet: bool) {
    let level = log_level(verbose, debug, quiet);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("notify=warn,{level}")));

    registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
