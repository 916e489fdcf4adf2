//! Diagnostic logging setup
//!
//! Library code logs through `tracing` macros; the binary installs a
//! stderr subscriber once at startup. `RUST_LOG` directives are honored on
//! top of the level chosen from `-v` flags.

use std::io::IsTerminal;
use tracing::Level;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Map the number of `-v` flags to a default level
#[must_use]
pub const fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Install the stderr subscriber
///
/// # Errors
///
/// Returns `TryInitError` if a global subscriber is already installed.
pub fn init(verbosity: u8) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level_for(verbosity).into())
        .from_env_lossy();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).try_init()
}
