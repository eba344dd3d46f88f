//! Logging setup
//!
//! Logs go to stderr so stdout only carries the metric. `RUST_LOG` overrides
//! the default level.

use env_logger::{Builder, Env, Target};

/// Initialize the global logger
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Stderr)
        .format_timestamp_secs()
        .init();
}
