//! Tracing subscriber setup for embedding hosts

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a fmt subscriber filtered by `RUST_LOG`, or by the verbosity
/// flags when `RUST_LOG` is unset.
///
/// Returns false if a global subscriber was already installed.
pub fn init_logging(verbose: bool, quiet: bool) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if quiet {
            "warn"
        } else if verbose {
            "debug"
        } else {
            "info"
        };
        EnvFilter::new(level)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init()
        .is_ok()
}
