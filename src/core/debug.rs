//! Logging setup: `tracing` events go to stderr through `tracing-subscriber`.
//!
//! `QSIM_LOG` takes an `EnvFilter` directive and wins over everything else.
//! Otherwise `--debug` or `QSIM_DEBUG=1` selects `debug`, and the default is `warn`.
use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

pub fn debug_env_enabled() -> bool {
    std::env::var("QSIM_DEBUG").ok().as_deref() == Some("1")
}

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose || debug_env_enabled() { "qsim=debug" } else { "qsim=warn" }
}

/// Install the global subscriber once; later calls are no-ops.
pub fn init_logging(verbose: bool) {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_env("QSIM_LOG")
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_flag_selects_debug() {
        assert_eq!(default_directive(true), "qsim=debug");
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(false);
        init_logging(true);
    }
}
