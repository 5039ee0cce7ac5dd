//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding an `EnvFilter` directive, e.g.
/// `STDCHECK_LOG=stdcheck_enforce=debug`.
pub const LOG_ENV: &str = "STDCHECK_LOG";

/// Install the stderr fmt subscriber.
///
/// `STDCHECK_LOG` wins when set and valid; otherwise the level is `warn`,
/// or `debug` with `--verbose`. Calling this more than once is a no-op.
pub fn init_logging(verbose: bool) {
    INIT.call_once(|| {
        let default_level = if verbose { "debug" } else { "warn" };
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(verbose),
            )
            .with(filter)
            .try_init();
    });
}
