//! Diagnostics for botenv itself.
//!
//! Progress messages and package-manager output go to stdout untouched;
//! tracing output goes to stderr so it never mixes with them.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "BOTENV_LOG";

/// Initialize the tracing subscriber.
///
/// `BOTENV_LOG` wins when set. Otherwise `verbosity` picks the level:
/// 0 = warn, 1 = info, 2+ = debug.
pub fn init(verbosity: u8) {
    let fallback = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    // A subscriber may already be installed when running under tests.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
