//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `log_level`. `log_format` selects
/// human-readable (`text`) or structured (`json`) output. Calling this more
/// than once is a no-op.
pub fn init(log_level: &str, log_format: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt().with_env_filter(env_filter).with_target(false);

    let _ = if log_format == "json" {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}
