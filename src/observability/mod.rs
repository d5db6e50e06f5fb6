//! Structured logging setup.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "flowgraph=info";

/// Initialize structured logging with `RUST_LOG` environment variable support.
/// An explicit `directive` overrides `RUST_LOG`.
///
/// Logs go to stderr so JSON written to stdout stays machine-readable.
/// Subsequent calls are silently ignored by `tracing_subscriber`.
pub fn init_logging_with(directive: Option<&str>) {
    let filter = match directive {
        Some(d) => EnvFilter::new(d),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    // try_init so double-init in tests doesn't panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}
