//! Structured logging
//!
//! The crate only emits [`tracing`] events; installing a subscriber is left to the application.
//! [`init_logging`] installs a compact stderr subscriber for applications that have none.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable that overrides the filter passed to [`init_logging`]
pub const LOG_ENV: &str = "GRAPHKIT_LOG";

/// Installs a global `fmt` subscriber writing to stderr.
///
/// `RUST_LOG` or [`LOG_ENV`] take precedence over `filter`, which is a directive such as
/// `graphkit=debug` or a bare level that is applied to this crate.
///
/// # Errors
/// Returns an error if `filter` is invalid or a global subscriber is already installed.
pub fn init_logging(filter: &str) -> Result<(), Box<dyn std::error::Error>> {
    let filter = match EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_from_env(LOG_ENV)) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(directive(filter))?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()?;

    Ok(())
}

/// Scopes a bare level to this crate
fn directive(filter: &str) -> String {
    if filter.contains('=') || filter.contains(',') {
        filter.to_string()
    } else {
        format!("graphkit={filter}")
    }
}
